//! RadioTap header extraction.
//!
//! Grounded on the real `radiotap` crate's field types (`AntennaSignal`,
//! `AntennaNoise`, `Channel`): this module only reads the three fields the
//! decoder needs and hands back the remaining bytes as the 802.11 frame.

use crate::err::DecodeError;

/// The handful of RadioTap-derived values the decoder needs, plus the
/// 802.11 frame bytes that follow the RadioTap header.
pub struct RadiotapInfo<'a> {
    pub frequency_mhz: u32,
    pub rssi_dbm: i8,
    /// Missing noise is reported as 0 so SNR collapses to RSSI, per spec.
    pub noise_dbm: i8,
    pub frame: &'a [u8],
}

pub fn parse(record: &[u8]) -> Result<RadiotapInfo<'_>, DecodeError> {
    let radiotap = radiotap::Radiotap::from_bytes(record)
        .map_err(|err| DecodeError::BadRadiotap(err.to_string()))?;

    let header_len = radiotap.header.length;
    if record.len() < header_len {
        return Err(DecodeError::Truncated);
    }

    let frequency_mhz = radiotap
        .channel
        .as_ref()
        .map(|channel| u32::from(channel.freq))
        .unwrap_or(0);
    let rssi_dbm = radiotap
        .antenna_signal
        .as_ref()
        .map(|signal| signal.value)
        .unwrap_or(0);
    let noise_dbm = radiotap
        .antenna_noise
        .as_ref()
        .map(|noise| noise.value)
        .unwrap_or(0);

    Ok(RadiotapInfo {
        frequency_mhz,
        rssi_dbm,
        noise_dbm,
        frame: &record[header_len..],
    })
}
