//! Frame Decoder: a pure, total function from a raw capture record to an
//! optional normalized [`Observation`].

pub mod dot11;
pub mod ie;
pub mod radiotap;

use std::time::SystemTime;

use crate::{
    consts::{Band, SecondaryChannelOffset, WidthOperation},
    err::DecodeError,
};

/// One accepted management frame, normalized for the DataSource.
#[derive(Debug, Clone)]
pub struct Observation {
    pub bssid: [u8; 6],
    pub ssid: String,
    pub frequency_mhz: u32,
    pub rssi_dbm: i8,
    pub noise_dbm: i8,
    pub primary_channel: u32,
    pub secondary_offset: SecondaryChannelOffset,
    pub vht_width_op: WidthOperation,
    pub seg0_center: u32,
    pub seg1_center: u32,
    pub timestamp: SystemTime,
}

impl Observation {
    pub fn band(&self) -> Band {
        Band::from_channel(self.primary_channel)
    }

    pub fn snr_dbm(&self) -> i32 {
        i32::from(self.rssi_dbm) - i32::from(self.noise_dbm)
    }
}

/// Decode one capture record (RadioTap header + 802.11 frame). Returns
/// `Ok(None)` for frame types this crate doesn't track (non-management,
/// or a recognized-but-irrelevant management subtype); malformed *IEs*
/// degrade individual fields rather than failing the whole record, but a
/// truncated RadioTap header or MAC header is a hard `Err`.
pub fn decode(record: &[u8]) -> Result<Option<Observation>, DecodeError> {
    let rt = radiotap::parse(record)?;

    let Some(header) = dot11::parse(rt.frame) else {
        return Ok(None);
    };
    if !header.subtype.is_recognized() {
        return Ok(None);
    }
    let Some(bssid) = header.bssid() else {
        return Ok(None);
    };

    let ssid = ie::ssid(header.body)
        .or_else(|| embedded_ssid_fallback(header.body))
        .unwrap_or_default();

    let ht = ie::ht_operation(header.body);
    let vht = ie::vht_operation(header.body);
    let ds_channel = ie::ds_channel(header.body);

    let primary_channel = ht
        .as_ref()
        .map(|ht| u32::from(ht.primary_channel))
        .or_else(|| ds_channel.map(u32::from))
        .unwrap_or(0);
    let secondary_offset = ht
        .as_ref()
        .map(|ht| ht.secondary_offset)
        .unwrap_or(SecondaryChannelOffset::Scn);
    let vht_width_op = vht
        .as_ref()
        .map(|vht| vht.width_op)
        .unwrap_or(WidthOperation::W20Or40);
    let seg0_center = vht.as_ref().map(|vht| u32::from(vht.seg0_center)).unwrap_or(0);
    let seg1_center = vht.as_ref().map(|vht| u32::from(vht.seg1_center)).unwrap_or(0);

    Ok(Some(Observation {
        bssid,
        ssid,
        frequency_mhz: rt.frequency_mhz,
        rssi_dbm: rt.rssi_dbm,
        noise_dbm: rt.noise_dbm,
        primary_channel,
        secondary_offset,
        vht_width_op,
        seg0_center,
        seg1_center,
        timestamp: SystemTime::now(),
    }))
}

/// Fallback SSID extraction for the case where the tagged IE walk can't
/// find tag 0 (e.g. a non-conforming AP places it at the expected offset
/// without the length byte lining up with a clean tag walk): read the
/// length and bytes directly at the position a conforming frame would put
/// them, guarding on the frame actually being long enough.
fn embedded_ssid_fallback(body: &[u8]) -> Option<String> {
    if body.len() < 14 {
        return None;
    }
    let len = body[13] as usize;
    if body.len() < 14 + len || len == 0 {
        return None;
    }
    Some(ie::sanitize(&body[14..14 + len]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snr_is_rssi_minus_noise() {
        let obs = Observation {
            bssid: [0; 6],
            ssid: String::new(),
            frequency_mhz: 2437,
            rssi_dbm: -55,
            noise_dbm: -95,
            primary_channel: 6,
            secondary_offset: SecondaryChannelOffset::Sca,
            vht_width_op: WidthOperation::W20Or40,
            seg0_center: 0,
            seg1_center: 0,
            timestamp: SystemTime::now(),
        };
        assert_eq!(obs.snr_dbm(), 40);
        assert_eq!(obs.band(), Band::Ism);
    }
}
