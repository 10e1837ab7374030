//! `Network`: the aggregated, latest-wins view of one BSS.

use std::{cmp::Ordering, fmt, time::SystemTime};

use getset::Getters;

use crate::{
    consts::{Band, SecondaryChannelOffset, WidthOperation},
    decode::Observation,
    metrics,
};

/// (BSSID, SSID) identity. BSSID alone is insufficient since a station may
/// advertise both a hidden and a broadcast SSID for the same BSSID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BssKey {
    pub bssid: [u8; 6],
    pub ssid: String,
}

impl BssKey {
    pub fn new(bssid: [u8; 6], ssid: impl Into<String>) -> Self {
        BssKey { bssid, ssid: ssid.into() }
    }
}

impl fmt::Display for BssKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x} ({})",
            self.bssid[0], self.bssid[1], self.bssid[2], self.bssid[3], self.bssid[4], self.bssid[5], self.ssid
        )
    }
}

impl PartialOrd for BssKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Empty SSID sorts after non-empty; within a class, SSID then BSSID.
impl Ord for BssKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_empty = self.ssid.is_empty();
        let other_empty = other.ssid.is_empty();
        self_empty
            .cmp(&other_empty)
            .then_with(|| self.ssid.cmp(&other.ssid))
            .then_with(|| self.bssid.cmp(&other.bssid))
    }
}

/// Aggregated, latest-observation view of one BSS.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Network {
    bssid: [u8; 6],
    vendor_short: &'static str,
    vendor_long: &'static str,
    ssid: String,
    primary_channel: u32,
    secondary_offset: SecondaryChannelOffset,
    seg0_center: u32,
    seg1_center: u32,
    width_op: WidthOperation,
    channel_width_mhz: u32,
    band: Band,
    rssi_dbm: i8,
    quality: u8,
    noise_dbm: i8,
    snr_dbm: i32,
    last_seen: SystemTime,
}

impl Network {
    pub fn from_observation(obs: &Observation) -> Self {
        let band = obs.band();
        let channel_width_mhz =
            metrics::channel_width_mhz(band, obs.secondary_offset, obs.vht_width_op);
        let (vendor_short, vendor_long) = crate::oui::lookup(obs.bssid);
        Network {
            bssid: obs.bssid,
            vendor_short,
            vendor_long,
            ssid: obs.ssid.clone(),
            primary_channel: obs.primary_channel,
            secondary_offset: obs.secondary_offset,
            seg0_center: obs.seg0_center,
            seg1_center: obs.seg1_center,
            width_op: obs.vht_width_op,
            channel_width_mhz,
            band,
            rssi_dbm: obs.rssi_dbm,
            quality: metrics::quality_from_rssi(obs.rssi_dbm),
            noise_dbm: obs.noise_dbm,
            snr_dbm: obs.snr_dbm(),
            last_seen: obs.timestamp,
        }
    }

    /// Overwrite scalar fields with a newer observation's values
    /// (latest-wins), per the DataSource merge contract.
    pub fn merge(&mut self, obs: &Observation) {
        *self = Network::from_observation(obs);
    }

    pub fn key(&self) -> BssKey {
        BssKey::new(self.bssid, self.ssid.clone())
    }

    pub fn bars(&self) -> &'static str {
        metrics::bars(self.quality)
    }
}
