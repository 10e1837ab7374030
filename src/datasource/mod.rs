//! DataSource: the concurrent in-memory aggregation of observations into
//! per-BSS `Network` records and per-(key, metric) time-series.
//!
//! Grounded on the original `ds/impl.go`'s `table`/`ts` pair of maps, each
//! behind its own lock; here both maps share one `parking_lot::RwLock`
//! each, matching `neli`'s use of `parking_lot` for its `sync` feature.
//! `add` takes both locks only for the duration of one merge, so readers
//! (`networks()`/`time_series()`) never block a writer for longer than a
//! snapshot copy.

pub mod network;
pub mod timeseries;

use std::collections::HashMap;

use parking_lot::RwLock;

pub use network::{BssKey, Network};
pub use timeseries::TimeSeries;

use crate::decode::Observation;

/// The two metrics tracked per BSS. An enum instead of the original's
/// string constants tightens the (BSSKey, metric) map key to a type the
/// compiler can exhaustively match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rssi,
    Quality,
}

pub const DEFAULT_SERIES_CAPACITY: usize = 200;

pub struct DataSource {
    table: RwLock<HashMap<BssKey, Network>>,
    ts: RwLock<HashMap<BssKey, HashMap<Metric, TimeSeries>>>,
    series_capacity: usize,
}

impl DataSource {
    pub fn new() -> Self {
        DataSource::with_series_capacity(DEFAULT_SERIES_CAPACITY)
    }

    pub fn with_series_capacity(series_capacity: usize) -> Self {
        DataSource {
            table: RwLock::new(HashMap::new()),
            ts: RwLock::new(HashMap::new()),
            series_capacity,
        }
    }

    /// A by-value snapshot of every known `Network`; callers may sort freely.
    pub fn networks(&self) -> Vec<Network> {
        self.table.read().values().cloned().collect()
    }

    pub fn network(&self, key: &BssKey) -> Option<Network> {
        self.table.read().get(key).cloned()
    }

    /// Drop every row (and its time-series) last seen more than `max_idle`
    /// ago. A no-op policy knob for the original's unbounded-growth
    /// default: callers only invoke this when `Config::max_idle` is set.
    pub fn evict_older_than(&self, max_idle: std::time::Duration) {
        let now = std::time::SystemTime::now();
        let stale: Vec<BssKey> = self
            .table
            .read()
            .iter()
            .filter_map(|(key, network)| {
                let age = now.duration_since(*network.last_seen()).unwrap_or_default();
                (age > max_idle).then(|| key.clone())
            })
            .collect();
        if stale.is_empty() {
            return;
        }
        let mut table = self.table.write();
        let mut ts = self.ts.write();
        for key in stale {
            table.remove(&key);
            ts.remove(&key);
        }
    }

    /// A snapshot of one key's time-series, immune to in-flight writes.
    /// Missing keys or metrics return an empty series.
    pub fn time_series(&self, key: &BssKey, metric: Metric) -> TimeSeries {
        self.ts
            .read()
            .get(key)
            .and_then(|by_metric| by_metric.get(&metric))
            .cloned()
            .unwrap_or_else(|| TimeSeries::new(self.series_capacity))
    }

    /// Merge one observation: insert a fresh row on first sight of a key,
    /// otherwise overwrite scalar fields (latest-wins) and always append
    /// both the RSSI and Quality samples, matching the original
    /// `addMetric` closure which appends on every add rather than only on
    /// first insert.
    pub fn add(&self, obs: Observation) {
        let key = BssKey::new(obs.bssid, obs.ssid.clone());

        {
            let mut table = self.table.write();
            match table.get_mut(&key) {
                Some(existing) => existing.merge(&obs),
                None => {
                    table.insert(key.clone(), Network::from_observation(&obs));
                }
            }
        }

        let mut ts = self.ts.write();
        let by_metric = ts
            .entry(key)
            .or_insert_with(|| {
                let mut m = HashMap::with_capacity(2);
                m.insert(Metric::Rssi, TimeSeries::new(self.series_capacity));
                m.insert(Metric::Quality, TimeSeries::new(self.series_capacity));
                m
            });
        by_metric
            .get_mut(&Metric::Rssi)
            .expect("Rssi series always initialized above")
            .push(f64::from(obs.rssi_dbm), obs.timestamp);
        by_metric
            .get_mut(&Metric::Quality)
            .expect("Quality series always initialized above")
            .push(f64::from(crate::metrics::quality_from_rssi(obs.rssi_dbm)), obs.timestamp);
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SecondaryChannelOffset, WidthOperation};
    use std::time::SystemTime;

    fn obs(bssid: [u8; 6], ssid: &str, rssi: i8) -> Observation {
        Observation {
            bssid,
            ssid: ssid.to_string(),
            frequency_mhz: 2437,
            rssi_dbm: rssi,
            noise_dbm: -95,
            primary_channel: 6,
            secondary_offset: SecondaryChannelOffset::Sca,
            vht_width_op: WidthOperation::W20Or40,
            seg0_center: 0,
            seg1_center: 0,
            timestamp: SystemTime::now(),
        }
    }

    #[test]
    fn add_then_networks_has_exactly_one_row_per_key() {
        let ds = DataSource::new();
        ds.add(obs([1; 6], "Home", -55));
        ds.add(obs([1; 6], "Home", -60));
        let rows = ds.networks();
        assert_eq!(rows.len(), 1);
        assert_eq!(*rows[0].rssi_dbm(), -60);
    }

    #[test]
    fn each_add_appends_both_series() {
        let ds = DataSource::new();
        let key = BssKey::new([1; 6], "Home");
        ds.add(obs([1; 6], "Home", -55));
        ds.add(obs([1; 6], "Home", -60));
        assert_eq!(ds.time_series(&key, Metric::Rssi).len(), 2);
        assert_eq!(ds.time_series(&key, Metric::Quality).len(), 2);
    }

    #[test]
    fn missing_key_returns_empty_series() {
        let ds = DataSource::new();
        let key = BssKey::new([9; 6], "Nowhere");
        assert!(ds.time_series(&key, Metric::Rssi).is_empty());
    }

    #[test]
    fn evict_older_than_drops_only_stale_rows() {
        let ds = DataSource::new();
        let mut stale = obs([1; 6], "Old", -60);
        stale.timestamp = SystemTime::now() - std::time::Duration::from_secs(120);
        ds.add(stale);
        ds.add(obs([2; 6], "Fresh", -50));

        ds.evict_older_than(std::time::Duration::from_secs(60));

        let rows = ds.networks();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ssid(), "Fresh");
        let stale_key = BssKey::new([1; 6], "Old");
        assert!(ds.time_series(&stale_key, Metric::Rssi).is_empty());
    }
}
