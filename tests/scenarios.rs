//! The six literal end-to-end scenarios, run through the real
//! decode -> metrics -> datasource pipeline rather than just the
//! per-module unit tests.

use std::time::{Duration, SystemTime};

use wfmon::{
    consts::{Band, SecondaryChannelOffset, WidthOperation},
    datasource::{DataSource, Metric},
    decode::{ie, Observation},
    metrics,
};

fn observation(
    bssid: [u8; 6],
    ssid: &str,
    rssi: i8,
    noise: i8,
    primary_channel: u32,
    secondary_offset: SecondaryChannelOffset,
    vht_width_op: WidthOperation,
    seg0_center: u32,
    seg1_center: u32,
) -> Observation {
    Observation {
        bssid,
        ssid: ssid.to_string(),
        frequency_mhz: 0,
        rssi_dbm: rssi,
        noise_dbm: noise,
        primary_channel,
        secondary_offset,
        vht_width_op,
        seg0_center,
        seg1_center,
        timestamp: SystemTime::now(),
    }
}

#[test]
fn scenario_1_ism_beacon() {
    let bssid = [0xC4, 0x3D, 0xC7, 0x11, 0x22, 0x33];
    let obs = observation(
        bssid,
        "Home",
        -55,
        -95,
        6,
        SecondaryChannelOffset::Sca,
        WidthOperation::W20Or40,
        0,
        0,
    );
    assert_eq!(obs.band(), Band::Ism);
    assert_eq!(obs.snr_dbm(), 40);

    let data = DataSource::new();
    data.add(obs);
    let key = wfmon::datasource::BssKey::new(bssid, "Home");
    let network = data.network(&key).expect("row inserted");

    assert_eq!(*network.channel_width_mhz(), 40);
    assert_eq!(*network.vendor_short(), "Netgear");
    assert_eq!(data.time_series(&key, Metric::Rssi).len(), 1);
    assert_eq!(data.time_series(&key, Metric::Quality).len(), 1);
}

#[test]
fn scenario_2_unii_vht80() {
    let obs = observation(
        [1; 6],
        "Lab",
        -70,
        -95,
        48,
        SecondaryChannelOffset::Sca,
        WidthOperation::W80,
        42,
        0,
    );
    assert_eq!(obs.band(), Band::Unii1);
    assert_eq!(obs.snr_dbm(), 25);

    let width = metrics::channel_width_mhz(obs.band(), obs.secondary_offset, obs.vht_width_op);
    assert_eq!(width, 80);

    let wave = metrics::geometry::wave(
        obs.primary_channel,
        width,
        obs.secondary_offset,
        obs.vht_width_op,
        obs.seg0_center,
    );
    assert_eq!(wave.lower_channel, 36);
}

#[test]
fn scenario_3_unii_vht160() {
    let obs = observation(
        [2; 6],
        "Lab2",
        -65,
        -95,
        100,
        SecondaryChannelOffset::Scb,
        WidthOperation::W160,
        114,
        0,
    );
    let width = metrics::channel_width_mhz(obs.band(), obs.secondary_offset, obs.vht_width_op);
    assert_eq!(width, 160);

    let wave = metrics::geometry::wave(
        obs.primary_channel,
        width,
        obs.secondary_offset,
        obs.vht_width_op,
        obs.seg0_center,
    );
    assert_eq!(wave.lower_channel, 100);
}

#[test]
fn scenario_4_ssid_sanitization() {
    let raw = [0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x0A, 0x77, 0x6F, 0x72, 0x6C, 0x64];
    assert_eq!(ie::sanitize(&raw), "Hello?world");
}

#[test]
fn scenario_5_ring_eviction() {
    let mut ts = wfmon::datasource::TimeSeries::new(3);
    for v in 1..=5 {
        ts.push(v as f64, SystemTime::now());
    }
    let values: Vec<f64> = ts.snapshot().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![3.0, 4.0, 5.0]);
}

#[test]
fn scenario_6_hop_cycle() {
    use std::sync::{atomic::Ordering, Arc, Mutex};
    use wfmon::{
        err::RadioError,
        hopper::ChannelHopper,
        radio::{AssociatedNetwork, RadioControl},
    };

    struct FakeRadio {
        calls: Mutex<Vec<u32>>,
    }

    impl RadioControl for FakeRadio {
        fn default_wifi_interface(&self) -> Result<String, RadioError> {
            Ok("en0".into())
        }
        fn associated_network(&self, _iface: &str) -> Result<AssociatedNetwork, RadioError> {
            Ok(AssociatedNetwork::default())
        }
        fn supported_channels(&self, _iface: &str) -> Result<Vec<u32>, RadioError> {
            Ok(vec![1, 6, 11])
        }
        fn disassociate(&self, _iface: &str) -> Result<(), RadioError> {
            Ok(())
        }
        fn set_channel(&self, _iface: &str, channel: u32) -> Result<(), RadioError> {
            self.calls.lock().unwrap().push(channel);
            Ok(())
        }
    }

    let radio = Arc::new(FakeRadio { calls: Mutex::new(Vec::new()) });
    let mut hopper = ChannelHopper::configure(radio.as_ref(), "en0").unwrap();
    hopper.start(Arc::clone(&radio) as Arc<dyn RadioControl>, "en0".into(), Duration::from_millis(100));
    std::thread::sleep(Duration::from_millis(450));
    hopper.stop();

    let calls = radio.calls.lock().unwrap().clone();
    assert!(calls.len() >= 4, "expected at least 4 hops, got {calls:?}");
    assert_eq!(&calls[..4], &[6, 11, 1, 6]);
    let _ = Ordering::Relaxed;
}
