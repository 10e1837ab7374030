//! Channel Hopper: walks the supported-channel list at a fixed interval.
//!
//! The tick cadence must not drift by per-hop latency, which the original
//! `repeater.Default` achieves by resetting the timer only after the
//! on-timer callback returns. `std::sync::mpsc::Receiver::recv_timeout`
//! gives the same "sleep, then act, then sleep again" shape without
//! needing a resettable timer type.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    },
    thread::JoinHandle,
    time::Duration,
};

use parking_lot::Mutex;

use crate::{
    err::HopError,
    radio::RadioControl,
};

/// `channels` and `idx` guarded together so a diagnostic read always sees
/// a consistent `channels[idx]` pair.
struct HopState {
    channels: Vec<u32>,
    idx: usize,
}

pub struct ChannelHopper {
    state: Arc<Mutex<HopState>>,
    hop_count: Arc<AtomicUsize>,
    cancel_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ChannelHopper {
    /// Load the supported-channel list; fails if it's empty.
    pub fn configure(radio: &dyn RadioControl, iface: &str) -> Result<Self, HopError> {
        let mut channels = radio.supported_channels(iface)?;
        channels.sort_unstable();
        channels.dedup();
        if channels.is_empty() {
            return Err(HopError::NoChannels);
        }
        Ok(ChannelHopper {
            state: Arc::new(Mutex::new(HopState { channels, idx: 0 })),
            hop_count: Arc::new(AtomicUsize::new(0)),
            cancel_tx: None,
            handle: None,
        })
    }

    /// Build from an explicit channel list (the `--channels` override),
    /// bypassing the platform query entirely.
    pub fn from_channels(mut channels: Vec<u32>) -> Result<Self, HopError> {
        channels.sort_unstable();
        channels.dedup();
        if channels.is_empty() {
            return Err(HopError::NoChannels);
        }
        Ok(ChannelHopper {
            state: Arc::new(Mutex::new(HopState { channels, idx: 0 })),
            hop_count: Arc::new(AtomicUsize::new(0)),
            cancel_tx: None,
            handle: None,
        })
    }

    /// Current `(channel, hop_count)` for diagnostics.
    pub fn current(&self) -> (u32, usize) {
        let state = self.state.lock();
        (state.channels[state.idx], self.hop_count.load(Ordering::Relaxed))
    }

    /// Start hopping on a background thread. Each tick advances the
    /// index, then calls `set_channel`; per-hop errors are logged and do
    /// not stop the loop. The timer resets only after `set_channel`
    /// returns, so cadence isn't stretched by a slow call.
    pub fn start(&mut self, radio: Arc<dyn RadioControl>, iface: String, interval: Duration) {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let state = Arc::clone(&self.state);
        let hop_count = Arc::clone(&self.hop_count);

        let handle = std::thread::spawn(move || loop {
            if cancel_rx.recv_timeout(interval).is_ok() {
                return;
            }
            let channel = {
                let mut guard = state.lock();
                guard.idx = (guard.idx + 1) % guard.channels.len();
                guard.channels[guard.idx]
            };
            if let Err(err) = radio.set_channel(&iface, channel) {
                log::warn!("channel hop to {channel} failed: {err}");
            }
            hop_count.fetch_add(1, Ordering::Relaxed);
        });

        self.cancel_tx = Some(cancel_tx);
        self.handle = Some(handle);
    }

    /// Cancel cleanly; blocks until the in-flight hop (if any) completes.
    pub fn stop(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Cancel and wait up to `timeout` for the hop thread to exit. Returns
    /// `false` if the thread is still running when the deadline passes;
    /// the thread is left to finish on its own rather than forced to stop.
    pub fn stop_with_timeout(&mut self, timeout: Duration) -> bool {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        let Some(handle) = self.handle.take() else {
            return true;
        };
        let (done_tx, done_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = handle.join();
            let _ = done_tx.send(());
        });
        done_rx.recv_timeout(timeout).is_ok()
    }
}

impl Drop for ChannelHopper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::AssociatedNetwork;
    use std::sync::Mutex as StdMutex;

    struct FakeRadio {
        calls: StdMutex<Vec<u32>>,
    }

    impl RadioControl for FakeRadio {
        fn default_wifi_interface(&self) -> Result<String, crate::err::RadioError> {
            Ok("en0".into())
        }
        fn associated_network(&self, _iface: &str) -> Result<AssociatedNetwork, crate::err::RadioError> {
            Ok(AssociatedNetwork::default())
        }
        fn supported_channels(&self, _iface: &str) -> Result<Vec<u32>, crate::err::RadioError> {
            Ok(vec![1, 6, 11])
        }
        fn disassociate(&self, _iface: &str) -> Result<(), crate::err::RadioError> {
            Ok(())
        }
        fn set_channel(&self, _iface: &str, channel: u32) -> Result<(), crate::err::RadioError> {
            self.calls.lock().unwrap().push(channel);
            Ok(())
        }
    }

    #[test]
    fn configure_fails_on_empty_channel_list() {
        struct Empty;
        impl RadioControl for Empty {
            fn default_wifi_interface(&self) -> Result<String, crate::err::RadioError> {
                Ok("en0".into())
            }
            fn associated_network(&self, _iface: &str) -> Result<AssociatedNetwork, crate::err::RadioError> {
                Ok(AssociatedNetwork::default())
            }
            fn supported_channels(&self, _iface: &str) -> Result<Vec<u32>, crate::err::RadioError> {
                Ok(vec![])
            }
            fn disassociate(&self, _iface: &str) -> Result<(), crate::err::RadioError> {
                Ok(())
            }
            fn set_channel(&self, _iface: &str, _channel: u32) -> Result<(), crate::err::RadioError> {
                Ok(())
            }
        }
        assert!(matches!(ChannelHopper::configure(&Empty, "en0"), Err(HopError::NoChannels)));
    }

    #[test]
    fn stop_with_timeout_returns_true_when_thread_exits_in_time() {
        let radio = Arc::new(FakeRadio { calls: StdMutex::new(Vec::new()) });
        let mut hopper = ChannelHopper::configure(radio.as_ref(), "en0").unwrap();
        hopper.start(Arc::clone(&radio) as Arc<dyn RadioControl>, "en0".into(), Duration::from_millis(30));
        assert!(hopper.stop_with_timeout(Duration::from_secs(5)));
    }

    #[test]
    fn hop_cycle_visits_channels_in_order() {
        let radio = Arc::new(FakeRadio { calls: StdMutex::new(Vec::new()) });
        let mut hopper = ChannelHopper::configure(radio.as_ref(), "en0").unwrap();
        hopper.start(Arc::clone(&radio) as Arc<dyn RadioControl>, "en0".into(), Duration::from_millis(30));
        std::thread::sleep(Duration::from_millis(110));
        hopper.stop();
        let calls = radio.calls.lock().unwrap().clone();
        assert_eq!(&calls[..3], &[6, 11, 1]);
    }
}
