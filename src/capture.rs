//! Capture Loop (Monitor): owns the capture handle, decodes records, and
//! emits `Observation`s on a bounded channel.

use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    time::Duration,
};

use derive_builder::Builder;
use pcap::{Active, Capture, Offline};

use crate::{decode, decode::Observation, err::CaptureError};

/// Capture handle open options. Defaults match the spec: monitor mode,
/// 65536 snaplen, 2 MiB buffer, promiscuous, 500 ms read timeout.
#[derive(Builder, Debug, Clone, Copy)]
#[builder(pattern = "owned")]
pub struct CaptureOptions {
    #[builder(default = "true")]
    pub monitor: bool,
    #[builder(default = "65536")]
    pub snaplen: i32,
    #[builder(default = "2_097_152")]
    pub bufsize: i32,
    #[builder(default = "true")]
    pub promiscuous: bool,
    #[builder(default = "500")]
    pub timeout_ms: i32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptionsBuilder::default().build().expect("all fields defaulted")
    }
}

/// Default bound on the `Observation` output channel: a full channel
/// applies backpressure to the NIC reader rather than silently dropping.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

pub struct Monitor {
    cancel: Arc<AtomicBool>,
    decode_errors: Arc<std::sync::atomic::AtomicU64>,
}

impl Monitor {
    /// Open a live device in monitor mode per `options` and disassociate
    /// must already have succeeded before this is called (spec §4.4).
    pub fn open_live(iface: &str, options: CaptureOptions) -> Result<Capture<Active>, CaptureError> {
        let inactive = Capture::from_device(iface).map_err(CaptureError::from)?;
        let inactive = inactive
            .rfmon(options.monitor)
            .snaplen(options.snaplen)
            .buffer_size(options.bufsize)
            .promisc(options.promiscuous)
            .timeout(options.timeout_ms);
        inactive.open().map_err(CaptureError::from)
    }

    /// Open a saved capture file for replay testing; same decode path as
    /// a live device.
    pub fn open_file(path: &Path) -> Result<Capture<Offline>, CaptureError> {
        Capture::from_file(path).map_err(CaptureError::from)
    }

    /// Run the read loop against a live device, pushing decoded
    /// observations to `tx`. Returns once cancelled or the source closes.
    pub fn run_live(
        &self,
        mut capture: Capture<Active>,
        tx: mpsc::SyncSender<Observation>,
    ) -> Result<(), CaptureError> {
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Ok(());
            }
            match capture.next_packet() {
                Ok(packet) => self.handle_record(packet.data, &tx),
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(pcap::Error::NoMorePackets) => return Err(CaptureError::from(pcap::Error::NoMorePackets)),
                Err(err) => return Err(CaptureError::from(err)),
            }
        }
    }

    /// Run the read loop against a saved file; end-of-stream waits for
    /// cancellation instead of erroring, since a finite replay file
    /// legitimately runs out of records.
    pub fn run_file(
        &self,
        mut capture: Capture<Offline>,
        tx: mpsc::SyncSender<Observation>,
    ) -> Result<(), CaptureError> {
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Ok(());
            }
            match capture.next_packet() {
                Ok(packet) => self.handle_record(packet.data, &tx),
                Err(pcap::Error::NoMorePackets) => {
                    while !self.cancel.load(Ordering::Relaxed) {
                        std::thread::sleep(Duration::from_millis(50));
                    }
                    return Ok(());
                }
                Err(err) => return Err(CaptureError::from(err)),
            }
        }
    }

    fn handle_record(&self, record: &[u8], tx: &mpsc::SyncSender<Observation>) {
        match decode::decode(record) {
            Ok(Some(obs)) => {
                // A full channel blocks here: backpressure onto the NIC
                // reader, per spec §4.4, rather than a silent drop.
                let _ = tx.send(obs);
            }
            Ok(None) => {}
            Err(err) => {
                log::debug!("dropping malformed capture record: {err}");
                self.decode_errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn decode_error_count(&self) -> u64 {
        self.decode_errors.load(Ordering::Relaxed)
    }

    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Monitor {
            cancel: Arc::new(AtomicBool::new(false)),
            decode_errors: Arc::new(std::sync::atomic::AtomicU64::new(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_spec() {
        let options = CaptureOptions::default();
        assert!(options.monitor);
        assert_eq!(options.snaplen, 65536);
        assert_eq!(options.bufsize, 2_097_152);
        assert!(options.promiscuous);
        assert_eq!(options.timeout_ms, 500);
    }
}
