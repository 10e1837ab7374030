//! Platform radio control: channel enumeration, disassociation, channel
//! set, and a read of the currently-associated network.
//!
//! Grounded on the original's `ds.Provider`-style interface plus a
//! `RadioError::Unsupported` stub for unsupported platforms, per spec §9
//! "Platform fallback": the rest of the system must build and run with no
//! working provider, failing only in `configure`, never mid-capture.

#[cfg(target_os = "macos")]
mod macos;
mod unsupported;

use crate::err::RadioError;

/// The AP a NIC is joined to before monitor mode is engaged. A missing
/// BSSID (e.g. location permission denied on macOS) is represented as
/// `None` and is a non-fatal condition for callers.
#[derive(Debug, Clone, Default)]
pub struct AssociatedNetwork {
    pub bssid: Option<[u8; 6]>,
    pub ssid: Option<String>,
    pub channel: Option<u32>,
}

pub trait RadioControl: Send + Sync {
    fn default_wifi_interface(&self) -> Result<String, RadioError>;
    fn associated_network(&self, iface: &str) -> Result<AssociatedNetwork, RadioError>;
    fn supported_channels(&self, iface: &str) -> Result<Vec<u32>, RadioError>;
    fn disassociate(&self, iface: &str) -> Result<(), RadioError>;
    fn set_channel(&self, iface: &str, channel: u32) -> Result<(), RadioError>;
}

/// Construct the platform's `RadioControl`. macOS binds to the real
/// implementation; every other target gets `Unsupported` on every call so
/// the rest of the system degrades gracefully rather than failing to
/// build.
pub fn default() -> Box<dyn RadioControl> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacOsRadioControl::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(unsupported::UnsupportedRadioControl)
    }
}
