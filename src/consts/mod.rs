//! Small fixed enumerations used by the decoder and metrics modules.
//!
//! # Design decisions
//! Each enum keeps an `Other(u8)`/`Unknown` fallback variant instead of
//! failing to parse, the same tolerant-enum shape `neli::consts` uses for
//! values that come off the wire and may carry a value this crate doesn't
//! have a name for yet.

mod band;
mod ie;

pub use band::Band;
pub use ie::{IeTag, SecondaryChannelOffset, WidthOperation};

/// 802.11 frame type (2 bits of the frame control field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Management,
    Control,
    Data,
    Extension,
}

impl From<u8> for FrameType {
    fn from(bits: u8) -> Self {
        match bits & 0b11 {
            0 => FrameType::Management,
            1 => FrameType::Control,
            2 => FrameType::Data,
            _ => FrameType::Extension,
        }
    }
}

/// Management frame subtypes this crate cares about (beacon and probe
/// response both carry the IEs we need; everything else is ignored by the
/// decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementSubtype {
    AssociationRequest,
    AssociationResponse,
    ReassociationResponse,
    ProbeRequest,
    ProbeResponse,
    Beacon,
    Other(u8),
}

impl ManagementSubtype {
    /// Frames the Frame Decoder produces an `Observation` for.
    pub fn is_recognized(self) -> bool {
        matches!(
            self,
            ManagementSubtype::Beacon
                | ManagementSubtype::ProbeResponse
                | ManagementSubtype::AssociationResponse
                | ManagementSubtype::ReassociationResponse
        )
    }
}

impl From<u8> for ManagementSubtype {
    fn from(bits: u8) -> Self {
        match bits & 0b1111 {
            0x0 => ManagementSubtype::AssociationRequest,
            0x1 => ManagementSubtype::AssociationResponse,
            0x3 => ManagementSubtype::ReassociationResponse,
            0x4 => ManagementSubtype::ProbeRequest,
            0x5 => ManagementSubtype::ProbeResponse,
            0x8 => ManagementSubtype::Beacon,
            other => ManagementSubtype::Other(other),
        }
    }
}
