//! 802.11 MAC header parsing: frame control bits and BSSID derivation.

use bitflags::bitflags;

use crate::consts::{FrameType, ManagementSubtype};

bitflags! {
    /// The ToDS/FromDS pair out of the frame control field, and the bits
    /// this crate needs to recognize a management frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameControlFlags: u8 {
        const TO_DS = 0b0000_0001;
        const FROM_DS = 0b0000_0010;
    }
}

pub struct MacHeader<'a> {
    pub frame_type: FrameType,
    pub subtype: ManagementSubtype,
    pub flags: FrameControlFlags,
    /// Address1 (receiver), Address2 (transmitter), Address3, and an
    /// optional Address4 present only when ToDS && FromDS.
    pub addr1: [u8; 6],
    pub addr2: [u8; 6],
    pub addr3: [u8; 6],
    /// Body following the fixed 24-byte header (or 30 with Address4).
    pub body: &'a [u8],
}

/// Parse the fixed MAC header. Returns `None` if the frame is too short or
/// not a management frame (the decoder only cares about management frames).
pub fn parse(frame: &[u8]) -> Option<MacHeader<'_>> {
    if frame.len() < 24 {
        return None;
    }
    let frame_control = frame[0];
    let frame_type = FrameType::from(frame_control >> 2);
    if frame_type != FrameType::Management {
        return None;
    }
    let subtype = ManagementSubtype::from(frame_control >> 4);
    let flags_byte = frame[1];
    let flags = FrameControlFlags::from_bits_truncate(flags_byte & 0b11);

    let addr1: [u8; 6] = frame[4..10].try_into().ok()?;
    let addr2: [u8; 6] = frame[10..16].try_into().ok()?;
    let addr3: [u8; 6] = frame[16..22].try_into().ok()?;

    let (header_len, body) = if flags.contains(FrameControlFlags::TO_DS | FrameControlFlags::FROM_DS) {
        if frame.len() < 30 {
            return None;
        }
        (30, &frame[30..])
    } else {
        (24, &frame[24..])
    };
    let _ = header_len;

    Some(MacHeader {
        frame_type,
        subtype,
        flags,
        addr1,
        addr2,
        addr3,
        body,
    })
}

impl MacHeader<'_> {
    /// BSSID per the four ToDS/FromDS cases. `None` for the ToDS&&FromDS
    /// case (WDS), where BSSID is not well-defined.
    pub fn bssid(&self) -> Option<[u8; 6]> {
        let to_ds = self.flags.contains(FrameControlFlags::TO_DS);
        let from_ds = self.flags.contains(FrameControlFlags::FROM_DS);
        match (to_ds, from_ds) {
            (false, false) => Some(self.addr3),
            (false, true) => Some(self.addr1),
            (true, false) => Some(self.addr1),
            (true, true) => None,
        }
    }
}
