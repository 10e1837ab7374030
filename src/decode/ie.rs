//! Tagged information element traversal.
//!
//! 802.11 IEs are tag/length/value triples, walked the same way `neli`
//! walks netlink attributes in `attr.rs`: an iterator over borrowed
//! records, one accessor per tag of interest, with length checks that
//! degrade a single malformed IE to `None` rather than aborting the walk.

use crate::consts::{IeTag, SecondaryChannelOffset, WidthOperation};

/// One information element: tag, and its content bytes (length already
/// consumed).
pub struct InfoElement<'a> {
    pub tag: u8,
    pub contents: &'a [u8],
}

/// Borrowed iterator over a tagged-IE byte region.
pub struct InfoElements<'a> {
    remaining: &'a [u8],
}

impl<'a> InfoElements<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        InfoElements { remaining: body }
    }
}

impl<'a> Iterator for InfoElements<'a> {
    type Item = InfoElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.len() < 2 {
            return None;
        }
        let tag = self.remaining[0];
        let len = self.remaining[1] as usize;
        if self.remaining.len() < 2 + len {
            return None;
        }
        let contents = &self.remaining[2..2 + len];
        self.remaining = &self.remaining[2 + len..];
        Some(InfoElement { tag, contents })
    }
}

pub fn find<'a>(ies: &'a [u8], tag: IeTag) -> Option<InfoElement<'a>> {
    InfoElements::new(ies).find(|ie| ie.tag == tag as u8)
}

/// Decoded fields from the HT Operation IE (tag 61).
pub struct HtOperation {
    pub primary_channel: u8,
    pub secondary_offset: SecondaryChannelOffset,
}

pub fn ht_operation(ies: &[u8]) -> Option<HtOperation> {
    let ie = find(ies, IeTag::HtOperation)?;
    if ie.contents.len() < 4 {
        return None;
    }
    Some(HtOperation {
        primary_channel: ie.contents[2],
        secondary_offset: SecondaryChannelOffset::from(ie.contents[3]),
    })
}

/// Decoded fields from the VHT Operation IE (tag 192).
pub struct VhtOperation {
    pub width_op: WidthOperation,
    pub seg0_center: u8,
    pub seg1_center: u8,
}

pub fn vht_operation(ies: &[u8]) -> Option<VhtOperation> {
    let ie = find(ies, IeTag::VhtOperation)?;
    if ie.contents.len() < 5 {
        return None;
    }
    Some(VhtOperation {
        width_op: WidthOperation::from(ie.contents[2]),
        seg0_center: ie.contents[3],
        seg1_center: ie.contents[4],
    })
}

/// DS Parameter Set IE (tag 3): fallback primary channel when HT is absent.
pub fn ds_channel(ies: &[u8]) -> Option<u8> {
    let ie = find(ies, IeTag::DsParameterSet)?;
    ie.contents.first().copied()
}

/// SSID IE (tag 0) body, with control characters replaced by `?`.
pub fn ssid(ies: &[u8]) -> Option<String> {
    let ie = find(ies, IeTag::Ssid)?;
    if ie.contents.is_empty() {
        return None;
    }
    Some(sanitize(ie.contents))
}

/// Sanitize raw SSID bytes: decode lossily as UTF-8, then swap any control
/// character for `?`.
pub fn sanitize(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ht_operation_reads_primary_and_offset() {
        let ies = [61u8, 4, 0, 0, 6, 0b01];
        let ht = ht_operation(&ies).unwrap();
        assert_eq!(ht.primary_channel, 6);
        assert_eq!(ht.secondary_offset, SecondaryChannelOffset::Sca);
    }

    #[test]
    fn vht_operation_reports_80_plus_80_as_160() {
        let ies = [192u8, 5, 0, 3, 42, 106, 0];
        let vht = vht_operation(&ies).unwrap();
        assert_eq!(vht.width_op.width_mhz(), 160);
        assert_eq!(vht.seg0_center, 42);
        assert_eq!(vht.seg1_center, 106);
    }

    #[test]
    fn truncated_ie_yields_none_not_panic() {
        let ies = [61u8, 2, 0, 0];
        assert!(ht_operation(&ies).is_none());
    }

    #[test]
    fn ssid_sanitizes_control_characters() {
        let bytes = [0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x0A, 0x77, 0x6F, 0x72, 0x6C, 0x64];
        let mut ies = vec![0u8, bytes.len() as u8];
        ies.extend_from_slice(&bytes);
        assert_eq!(ssid(&ies).unwrap(), "Hello?world");
    }

    #[test]
    fn ds_channel_is_first_content_byte() {
        let ies = [3u8, 1, 6];
        assert_eq!(ds_channel(&ies), Some(6));
    }
}
