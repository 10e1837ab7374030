//! Spectrum chart wave geometry: per-band axis parameters and the
//! lower-channel/rectangle math used to lay a BSS's occupied bandwidth
//! onto a fixed channel axis.

use crate::consts::{Band, SecondaryChannelOffset, WidthOperation};

/// Per-band x-origin and columns-per-channel-step, the lookup table the
/// spectrum widget keys its horizontal axis off of. UNII-2B has no
/// assigned range (see `Band::from_channel`) and so has no axis entry.
pub fn band_axis(band: Band) -> Option<(i32, i32)> {
    match band {
        Band::Ism => Some((4, 4)),
        Band::Unii1 => Some((-99, 3)),
        Band::Unii2A => Some((-141, 3)),
        Band::Unii2C => Some((-88, 1)),
        Band::Unii3 => Some((-137, 1)),
        Band::Unii2B | Band::Unknown => None,
    }
}

/// A BSS's wave: width in 20 MHz channel units, bonding sign, and the
/// lower edge channel used to anchor the rectangle(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wave {
    pub primary_channel: i32,
    pub width_channels: i32,
    pub lower_channel: i32,
}

/// Compute the wave for one observation's geometry inputs. `seg0_center`
/// is in absolute channel units (0 when VHT is absent).
pub fn wave(
    primary_channel: u32,
    channel_width_mhz: u32,
    secondary_offset: SecondaryChannelOffset,
    vht_width_op: WidthOperation,
    seg0_center: u32,
) -> Wave {
    let primary = primary_channel as i32;
    let width_channels = (channel_width_mhz / 20).max(1) as i32;
    let has_vht_center = seg0_center != 0
        && matches!(
            vht_width_op,
            WidthOperation::W80 | WidthOperation::W160 | WidthOperation::W80Plus80
        );

    let lower_channel = if !has_vht_center {
        let sign = secondary_offset.sign();
        std::cmp::min(primary, primary + sign * 4 * (width_channels - 1))
    } else if matches!(vht_width_op, WidthOperation::W160) {
        std::cmp::min(primary, seg0_center as i32 - 14)
    } else {
        std::cmp::min(primary, seg0_center as i32 - 6)
    };

    Wave {
        primary_channel: primary,
        width_channels,
        lower_channel,
    }
}

/// Map a wave onto pixel/column coordinates given the band's axis params.
pub struct Rect {
    pub x: i32,
    pub width_px: i32,
}

/// The primary 20 MHz sub-band rectangle.
pub fn primary_rect(wave: Wave, x0: i32, x_scale: i32) -> Rect {
    Rect {
        x: x0 + wave.primary_channel * x_scale,
        width_px: x_scale,
    }
}

/// The full occupied-bandwidth rectangle.
pub fn occupied_rect(wave: Wave, x0: i32, x_scale: i32) -> Rect {
    Rect {
        x: x0 + wave.lower_channel * x_scale,
        width_px: wave.width_channels * x_scale,
    }
}

/// Bar height for a value within `(range_min, range_max)`: the bar
/// grows upward from the bottom of a `viewport_height`-tall column,
/// generalizing the spectrum chart to whichever metric (RSSI, Quality,
/// Bars) the caller has selected rather than assuming RSSI's range.
pub fn bottom_up_bar_height(
    value: f64,
    range_min: f64,
    range_max: f64,
    viewport_height: i32,
) -> i32 {
    let span = range_max - range_min;
    if span == 0.0 {
        return 0;
    }
    let fraction = ((value - range_min) / span).clamp(0.0, 1.0);
    (fraction * viewport_height as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unii_vht80_lower_channel_is_36() {
        // scenario 2: primary=48 offset=SCA vht{width_op=1,seg0=42}
        let w = wave(48, 80, SecondaryChannelOffset::Sca, WidthOperation::W80, 42);
        assert_eq!(w.lower_channel, 36);
    }

    #[test]
    fn unii_vht160_lower_channel_is_100() {
        // scenario 3: primary=100 offset=SCB vht{width_op=2,seg0=114}
        let w = wave(100, 160, SecondaryChannelOffset::Scb, WidthOperation::W160, 114);
        assert_eq!(w.lower_channel, 100);
    }

    #[test]
    fn ht_only_bonding_uses_sign() {
        let w = wave(6, 40, SecondaryChannelOffset::Sca, WidthOperation::W20Or40, 0);
        assert_eq!(w.width_channels, 2);
        assert_eq!(w.lower_channel, 6);

        let w = wave(11, 40, SecondaryChannelOffset::Scb, WidthOperation::W20Or40, 0);
        assert_eq!(w.lower_channel, 7);
    }

    #[test]
    fn ism_band_axis_matches_table() {
        assert_eq!(band_axis(Band::Ism), Some((4, 4)));
        assert_eq!(band_axis(Band::Unii2C), Some((-88, 1)));
    }
}
