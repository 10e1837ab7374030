//! Derived signal metrics: quality, bars, and channel width.

pub mod geometry;

use crate::consts::{Band, SecondaryChannelOffset, WidthOperation};

/// Quadratic RSSI-to-quality model, citing the same constants as the
/// Linux `ipw2200` driver's signal quality heuristic: `P` is "perfect"
/// RSSI, `W` is "worst".
const PERFECT_RSSI: i64 = -20;
const WORST_RSSI: i64 = -85;

/// `Quality` in `0..=100` from RSSI in dBm. This is the model actually
/// stored on a `Network` record. The division is integer, truncating
/// toward zero like Go's `int` arithmetic in `quadRSSI` — not rounded.
pub fn quality_from_rssi(rssi_dbm: i8) -> u8 {
    let r = i64::from(rssi_dbm);
    let span = PERFECT_RSSI - WORST_RSSI;
    let diff = PERFECT_RSSI - r;
    let numerator = 100 * span * span - diff * (15 * span + 62 * diff);
    let quality = numerator / (span * span);
    quality.clamp(0, 100) as u8
}

/// Linear SNR-to-quality model. Retained for tests only per the spec's
/// source-conflict note: the quadratic RSSI model is the one actually
/// stored on a `Network` record.
#[cfg(test)]
pub fn quality_from_snr_linear(snr_dbm: i32) -> u8 {
    if snr_dbm <= 0 {
        0
    } else if snr_dbm < 40 {
        ((5 * snr_dbm) / 2) as u8
    } else {
        100
    }
}

/// Bars is a display-only projection of `Quality` with no independent
/// identity of its own.
pub fn bars(quality: u8) -> &'static str {
    match quality {
        80..=100 => "\u{2582}\u{2584}\u{2586}\u{2588}",
        60..=79 => "\u{2582}\u{2584}\u{2586}\u{2581}",
        40..=59 => "\u{2582}\u{2584}\u{2581}\u{2581}",
        20..=39 => "\u{2582}\u{2581}\u{2581}\u{2581}",
        _ => "\u{2581}\u{2581}\u{2581}\u{2581}",
    }
}

/// Channel width in MHz from the fields an `Observation` carries.
pub fn channel_width_mhz(
    band: Band,
    secondary_offset: SecondaryChannelOffset,
    vht_width_op: WidthOperation,
) -> u32 {
    match band {
        Band::Ism => {
            if secondary_offset.is_bonded() {
                40
            } else {
                20
            }
        }
        _ => match vht_width_op {
            WidthOperation::W20Or40 => {
                if secondary_offset.is_bonded() {
                    40
                } else {
                    20
                }
            }
            other => other.width_mhz(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_is_always_in_bounds() {
        for rssi in -100i32..=0 {
            let q = quality_from_rssi(rssi as i8);
            assert!((0..=100).contains(&q));
        }
    }

    #[test]
    fn ism_beacon_quality_from_quadratic_model() {
        // scenario 1: rssi=-55, noise=-95 -> SNR=40. The quadratic model is a
        // pure function of RSSI (not SNR), so this does not itself saturate;
        // see the quadratic formula in the module docs for the derivation.
        // 312425 / 4225 truncates to 73, not 74.
        assert_eq!(quality_from_rssi(-55), 73);
    }

    #[test]
    fn unii_vht80_quality_from_quadratic_model() {
        // scenario 2: rssi=-70; 218750 / 4225 truncates to 51, not 52.
        assert_eq!(quality_from_rssi(-70), 51);
    }

    #[test]
    fn linear_model_boundaries() {
        assert_eq!(quality_from_snr_linear(0), 0);
        assert_eq!(quality_from_snr_linear(-5), 0);
        assert_eq!(quality_from_snr_linear(40), 100);
        assert_eq!(quality_from_snr_linear(10), 25);
    }

    #[test]
    fn ism_bonded_is_40_mhz() {
        assert_eq!(
            channel_width_mhz(Band::Ism, SecondaryChannelOffset::Sca, WidthOperation::W20Or40),
            40
        );
    }

    #[test]
    fn vht_width_op_three_is_160() {
        assert_eq!(
            channel_width_mhz(Band::Unii2C, SecondaryChannelOffset::Scn, WidthOperation::W80Plus80),
            160
        );
    }
}
