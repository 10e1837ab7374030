//! Spectrum chart: draws each visible network's occupied bandwidth as a
//! rectangle on a channel axis, with the primary 20 MHz sub-band picked
//! out in a brighter fill, bars growing bottom-up from the active signal
//! metric's declared floor.

use ratatui::style::Color;

use crate::{
    datasource::Network,
    events::SignalMetric,
    metrics::geometry::{self, Wave},
    ui::buffer::{Buffer, Style},
};

fn band_color(quality: u8) -> Color {
    match quality {
        0..=29 => Color::Red,
        30..=59 => Color::Yellow,
        _ => Color::Green,
    }
}

/// The value this network contributes for `metric` — the same scalar the
/// table's signal column and the sparkline track for this BSS.
fn metric_value(network: &Network, metric: SignalMetric) -> f64 {
    match metric {
        SignalMetric::Rssi => f64::from(*network.rssi_dbm()),
        SignalMetric::Quality | SignalMetric::Bars => f64::from(*network.quality()),
    }
}

/// Render `networks` into a freshly-allocated `width x height` buffer,
/// scaling each bar against `metric`'s declared `(min, max)` range so the
/// chart tracks whichever signal field is active, not just RSSI.
/// Networks whose band has no assigned axis (UNII-2B, Unknown) are
/// skipped rather than drawn at a fabricated position.
pub fn render(networks: &[Network], width: u16, height: u16, metric: SignalMetric) -> Buffer {
    let mut buf = Buffer::new(width, height);
    let (range_min, range_max) = metric.range();

    for network in networks {
        let Some((x0, x_scale)) = geometry::band_axis(*network.band()) else {
            continue;
        };
        let wave: Wave = geometry::wave(
            *network.primary_channel(),
            *network.channel_width_mhz(),
            *network.secondary_offset(),
            *network.width_op(),
            *network.seg0_center(),
        );
        let occupied = geometry::occupied_rect(wave, x0, x_scale);
        let primary = geometry::primary_rect(wave, x0, x_scale);

        let bar_height = geometry::bottom_up_bar_height(
            metric_value(network, metric),
            range_min,
            range_max,
            i32::from(height),
        );

        let fill = Style { fg: Some(band_color(*network.quality())), bg: None };
        buf.fill_rect(occupied.x, 0, occupied.width_px, bar_height, '\u{2591}', fill);
        buf.fill_rect(primary.x, 0, primary.width_px, bar_height, '\u{2588}', fill);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{consts::{SecondaryChannelOffset, WidthOperation}, decode::Observation};
    use std::time::SystemTime;

    fn network() -> Network {
        Network::from_observation(&Observation {
            bssid: [1; 6],
            ssid: "Home".into(),
            frequency_mhz: 2437,
            rssi_dbm: -55,
            noise_dbm: -95,
            primary_channel: 6,
            secondary_offset: SecondaryChannelOffset::Reserved,
            vht_width_op: WidthOperation::W20Or40,
            seg0_center: 0,
            seg1_center: 0,
            timestamp: SystemTime::now(),
        })
    }

    #[test]
    fn renders_without_panicking_for_ism_network() {
        let buf = render(&[network()], 80, 20, SignalMetric::Rssi);
        assert_eq!(buf.width(), 80);
        assert_eq!(buf.height(), 20);
    }

    #[test]
    fn empty_network_list_yields_blank_buffer() {
        let buf = render(&[], 40, 10, SignalMetric::Rssi);
        assert!(buf.rows().iter().all(|row| row.chars().all(|c| c == ' ')));
    }

    #[test]
    fn quality_metric_scales_bars_by_quality_not_rssi() {
        let rssi_buf = render(&[network()], 80, 20, SignalMetric::Rssi);
        let quality_buf = render(&[network()], 80, 20, SignalMetric::Quality);
        assert_ne!(rssi_buf.rows(), quality_buf.rows());
    }
}
