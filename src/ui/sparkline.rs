//! Per-BSS signal history, rendered as a sparkline of the highlighted
//! network's selected metric (RSSI or Quality).

use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use crate::{datasource::TimeSeries, events::SignalMetric};

/// Scale a time-series snapshot into the `u64` bars `ratatui::Sparkline`
/// expects, shifting a negative-range metric (RSSI) up by its floor so the
/// weakest sample still draws a visible bar rather than clipping to zero.
pub fn bar_data(series: &TimeSeries, metric: SignalMetric) -> Vec<u64> {
    let (floor, _) = metric.range();
    series
        .snapshot()
        .iter()
        .map(|sample| (sample.value - floor).max(0.0).round() as u64)
        .collect()
}

pub fn build<'a>(data: &'a [u64], title: &'a str) -> Sparkline<'a> {
    Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(data)
        .style(Style::default().fg(Color::Cyan))
}
