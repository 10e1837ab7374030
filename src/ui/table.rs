//! The network table widget: one row per `Network`, sorted by the active
//! `Column`/`SortDirection`.

use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Cell, Row, Table},
};

use crate::{
    datasource::Network,
    events::{Column, SortDirection, SortState},
};

pub const COLUMNS: &[(Column, &str)] = &[
    (Column::Bssid, "BSSID"),
    (Column::Manufacturer, "Manufacturer"),
    (Column::Ssid, "SSID"),
    (Column::Channel, "Ch"),
    (Column::Width, "Width"),
    (Column::Band, "Band"),
    (Column::Rssi, "RSSI"),
    (Column::Quality, "Quality"),
    (Column::Bars, ""),
    (Column::Noise, "Noise"),
    (Column::Snr, "SNR"),
];

/// Sort `rows` in place per `sort`; `Unsorted` leaves discovery order.
pub fn sort_rows(rows: &mut [Network], sort: &SortState) {
    if sort.direction == SortDirection::Unsorted {
        return;
    }
    rows.sort_by(|a, b| {
        let ordering = sort.column.compare(a, b);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
            SortDirection::Unsorted => ordering,
        }
    });
}

fn header_label(column: Column, label: &str, sort: &SortState) -> String {
    if sort.column == column && sort.direction != SortDirection::Unsorted {
        let arrow = match sort.direction {
            SortDirection::Ascending => "\u{25b2}",
            SortDirection::Descending => "\u{25bc}",
            SortDirection::Unsorted => "",
        };
        format!("{label} {arrow}")
    } else {
        label.to_string()
    }
}

fn cell_text(column: Column, row: &Network) -> String {
    match column {
        Column::Bssid => format!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            row.bssid()[0], row.bssid()[1], row.bssid()[2], row.bssid()[3], row.bssid()[4], row.bssid()[5]
        ),
        Column::Manufacturer => row.vendor_short().to_string(),
        Column::Ssid => {
            if row.ssid().is_empty() {
                "<hidden>".to_string()
            } else {
                row.ssid().clone()
            }
        }
        Column::Channel => row.primary_channel().to_string(),
        Column::Width => format!("{} MHz", row.channel_width_mhz()),
        Column::Band => row.band().label().to_string(),
        Column::Rssi => format!("{} dBm", row.rssi_dbm()),
        Column::Quality => format!("{}%", row.quality()),
        Column::Bars => row.bars().to_string(),
        Column::Noise => format!("{} dBm", row.noise_dbm()),
        Column::Snr => format!("{} dB", row.snr_dbm()),
    }
}

fn quality_color(quality: u8) -> Color {
    match quality {
        0..=29 => Color::Red,
        30..=59 => Color::Yellow,
        _ => Color::Green,
    }
}

/// Build the ratatui `Table` for one frame; `highlighted`/`selected`
/// styling is applied by the caller via `Table::highlight_*`/row state.
pub fn build<'a>(rows: &'a [Network], sort: &SortState) -> Table<'a> {
    let header_cells: Vec<Cell> = COLUMNS
        .iter()
        .map(|(col, label)| Cell::from(header_label(*col, label, sort)).style(Style::default().add_modifier(Modifier::BOLD)))
        .collect();
    let header = Row::new(header_cells);

    let body_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let cells: Vec<Cell> = COLUMNS
                .iter()
                .map(|(col, _)| {
                    let text = cell_text(*col, row);
                    let cell = Cell::from(Text::from(text));
                    if matches!(col, Column::Quality | Column::Bars) {
                        cell.style(Style::default().fg(quality_color(*row.quality())))
                    } else {
                        cell
                    }
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = COLUMNS
        .iter()
        .map(|(col, _)| match col {
            Column::Bssid => Constraint::Length(17),
            Column::Manufacturer => Constraint::Length(14),
            Column::Ssid => Constraint::Min(10),
            Column::Channel => Constraint::Length(4),
            Column::Width => Constraint::Length(8),
            Column::Band => Constraint::Length(8),
            Column::Rssi | Column::Noise => Constraint::Length(9),
            Column::Quality => Constraint::Length(8),
            Column::Bars => Constraint::Length(10),
            Column::Snr => Constraint::Length(7),
        })
        .collect();

    Table::new(body_rows, widths)
        .header(header)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Observation;
    use crate::consts::{SecondaryChannelOffset, WidthOperation};
    use std::time::SystemTime;

    fn network(rssi: i8) -> Network {
        Network::from_observation(&Observation {
            bssid: [1; 6],
            ssid: "Home".into(),
            frequency_mhz: 2437,
            rssi_dbm: rssi,
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
    fn sort_by_rssi_descending_orders_strongest_first() {
        let mut rows = vec![network(-80), network(-40)];
        let sort = SortState { column: Column::Rssi, direction: SortDirection::Descending };
        sort_rows(&mut rows, &sort);
        assert_eq!(*rows[0].rssi_dbm(), -40);
    }

    #[test]
    fn unsorted_leaves_order_unchanged() {
        let mut rows = vec![network(-80), network(-40)];
        let sort = SortState { column: Column::Rssi, direction: SortDirection::Unsorted };
        sort_rows(&mut rows, &sort);
        assert_eq!(*rows[0].rssi_dbm(), -80);
    }
}
