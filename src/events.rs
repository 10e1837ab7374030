//! Event Bus & UI Model: a sum type of events plus a reducer per widget,
//! replacing the original's interface-assertion dispatch (spec §9).

use crate::datasource::{BssKey, Network};

/// A column the table can be sorted by; each carries its own comparator
/// in `Column::compare` below instead of duck-typed sort functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Bssid,
    Manufacturer,
    Ssid,
    Channel,
    Width,
    Band,
    Rssi,
    Quality,
    Bars,
    Noise,
    Snr,
}

impl Column {
    pub fn compare(self, a: &Network, b: &Network) -> std::cmp::Ordering {
        match self {
            Column::Bssid => a.bssid().cmp(b.bssid()),
            Column::Manufacturer => a.vendor_short().cmp(b.vendor_short()),
            Column::Ssid => a.ssid().cmp(b.ssid()),
            Column::Channel => a.primary_channel().cmp(b.primary_channel()),
            Column::Width => a.channel_width_mhz().cmp(b.channel_width_mhz()),
            Column::Band => a.band().label().cmp(b.band().label()),
            Column::Rssi => a.rssi_dbm().cmp(b.rssi_dbm()),
            // Bars has no independent sort identity (spec §9): it orders
            // by Quality, same as the Quality column.
            Column::Quality | Column::Bars => a.quality().cmp(b.quality()),
            Column::Noise => a.noise_dbm().cmp(b.noise_dbm()),
            Column::Snr => a.snr_dbm().cmp(b.snr_dbm()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
    Unsorted,
}

/// Cycles ascending → descending → unsorted → (next column, ascending).
#[derive(Debug, Clone, Copy)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn toggle(&mut self, clicked: Column, columns: &[Column]) {
        if clicked == self.column {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Unsorted,
                SortDirection::Unsorted => SortDirection::Ascending,
            };
            if self.direction == SortDirection::Unsorted {
                if let Some(next) = next_column(columns, clicked) {
                    self.column = next;
                    self.direction = SortDirection::Ascending;
                }
            }
        } else {
            self.column = clicked;
            self.direction = SortDirection::Ascending;
        }
    }
}

fn next_column(columns: &[Column], current: Column) -> Option<Column> {
    let idx = columns.iter().position(|c| *c == current)?;
    columns.get((idx + 1) % columns.len()).copied()
}

/// The signal metric the table/spectrum/sparkline are currently keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMetric {
    Rssi,
    Quality,
    Bars,
}

impl SignalMetric {
    pub fn range(self) -> (f64, f64) {
        match self {
            SignalMetric::Rssi => (-100.0, 0.0),
            SignalMetric::Quality | SignalMetric::Bars => (0.0, 100.0),
        }
    }
}

/// Typed in-process events. Names describe behavior, not a type name.
#[derive(Debug, Clone)]
pub enum Event {
    SelectedNetwork { key: BssKey },
    HighlightedNetwork { key: BssKey },
    ToggledNetwork { key: BssKey },
    TableWidth { width: u16 },
    SignalField { metric: SignalMetric },
    NetworksOnScreen { rows: Vec<Network> },
}

/// Widget state shared by the table/sparkline/spectrum reducers.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub highlighted: Option<BssKey>,
    pub selected: std::collections::HashSet<BssKey>,
    pub table_width: u16,
    pub signal_metric: Option<SignalMetric>,
}

/// Apply one event to widget state, returning any follow-on events a
/// downstream widget should react to (e.g. a toggle re-emits the new
/// highlight so the sparkline tracks it).
pub fn reduce(state: &mut WidgetState, event: &Event) -> Vec<Event> {
    match event {
        Event::SelectedNetwork { key } | Event::HighlightedNetwork { key } => {
            state.highlighted = Some(key.clone());
            Vec::new()
        }
        Event::ToggledNetwork { key } => {
            if !state.selected.remove(key) {
                state.selected.insert(key.clone());
            }
            vec![Event::HighlightedNetwork { key: key.clone() }]
        }
        Event::TableWidth { width } => {
            state.table_width = *width;
            Vec::new()
        }
        Event::SignalField { metric } => {
            state.signal_metric = Some(*metric);
            Vec::new()
        }
        Event::NetworksOnScreen { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_state_cycles_to_next_column() {
        let columns = [Column::Rssi, Column::Quality];
        let mut sort = SortState { column: Column::Rssi, direction: SortDirection::Descending };
        sort.toggle(Column::Rssi, &columns);
        assert_eq!(sort.column, Column::Quality);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn toggled_network_re_emits_highlight() {
        let mut state = WidgetState::default();
        let key = BssKey::new([1; 6], "Home");
        let follow_ups = reduce(&mut state, &Event::ToggledNetwork { key: key.clone() });
        assert!(state.selected.contains(&key));
        assert!(matches!(follow_ups.as_slice(), [Event::HighlightedNetwork { .. }]));
    }
}
