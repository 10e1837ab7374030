//! # wfmon: an interactive terminal Wi-Fi monitor
//!
//! ## Rationale
//!
//! This crate watches 802.11 management frames off a monitor-mode NIC
//! (or a saved capture file), decodes each beacon/probe response into a
//! normalized observation, and aggregates those observations per-BSS for
//! display in a terminal UI: a sortable network table, a signal history
//! sparkline for whichever network is highlighted, and a spectrum chart
//! of occupied channel bandwidth.
//!
//! ## The project is broken down into the following modules:
//! * `consts` - 802.11 frame-type/tag constants and band classification.
//! * `decode` - RadioTap + MAC header + information-element parsing into
//!   an `Observation`.
//! * `metrics` - RSSI-to-quality scoring and spectrum wave geometry.
//! * `oui` - ahead-of-time-compiled vendor OUI lookup.
//! * `datasource` - the concurrent per-BSS table and time-series store.
//! * `radio` - platform channel enumeration, set, and disassociation.
//! * `hopper` - the background channel-hopping loop.
//! * `capture` - the pcap read loop feeding `datasource`.
//! * `events` - the UI event/reducer state machine.
//! * `ui` - the `ratatui` table/sparkline/spectrum widgets.
//! * `config` - CLI flag and environment variable handling.
//! * `err` - error types for every component above.
//!
//! ## Design decisions
//!
//! Capture, hopping, and the UI each run on their own thread; the
//! `DataSource` is the only state shared between them, behind a pair of
//! `parking_lot` locks. There is no async runtime: every blocking point
//! (NIC read, channel-set, terminal input) is a real OS thread blocking
//! on real I/O, which keeps the concurrency model easy to reason about
//! at the scale this program runs at.

pub mod capture;
pub mod config;
pub mod consts;
pub mod datasource;
pub mod decode;
pub mod err;
pub mod events;
pub mod hopper;
pub mod metrics;
pub mod oui;
pub mod radio;
pub mod ui;
