//! The UI cooperative scheduler (T_ui): a 1 Hz tick loop that redraws the
//! table/sparkline/spectrum from a `DataSource` snapshot and folds
//! keyboard input through the `events::reduce` state machine.

use std::{
    io,
    sync::{atomic::{AtomicBool, Ordering}, Arc},
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame, Terminal,
};

use crate::{
    datasource::{DataSource, Metric},
    events::{self, Column, Event, SignalMetric, SortDirection, SortState, WidgetState},
    radio::AssociatedNetwork,
    ui::{sparkline, spectrum, table},
};

const TICK: Duration = Duration::from_secs(1);
const POLL: Duration = Duration::from_millis(100);

/// Why `App::run` returned, so `main` can pick the right exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitReason {
    User,
    Interrupt,
    ParentCancelled,
}

pub struct App {
    data: Arc<DataSource>,
    cancel: Arc<AtomicBool>,
    widget_state: WidgetState,
    sort: SortState,
    signal_metric: SignalMetric,
    table_state: TableState,
    associated: AssociatedNetwork,
    decode_errors: u64,
    quit_reason: QuitReason,
}

impl App {
    pub fn new(data: Arc<DataSource>, cancel: Arc<AtomicBool>) -> Self {
        App {
            data,
            cancel,
            widget_state: WidgetState::default(),
            sort: SortState { column: Column::Rssi, direction: SortDirection::Descending },
            signal_metric: SignalMetric::Quality,
            table_state: TableState::default(),
            associated: AssociatedNetwork::default(),
            decode_errors: 0,
            quit_reason: QuitReason::User,
        }
    }

    pub fn quit_reason(&self) -> QuitReason {
        self.quit_reason
    }

    pub fn set_associated(&mut self, associated: AssociatedNetwork) {
        self.associated = associated;
    }

    pub fn set_decode_errors(&mut self, count: u64) {
        self.decode_errors = count;
    }

    /// Drive the terminal until the user quits or `self.cancel` is set by
    /// another thread, at which point this returns so `main` can join the
    /// rest of the shutdown sequence.
    pub fn run<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut last_tick = Instant::now();
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                if self.quit_reason == QuitReason::User {
                    self.quit_reason = QuitReason::ParentCancelled;
                }
                return Ok(());
            }

            if event::poll(POLL)? {
                if let TermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && self.handle_key(key.code, key.modifiers)
                    {
                        self.cancel.store(true, Ordering::Relaxed);
                        return Ok(());
                    }
                }
            }

            if last_tick.elapsed() >= TICK {
                terminal.draw(|frame| self.draw(frame))?;
                last_tick = Instant::now();
            }
        }
    }

    /// Returns `true` if the key requested a quit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.quit_reason = QuitReason::Interrupt;
            return true;
        }

        let mut rows = self.data.networks();
        table::sort_rows(&mut rows, &self.sort);

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit_reason = QuitReason::User;
                return true;
            }
            KeyCode::Down => self.move_selection(&rows, 1),
            KeyCode::Up => self.move_selection(&rows, -1),
            KeyCode::Enter => {
                if let Some(key) = self.current_key(&rows) {
                    self.apply(Event::ToggledNetwork { key });
                }
            }
            KeyCode::Tab => {
                let columns: Vec<Column> = table::COLUMNS.iter().map(|(c, _)| *c).collect();
                self.sort.toggle(self.sort.column, &columns);
            }
            KeyCode::Char('s') => {
                self.signal_metric = match self.signal_metric {
                    SignalMetric::Rssi => SignalMetric::Quality,
                    SignalMetric::Quality | SignalMetric::Bars => SignalMetric::Rssi,
                };
                self.apply(Event::SignalField { metric: self.signal_metric });
            }
            _ => {}
        }
        false
    }

    fn current_key(&self, rows: &[crate::datasource::Network]) -> Option<crate::datasource::BssKey> {
        let idx = self.table_state.selected()?;
        rows.get(idx).map(|n| n.key())
    }

    fn move_selection(&mut self, rows: &[crate::datasource::Network], delta: i32) {
        if rows.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(rows.len() as i32) as usize;
        self.table_state.select(Some(next));
        self.apply(Event::HighlightedNetwork { key: rows[next].key() });
    }

    fn apply(&mut self, event: Event) {
        let mut queue = vec![event];
        while let Some(next) = queue.pop() {
            let follow_ups = events::reduce(&mut self.widget_state, &next);
            queue.extend(follow_ups);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        self.apply(Event::TableWidth { width: area.width });

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Percentage(55),
                Constraint::Percentage(30),
                Constraint::Percentage(15),
            ])
            .split(area);

        let mut rows = self.data.networks();
        table::sort_rows(&mut rows, &self.sort);
        self.apply(Event::NetworksOnScreen { rows: rows.clone() });

        frame.render_widget(self.status_line(rows.len()), chunks[0]);
        frame.render_stateful_widget(table::build(&rows, &self.sort), chunks[1], &mut self.table_state);

        if let Some(key) = &self.widget_state.highlighted {
            let series = self.data.time_series(
                key,
                match self.signal_metric {
                    SignalMetric::Rssi => Metric::Rssi,
                    SignalMetric::Quality | SignalMetric::Bars => Metric::Quality,
                },
            );
            let data = sparkline::bar_data(&series, self.signal_metric);
            frame.render_widget(sparkline::build(&data, &key.to_string()), chunks[2]);
        } else {
            frame.render_widget(
                Block::default().borders(Borders::ALL).title("signal history (select a network)"),
                chunks[2],
            );
        }

        let spectrum_buf = spectrum::render(
            &rows,
            chunks[3].width,
            chunks[3].height.max(1),
            self.signal_metric,
        );
        let text = spectrum_buf.rows().join("\n");
        frame.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("spectrum")), chunks[3]);
    }

    fn status_line(&self, visible: usize) -> Paragraph<'static> {
        let associated = match (&self.associated.ssid, self.associated.channel) {
            (Some(ssid), Some(channel)) => format!("associated: {ssid} (ch {channel})"),
            _ => "associated: none".to_string(),
        };
        let text = format!(
            "wfmon  |  {visible} networks  |  {associated}  |  decode errors: {}  |  q: quit  tab: sort  enter: pin  s: metric",
            self.decode_errors
        );
        Paragraph::new(text).style(Style::default().fg(Color::White))
    }
}
