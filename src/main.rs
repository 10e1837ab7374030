//! Wires the capture, hop, and UI threads together and runs the
//! graceful-shutdown sequence described in `wfmon::config`/`wfmon::err`.

use std::{
    process::ExitCode,
    sync::{atomic::Ordering, mpsc, Arc},
    thread,
    time::{Duration, SystemTime},
};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use wfmon::{
    capture::{CaptureOptions, Monitor},
    config::{Cli, Config, LogMode},
    consts::{SecondaryChannelOffset, WidthOperation},
    datasource::DataSource,
    decode::Observation,
    err::AppError,
    hopper::ChannelHopper,
    radio::{self, AssociatedNetwork, RadioControl},
    ui::app::{App, QuitReason},
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(QuitReason::User) => ExitCode::from(0),
        Ok(QuitReason::Interrupt) => ExitCode::from(130),
        Ok(QuitReason::ParentCancelled) => ExitCode::from(0),
        Err(err) => {
            eprintln!("wfmon: {err}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn exit_code_for(err: &AppError) -> u8 {
    match err {
        AppError::Config(_) => 1,
        AppError::Permission(_) | AppError::Io(_) => 2,
        AppError::Shutdown(_) => 2,
    }
}

fn init_logging(mode: LogMode) {
    let level = match mode {
        LogMode::Dev => "debug",
        LogMode::Prod => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<QuitReason, AppError> {
    let config = Config::from_cli(cli)?;
    init_logging(config.log_mode);

    let radio_control: Arc<dyn RadioControl> = Arc::from(radio::default());
    let data = Arc::new(DataSource::new());
    let monitor = Arc::new(Monitor::default());

    let iface = match (&config.iface, &config.pcap, config.demo) {
        (Some(iface), _, _) => iface.clone(),
        (None, Some(_), _) => String::new(),
        (None, None, true) => String::new(),
        (None, None, false) => radio_control.default_wifi_interface()?,
    };

    let (obs_tx, obs_rx) = mpsc::sync_channel(wfmon::capture::DEFAULT_CHANNEL_CAPACITY);

    let capture_handle = if config.demo {
        spawn_demo_source(obs_tx, monitor.cancel_handle())
    } else if let Some(path) = &config.pcap {
        let capture = Monitor::open_file(path)?;
        let monitor = Arc::clone(&monitor);
        thread::spawn(move || {
            if let Err(err) = monitor.run_file(capture, obs_tx) {
                log::error!("file replay ended: {err}");
            }
        })
    } else {
        radio_control.disassociate(&iface)?;
        let capture = Monitor::open_live(&iface, CaptureOptions::default())?;
        let monitor = Arc::clone(&monitor);
        thread::spawn(move || {
            if let Err(err) = monitor.run_live(capture, obs_tx) {
                log::error!("capture loop ended: {err}");
            }
        })
    };

    {
        let data = Arc::clone(&data);
        thread::spawn(move || {
            for obs in obs_rx {
                data.add(obs);
            }
        });
    }

    if let Some(max_idle) = config.max_idle {
        let data = Arc::clone(&data);
        let cancel = monitor.cancel_handle();
        thread::spawn(move || {
            while !cancel.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_secs(1));
                data.evict_older_than(max_idle);
            }
        });
    }

    let mut hopper = if !config.demo && config.pcap.is_none() {
        match build_hopper(radio_control.as_ref(), &iface, &config) {
            Ok(hopper) => Some(hopper),
            Err(err) => {
                log::warn!("channel hopping disabled: {err}");
                None
            }
        }
    } else {
        None
    };
    if let Some(hopper) = &mut hopper {
        hopper.start(Arc::clone(&radio_control), iface.clone(), config.hop_interval);
    }

    let associated = if config.demo || config.pcap.is_some() {
        AssociatedNetwork::default()
    } else {
        radio_control.associated_network(&iface).unwrap_or_default()
    };

    enable_raw_mode().map_err(AppError::from)?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(AppError::from)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(AppError::from)?;

    let mut app = App::new(Arc::clone(&data), monitor.cancel_handle());
    app.set_associated(associated);
    let run_result = app.run(&mut terminal);
    app.set_decode_errors(monitor.decode_error_count());

    disable_raw_mode().map_err(AppError::from)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).map_err(AppError::from)?;
    terminal.show_cursor().map_err(AppError::from)?;

    run_result.map_err(AppError::from)?;

    monitor.cancel_handle().store(true, Ordering::Relaxed);
    let timeout = config.graceful_shutdown_timeout;

    if let Some(hopper) = &mut hopper {
        if !hopper.stop_with_timeout(timeout) {
            return Err(AppError::Shutdown(format!(
                "channel hopper did not stop within {timeout:?}"
            )));
        }
    }
    join_with_timeout(capture_handle, timeout, "capture")?;

    Ok(app.quit_reason())
}

/// Wait up to `timeout` for `handle` to finish, without blocking forever on
/// a capture thread stuck in a blocking read. The join itself still
/// happens on a detached thread if the deadline passes, since a
/// `JoinHandle` can't be cancelled from the outside.
fn join_with_timeout(handle: thread::JoinHandle<()>, timeout: Duration, what: &str) -> Result<(), AppError> {
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let panicked = handle.join().is_err();
        let _ = done_tx.send(panicked);
    });
    match done_rx.recv_timeout(timeout) {
        Ok(true) => {
            log::warn!("{what} thread panicked during shutdown");
            Ok(())
        }
        Ok(false) => Ok(()),
        Err(_) => Err(AppError::Shutdown(format!("{what} thread did not exit within {timeout:?}"))),
    }
}

fn build_hopper(radio: &dyn RadioControl, iface: &str, config: &Config) -> Result<ChannelHopper, AppError> {
    if let Some(channels) = &config.channels_override {
        ChannelHopper::from_channels(channels.clone()).map_err(AppError::from)
    } else {
        ChannelHopper::configure(radio, iface).map_err(AppError::from)
    }
}

/// Synthetic traffic for `--demo`: periodically emits a beacon-shaped
/// `Observation` for a handful of fixed BSSes so the UI is exercisable
/// without root or a real NIC.
fn spawn_demo_source(
    tx: mpsc::SyncSender<Observation>,
    cancel: Arc<std::sync::atomic::AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let fixtures = [
            ([0xAAu8, 0xBB, 0xCC, 0x01, 0x02, 0x03], "Coffee Shop", 6u32, -55i8),
            ([0xAAu8, 0xBB, 0xCC, 0x04, 0x05, 0x06], "Home", 1u32, -40i8),
            ([0x00u8, 0x1A, 0x2B, 0x07, 0x08, 0x09], "", 149u32, -70i8),
        ];
        let mut tick: i8 = 0;
        while !cancel.load(Ordering::Relaxed) {
            for (bssid, ssid, channel, base_rssi) in fixtures {
                let jitter = (tick % 7) - 3;
                let obs = Observation {
                    bssid,
                    ssid: ssid.to_string(),
                    frequency_mhz: 2400 + channel * 5,
                    rssi_dbm: base_rssi.saturating_add(jitter),
                    noise_dbm: -95,
                    primary_channel: channel,
                    secondary_offset: SecondaryChannelOffset::Reserved,
                    vht_width_op: WidthOperation::W20Or40,
                    seg0_center: 0,
                    seg1_center: 0,
                    timestamp: SystemTime::now(),
                };
                if tx.send(obs).is_err() {
                    return;
                }
            }
            tick = tick.wrapping_add(1);
            thread::sleep(Duration::from_millis(500));
        }
    })
}
