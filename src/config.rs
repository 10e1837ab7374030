//! Runtime configuration: CLI flags layered over environment defaults,
//! the same "flags override env, env overrides hardcoded default" layering
//! `neli`'s examples use for their socket parameters.

use std::time::Duration;

use clap::Parser;

use crate::err::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Dev,
    Prod,
}

impl LogMode {
    fn from_env() -> Self {
        match std::env::var("MODE").as_deref() {
            Ok("DEV") => LogMode::Dev,
            _ => LogMode::Prod,
        }
    }
}

fn duration_env(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|raw| parse_duration(&raw))
        .unwrap_or(default)
}

/// Parse a Go-style duration string (`"250ms"`, `"15s"`); bare integers are
/// treated as whole seconds.
fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if let Some(ms) = raw.strip_suffix("ms") {
        return ms.trim().parse().ok().map(Duration::from_millis);
    }
    if let Some(secs) = raw.strip_suffix('s') {
        return secs.trim().parse().ok().map(Duration::from_secs_f64);
    }
    raw.parse().ok().map(Duration::from_secs)
}

/// Interactive terminal Wi-Fi monitor.
#[derive(Parser, Debug)]
#[command(name = "wfmon", version, about)]
pub struct Cli {
    /// Wi-Fi interface to capture on; defaults to the platform's primary
    /// Wi-Fi hardware port.
    #[arg(long)]
    pub iface: Option<String>,

    /// Replay a saved capture file instead of a live interface.
    #[arg(long)]
    pub pcap: Option<std::path::PathBuf>,

    /// Channel hop interval, overriding `CHANNEL_HOP_INTERVAL`.
    #[arg(long)]
    pub hop: Option<String>,

    /// Comma-separated channel list, overriding the platform-reported
    /// supported-channel list.
    #[arg(long, value_delimiter = ',')]
    pub channels: Option<Vec<u32>>,

    /// Run against synthetic traffic instead of a capture source, for
    /// smoke-testing the UI without root or a real NIC.
    #[arg(long)]
    pub demo: bool,

    /// Evict BSSes unseen for longer than this duration; unset means the
    /// original's behavior of never evicting.
    #[arg(long)]
    pub max_idle: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub iface: Option<String>,
    pub pcap: Option<std::path::PathBuf>,
    pub demo: bool,
    pub hop_interval: Duration,
    pub channels_override: Option<Vec<u32>>,
    pub graceful_shutdown_timeout: Duration,
    pub max_idle: Option<Duration>,
    pub log_mode: LogMode,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        let hop_interval = match &cli.hop {
            Some(raw) => parse_duration(raw)
                .ok_or_else(|| AppError::Config(format!("invalid --hop duration: {raw}")))?,
            None => duration_env("CHANNEL_HOP_INTERVAL", Duration::from_millis(250)),
        };
        let max_idle = match &cli.max_idle {
            Some(raw) => Some(
                parse_duration(raw)
                    .ok_or_else(|| AppError::Config(format!("invalid --max-idle duration: {raw}")))?,
            ),
            None => None,
        };
        if cli.pcap.is_some() && cli.iface.is_some() {
            return Err(AppError::Config("--iface and --pcap are mutually exclusive".into()));
        }
        Ok(Config {
            iface: cli.iface,
            pcap: cli.pcap,
            demo: cli.demo,
            hop_interval,
            channels_override: cli.channels,
            graceful_shutdown_timeout: duration_env("GRACEFUL_SHUTDOWN_TIMEOUT", Duration::from_secs(15)),
            max_idle,
            log_mode: LogMode::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millisecond_and_second_durations() {
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("15s"), Some(Duration::from_secs(15)));
        assert_eq!(parse_duration("3"), Some(Duration::from_secs(3)));
    }

    #[test]
    fn rejects_iface_and_pcap_together() {
        let cli = Cli {
            iface: Some("en0".into()),
            pcap: Some("capture.pcap".into()),
            hop: None,
            channels: None,
            demo: false,
            max_idle: None,
        };
        assert!(matches!(Config::from_cli(cli), Err(AppError::Config(_))));
    }
}
