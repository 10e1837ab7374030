//! Error types used throughout this crate.
//!
//! # Design decisions
//! Every error type implements [`std::error::Error`]/[`Display`] by hand,
//! the same way `neli::err` avoids pulling in a derive-macro-based error
//! crate: each component gets its own small enum, and [`AppError`]
//! aggregates them for `main`.

use std::{error::Error, fmt, io};

/// Arbitrary error message, for cases with no more specific structure.
#[derive(Clone, Debug)]
pub struct MsgError(String);

impl MsgError {
    pub fn new<D: fmt::Display>(d: D) -> Self {
        MsgError(d.to_string())
    }
}

impl fmt::Display for MsgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for MsgError {}

/// Errors from radio control: mode switch, channel set, capability query.
#[derive(Debug)]
pub enum RadioError {
    /// The platform has no radio control implementation.
    Unsupported,
    /// The requested channel isn't supported by the adapter.
    UnsupportedChannel(u32),
    /// Insufficient privilege to reconfigure the adapter.
    Permission(String),
    /// Underlying OS/process-spawn failure.
    Io(io::Error),
    /// The adapter or helper tool returned output we couldn't parse.
    Protocol(String),
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RadioError::Unsupported => write!(f, "radio control is not supported on this platform"),
            RadioError::UnsupportedChannel(ch) => write!(f, "channel {ch} is not supported by this adapter"),
            RadioError::Permission(msg) => write!(f, "permission denied: {msg}"),
            RadioError::Io(err) => write!(f, "I/O error: {err}"),
            RadioError::Protocol(msg) => write!(f, "unexpected radio helper output: {msg}"),
        }
    }
}

impl Error for RadioError {}

impl From<io::Error> for RadioError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => RadioError::Permission(err.to_string()),
            _ => RadioError::Io(err),
        }
    }
}

/// Errors from the capture loop: opening the device, a saved file, or pcap
/// itself signalling trouble.
#[derive(Debug)]
pub enum CaptureError {
    Permission(String),
    Io(io::Error),
    Pcap(pcap::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CaptureError::Permission(msg) => write!(f, "permission denied: {msg}"),
            CaptureError::Io(err) => write!(f, "I/O error: {err}"),
            CaptureError::Pcap(err) => write!(f, "capture error: {err}"),
        }
    }
}

impl Error for CaptureError {}

impl From<pcap::Error> for CaptureError {
    fn from(err: pcap::Error) -> Self {
        match err {
            pcap::Error::PcapError(msg) if msg.to_lowercase().contains("permission") => {
                CaptureError::Permission(msg)
            }
            other => CaptureError::Pcap(other),
        }
    }
}

impl From<io::Error> for CaptureError {
    fn from(err: io::Error) -> Self {
        CaptureError::Io(err)
    }
}

/// A single malformed capture record. Non-fatal: the capture loop counts
/// these and continues rather than surfacing them to `main`.
#[derive(Debug)]
pub enum DecodeError {
    Truncated,
    BadRadiotap(String),
    UnsupportedFrameType,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Truncated => write!(f, "capture record truncated"),
            DecodeError::BadRadiotap(msg) => write!(f, "malformed radiotap header: {msg}"),
            DecodeError::UnsupportedFrameType => write!(f, "frame type is not a management frame"),
        }
    }
}

impl Error for DecodeError {}

/// Errors surfaced while hopping channels.
#[derive(Debug)]
pub enum HopError {
    Radio(RadioError),
    NoChannels,
}

impl fmt::Display for HopError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HopError::Radio(err) => write!(f, "{err}"),
            HopError::NoChannels => write!(f, "no channels configured to hop over"),
        }
    }
}

impl Error for HopError {}

impl From<RadioError> for HopError {
    fn from(err: RadioError) -> Self {
        HopError::Radio(err)
    }
}

/// Top level error type returned from `main`.
#[derive(Debug)]
pub enum AppError {
    Config(String),
    Permission(String),
    Io(io::Error),
    Shutdown(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "configuration error: {msg}"),
            AppError::Permission(msg) => write!(f, "permission error: {msg}"),
            AppError::Io(err) => write!(f, "I/O error: {err}"),
            AppError::Shutdown(msg) => write!(f, "shutdown error: {msg}"),
        }
    }
}

impl Error for AppError {}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<RadioError> for AppError {
    fn from(err: RadioError) -> Self {
        match err {
            RadioError::Permission(msg) => AppError::Permission(msg),
            RadioError::Io(err) => AppError::Io(err),
            other => AppError::Config(other.to_string()),
        }
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::Permission(msg) => AppError::Permission(msg),
            CaptureError::Io(err) => AppError::Io(err),
            CaptureError::Pcap(err) => AppError::Config(err.to_string()),
        }
    }
}

impl From<HopError> for AppError {
    fn from(err: HopError) -> Self {
        AppError::Config(err.to_string())
    }
}
