//! Unified error types for the SimWheel firmware.
//!
//! The taxonomy is intentionally minimal, reflecting a best-effort
//! telemetry link: the queue and signal variants are normal flow-control
//! conditions handled at the point of occurrence, never escalated. Only
//! peripheral initialisation can halt the system. All variants are `Copy`
//! so they can be passed between tasks without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No queue slot freed within the submit timeout. The caller drops the
    /// event; the next sampling cycle supersedes it.
    QueueFull,
    /// No event arrived within the receive timeout. Normal idle condition.
    ReceiveTimeout,
    /// No edge signal was raised within the wait timeout. Normal idle
    /// condition for the paddle task.
    SignalTimeout,
    /// Peripheral initialisation failed. Fatal; never retried.
    Init(&'static str),
    /// Configuration failed range validation.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "event queue full"),
            Self::ReceiveTimeout => write!(f, "event receive timed out"),
            Self::SignalTimeout => write!(f, "edge signal wait timed out"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
