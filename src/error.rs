//! Error types surfaced by the core.
//!
//! The core is otherwise infallible: monitor-gated skips, stale-handle
//! cancellation and over-long durations are all defined no-ops (see
//! `spec.md` §7), not errors. Only construction-time misconfiguration and
//! callback panics (which the core does not catch) are observable failures.

use std::fmt;

/// Top-level error type for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A `TickTimerManager` was asked to build itself from an invalid wheel
    /// configuration.
    Configuration(ConfigError),
}

/// Why a `TickTimerManager` configuration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// At least one wheel is required.
    NoWheels,
    /// Every wheel needs at least one slot.
    ZeroSlotWheel {
        /// Index (0 = innermost/finest) of the offending wheel.
        level: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(e) => write!(f, "invalid timer wheel configuration: {e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoWheels => f.write_str("at least one wheel is required"),
            ConfigError::ZeroSlotWheel { level } => {
                write!(f, "wheel at level {level} has zero slots")
            }
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Configuration(e)
    }
}
