//! Configuration error types.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A single timing rule a configuration breaks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimingViolation {
    #[error("settle delay must be greater than zero")]
    ZeroSettle,

    #[error("settle delay ({settle:?}) is shorter than the flash ({flash:?})")]
    SettleShorterThanFlash { settle: Duration, flash: Duration },

    #[error("round pause must be greater than zero")]
    ZeroRoundPause,

    #[error("press animation ({press:?}) outlasts the round pause ({pause:?})")]
    PressOutlastsPause { press: Duration, pause: Duration },
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {}", format_violations(.0))]
    Invalid(Vec<TimingViolation>),
}

fn format_violations(violations: &[TimingViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
