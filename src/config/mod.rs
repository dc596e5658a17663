//! Game configuration.
//!
//! Configuration is plain JSON. Every field has a default, so an empty
//! object is a valid config. Validation uses Stillwater's `Validation` so a
//! bad file reports every broken rule at once rather than the first one.
//!
//! ```rust
//! use pattern_recall::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "timing": { "round_pause_ms": 800 } }"#).unwrap();
//! assert_eq!(config.timing.round_pause_ms, 800);
//! assert_eq!(config.timing.settle_ms, 500);
//! ```

use crate::core::Timing;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{ConfigError, TimingViolation};

/// Durations for cues and delays, in milliseconds.
///
/// Only `settle_ms` and `round_pause_ms` drive timers. `flash_ms` and
/// `press_ms` are nominal animation lengths: no frontend in this crate
/// waits on them, and they take part in validation only, so that a
/// graphical frontend honoring them stays consistent with the timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Total playback flash (fade out plus fade in). Nominal.
    pub flash_ms: u64,
    /// Delay after a flash before presses are accepted.
    pub settle_ms: u64,
    /// Pause between a completed round and the next color.
    pub round_pause_ms: u64,
    /// Pressed-state animation length. Nominal.
    pub press_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            flash_ms: 500,
            settle_ms: 500,
            round_pause_ms: 1000,
            press_ms: 100,
        }
    }
}

impl TimingConfig {
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn press(&self) -> Duration {
        Duration::from_millis(self.press_ms)
    }

    /// The delays the game itself schedules.
    pub fn to_timing(&self) -> Timing {
        Timing {
            settle: Duration::from_millis(self.settle_ms),
            round_pause: Duration::from_millis(self.round_pause_ms),
        }
    }

    /// Check every timing rule, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TimingViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TimingViolation>>> = Vec::new();

        checks.push(if self.settle_ms == 0 {
            Validation::fail(TimingViolation::ZeroSettle)
        } else {
            Validation::success(())
        });

        // Input must not open while the flash is still on screen.
        checks.push(if self.settle_ms < self.flash_ms {
            Validation::fail(TimingViolation::SettleShorterThanFlash {
                settle: Duration::from_millis(self.settle_ms),
                flash: self.flash(),
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.round_pause_ms == 0 {
            Validation::fail(TimingViolation::ZeroRoundPause)
        } else {
            Validation::success(())
        });

        checks.push(if self.press_ms > self.round_pause_ms {
            Validation::fail(TimingViolation::PressOutlastsPause {
                press: self.press(),
                pause: Duration::from_millis(self.round_pause_ms),
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub timing: TimingConfig,
    /// Seed for the color generator; random when absent.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Return the config if every rule holds.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.timing.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing.to_timing()
    }
}
