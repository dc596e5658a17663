//! Shell error types.

use crate::core::TimerKind;
use thiserror::Error;

/// Errors that can occur while carrying out cues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Scheduler is closed, dropped {kind:?} timer (epoch {epoch})")]
    SchedulerClosed { kind: TimerKind, epoch: u64 },

    #[error("No async runtime available to schedule {kind:?} timer")]
    NoRuntime { kind: TimerKind },
}
