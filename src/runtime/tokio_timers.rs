//! Real-time scheduler on top of tokio.

use crate::core::Timer;
use crate::effects::{Scheduler, ShellError};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Sleeps on the tokio runtime and sends each timer back once it is due.
///
/// Timers cannot be cancelled; the game discards stale ones by epoch.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: UnboundedSender<Timer>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver fired timers arrive on.
    pub fn channel() -> (Self, UnboundedReceiver<Timer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, timer: Timer) -> Result<(), ShellError> {
        if self.tx.is_closed() {
            return Err(ShellError::SchedulerClosed {
                kind: timer.kind,
                epoch: timer.epoch,
            });
        }
        let handle = Handle::try_current().map_err(|_| ShellError::NoRuntime { kind: timer.kind })?;

        let tx = self.tx.clone();
        handle.spawn(async move {
            tokio::time::sleep(timer.delay).await;
            if tx.send(timer).is_err() {
                debug!(?timer, "timer fired after receiver closed");
            }
        });
        Ok(())
    }
}
