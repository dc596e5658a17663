//! Schedulers that deliver timers back to the game.
//!
//! - [`VirtualClock`]: moves only when advanced, for deterministic runs
//! - [`TokioScheduler`]: real delays on a tokio runtime

mod tokio_timers;
mod virtual_clock;

pub use tokio_timers::TokioScheduler;
pub use virtual_clock::VirtualClock;
