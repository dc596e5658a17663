//! The imperative shell around the game core.
//!
//! The core describes side effects as cues. This module runs them:
//!
//! - **Environment**: `Presentation`, `Audio` and `Scheduler` traits bundled in [`GameEnv`]
//! - **Dispatch**: [`perform`] turns a cue list into a Stillwater effect over the environment
//! - **Controller**: [`GameController`] reacts to an event, then runs its cues
//!
//! Swapping the environment is how tests run the full game without a
//! screen, speakers or a real clock.

mod controller;
mod dispatch;
mod env;
mod error;
mod recorder;

pub use controller::GameController;
pub use dispatch::perform;
pub use env::{Audio, GameEnv, Muted, Presentation, Scheduler};
pub use error::ShellError;
pub use recorder::Recorder;
