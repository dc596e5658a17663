//! The pure game core.
//!
//! - The palette and sources of new colors
//! - Game phases via the `State` trait
//! - Guarded transition rules
//! - The [`Game`] state machine and the cues it emits
//! - Immutable phase history
//!
//! Nothing in this module performs I/O. Side effects are described as
//! [`Cue`] values and carried out by the shell in [`crate::effects`].

#[macro_use]
mod macros;

mod color;
mod cue;
mod game;
mod guard;
mod history;
mod rules;
mod state;

pub use color::{Color, ColorSource, ParseColorError, RandomPalette, ScriptedColors, Sound, PALETTE};
pub use cue::{level_title, Cue, GameOverReport, Timer, TimerKind};
pub use game::{Game, Ignored, InputEvent, Outcome, Reaction, Timing};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use rules::{PhaseRules, Rule, Trigger};
pub use state::{GamePhase, State};
