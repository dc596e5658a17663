//! State trait and the game's phases.
//!
//! Every phase the game can be in is a [`State`]. Phases are plain values:
//! inspecting them never touches the game.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are immutable values describing where a
/// machine currently is.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The state's name for display and logging.
    fn name(&self) -> &str;

    /// Whether this is a final state.
    ///
    /// Final states accept no further transitions except an explicit restart.
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state represents a failure.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// Phase of a game session.
    ///
    /// `Evaluating` only exists for the duration of a single press check;
    /// callers observing the game between events never see it.
    pub enum GamePhase {
        /// Nothing has been played yet.
        Idle,
        /// The pattern is being shown; presses are ignored.
        Playback,
        /// Presses are accepted.
        AwaitingInput,
        /// A press is being compared against the pattern.
        Evaluating,
        /// The player missed. Only a restart leaves this phase.
        GameOver,
    }
    final: [GameOver]
}

impl GamePhase {
    /// Whether a press is accepted in this phase.
    pub fn accepts_presses(&self) -> bool {
        matches!(self, Self::AwaitingInput)
    }

    /// Whether "any key" starts a new game from this phase.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::GameOver)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Idle
    }
}
