//! Phase transition history.
//!
//! The game keeps a record of every phase change since the last start.
//! Recording consumes the history and returns the extended one.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the transition happened
    pub timestamp: DateTime<Utc>,
    /// Pattern length at the moment of the transition
    pub level: usize,
}

/// Ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use pattern_recall::core::{GamePhase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: GamePhase::Idle,
///     to: GamePhase::Playback,
///     timestamp: Utc::now(),
///     level: 0,
/// });
///
/// assert_eq!(history.get_path(), vec![&GamePhase::Idle, &GamePhase::Playback]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transitions.
    ///
    /// `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of transitions that entered `state`.
    pub fn count_entries(&self, state: &S) -> usize {
        self.transitions.iter().filter(|t| &t.to == state).count()
    }

    /// The most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// All transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
