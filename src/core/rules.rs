//! Declarative phase transition rules.
//!
//! Every phase change the game makes goes through this table. An event
//! with no matching rule is ignored, which is how presses during playback
//! and key presses mid-game are filtered out.

use super::game::Game;
use super::guard::Guard;
use super::state::GamePhase;
use serde::{Deserialize, Serialize};

/// What caused a transition attempt.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Trigger {
    /// Any key, which starts or restarts a game.
    AnyKey,
    /// The settle timer elapsed.
    SettleElapsed,
    /// The between-rounds pause elapsed.
    PauseElapsed,
    /// A pad was pressed.
    Press,
    /// The press matched and the pattern has more steps.
    Matched,
    /// The press matched the final step.
    RoundMatched,
    /// The press did not match.
    Mismatched,
}

/// A single allowed transition.
#[derive(Clone, Debug)]
pub struct Rule {
    pub from: GamePhase,
    pub on: Trigger,
    pub to: GamePhase,
    pub guard: Option<Guard<Game>>,
}

impl Rule {
    pub fn new(from: GamePhase, on: Trigger, to: GamePhase) -> Self {
        Self {
            from,
            on,
            to,
            guard: None,
        }
    }

    /// Attach a guard predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Game) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Whether this rule fires for `on` given the game as it is now.
    pub fn applies(&self, game: &Game, on: Trigger) -> bool {
        if game.phase() != self.from || on != self.on {
            return false;
        }
        self.guard.as_ref().is_none_or(|g| g.check(game))
    }
}

/// The rule table consulted by [`Game`].
#[derive(Clone, Debug)]
pub struct PhaseRules {
    rules: Vec<Rule>,
}

impl PhaseRules {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The game's transition table.
    pub fn standard() -> Self {
        use GamePhase::*;

        let not_started = |g: &Game| !g.is_started();
        let started = |g: &Game| g.is_started();

        Self::new(vec![
            Rule::new(Idle, Trigger::AnyKey, Playback).when(not_started),
            Rule::new(GameOver, Trigger::AnyKey, Playback).when(not_started),
            Rule::new(Playback, Trigger::SettleElapsed, AwaitingInput).when(started),
            Rule::new(Playback, Trigger::PauseElapsed, Playback).when(started),
            Rule::new(AwaitingInput, Trigger::Press, Evaluating)
                .when(|g: &Game| g.is_started() && g.is_accepting_input()),
            Rule::new(Evaluating, Trigger::Matched, AwaitingInput).when(started),
            Rule::new(Evaluating, Trigger::RoundMatched, Playback).when(started),
            Rule::new(Evaluating, Trigger::Mismatched, GameOver).when(started),
        ])
    }

    /// Target phase of the first rule that applies.
    pub fn resolve(&self, game: &Game, on: Trigger) -> Option<GamePhase> {
        self.rules
            .iter()
            .find(|rule| rule.applies(game, on))
            .map(|rule| rule.to)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for PhaseRules {
    fn default() -> Self {
        Self::standard()
    }
}
