//! The game state machine.
//!
//! [`Game`] owns the pattern, the player's input for the current round and
//! the flags that gate input. Every operation returns a [`Reaction`]: what
//! happened plus the cues the shell must dispatch, in order. Nothing here
//! sleeps, draws or plays audio.

use super::color::{Color, ColorSource, Sound};
use super::cue::{Cue, GameOverReport, Timer, TimerKind};
use super::history::{StateHistory, StateTransition};
use super::rules::{PhaseRules, Trigger};
use super::state::{GamePhase, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Delays the game schedules between cues.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Timing {
    /// From a playback flash until presses are accepted.
    pub settle: Duration,
    /// From a completed round until the next color is shown.
    pub round_pause: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(500),
            round_pause: Duration::from_millis(1000),
        }
    }
}

/// An event delivered to the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum InputEvent {
    /// Any key on the keyboard.
    AnyKey,
    /// A pad was pressed.
    Press(Color),
    /// A previously scheduled timer fired.
    Timer(Timer),
}

/// Why an event changed nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Ignored {
    /// "Any key" while a game is running.
    AlreadyStarted,
    /// A press outside the input window.
    NotAcceptingInput,
    /// A timer issued before the latest timer, start or game over.
    StaleTimer,
    /// A current timer arriving in a phase that does not expect it.
    UnexpectedTimer,
}

/// What an event did.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// A new game began with this first color.
    Started { first: Color },
    /// The input window opened.
    InputOpened,
    /// The press matched; `remaining` presses finish the round.
    Correct { remaining: usize },
    /// The whole pattern was reproduced.
    RoundComplete { level: usize },
    /// The pattern grew by one color.
    Extended { color: Color, level: usize },
    /// The press missed.
    GameOver(GameOverReport),
    Ignored(Ignored),
}

/// Result of feeding one event to the game.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reaction {
    pub outcome: Outcome,
    pub cues: Vec<Cue>,
}

impl Reaction {
    fn ignored(reason: Ignored) -> Self {
        debug!(?reason, "event ignored");
        Self {
            outcome: Outcome::Ignored(reason),
            cues: Vec::new(),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self.outcome, Outcome::Ignored(_))
    }

    /// The timer this reaction asks to schedule, if any.
    pub fn scheduled(&self) -> Option<Timer> {
        self.cues.iter().find_map(|cue| match cue {
            Cue::Schedule(timer) => Some(*timer),
            _ => None,
        })
    }
}

/// The game state machine.
///
/// # Example
///
/// ```rust
/// use pattern_recall::core::{Color, Game, GamePhase, Outcome, ScriptedColors};
///
/// let mut colors = ScriptedColors::new([Color::Red, Color::Blue]);
/// let mut game = Game::default();
///
/// let started = game.start(&mut colors);
/// assert_eq!(started.outcome, Outcome::Started { first: Color::Red });
///
/// // Presses are ignored until the settle timer fires.
/// assert!(game.submit_press(Color::Red).is_ignored());
///
/// let settle = started.scheduled().unwrap();
/// game.timer_fired(settle, &mut colors);
/// assert_eq!(game.phase(), GamePhase::AwaitingInput);
///
/// let done = game.submit_press(Color::Red);
/// assert_eq!(done.outcome, Outcome::RoundComplete { level: 1 });
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    phase: GamePhase,
    pattern: Vec<Color>,
    user_input: Vec<Color>,
    started: bool,
    accepting_input: bool,
    epoch: u64,
    timing: Timing,
    rules: PhaseRules,
    history: StateHistory<GamePhase>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Game {
    pub fn new(timing: Timing) -> Self {
        Self {
            phase: GamePhase::Idle,
            pattern: Vec::new(),
            user_input: Vec::new(),
            started: false,
            accepting_input: false,
            epoch: 0,
            timing,
            rules: PhaseRules::standard(),
            history: StateHistory::new(),
        }
    }

    /// Route an event to the matching operation.
    pub fn react<C: ColorSource>(&mut self, event: InputEvent, colors: &mut C) -> Reaction {
        match event {
            InputEvent::AnyKey => self.start(colors),
            InputEvent::Press(color) => self.submit_press(color),
            InputEvent::Timer(timer) => self.timer_fired(timer, colors),
        }
    }

    /// Start a new game, or restart after a miss.
    ///
    /// Ignored while a game is running.
    pub fn start<C: ColorSource>(&mut self, colors: &mut C) -> Reaction {
        if !self.transition(Trigger::AnyKey) {
            return Reaction::ignored(Ignored::AlreadyStarted);
        }

        self.pattern.clear();
        self.user_input.clear();
        self.started = true;
        self.accepting_input = false;
        self.epoch += 1;
        info!(epoch = self.epoch, "game started");

        let mut cues = vec![Cue::ClearBoard];
        let first = self.advance(colors, &mut cues);
        Reaction {
            outcome: Outcome::Started { first },
            cues,
        }
    }

    /// Handle a pad press.
    ///
    /// Ignored unless the input window is open.
    pub fn submit_press(&mut self, color: Color) -> Reaction {
        let Some(&expected) = self.pattern.get(self.user_input.len()) else {
            return Reaction::ignored(Ignored::NotAcceptingInput);
        };
        if !self.transition(Trigger::Press) {
            return Reaction::ignored(Ignored::NotAcceptingInput);
        }

        self.user_input.push(color);
        let mut cues = vec![Cue::AnimatePress(color)];

        if color != expected {
            self.transition(Trigger::Mismatched);
            let report = self.end(expected, color);
            cues.push(Cue::PlaySound(Sound::Failure));
            cues.push(Cue::GameOver(report.clone()));
            return Reaction {
                outcome: Outcome::GameOver(report),
                cues,
            };
        }

        cues.push(Cue::PlaySound(color.into()));

        let remaining = self.pattern.len() - self.user_input.len();
        if remaining > 0 {
            self.transition(Trigger::Matched);
            return Reaction {
                outcome: Outcome::Correct { remaining },
                cues,
            };
        }

        self.transition(Trigger::RoundMatched);
        self.user_input.clear();
        self.accepting_input = false;
        cues.push(Cue::Schedule(self.issue_timer(TimerKind::NextRound)));
        Reaction {
            outcome: Outcome::RoundComplete {
                level: self.level(),
            },
            cues,
        }
    }

    /// Apply a timer previously requested through [`Cue::Schedule`].
    pub fn timer_fired<C: ColorSource>(&mut self, timer: Timer, colors: &mut C) -> Reaction {
        if timer.epoch != self.epoch {
            return Reaction::ignored(Ignored::StaleTimer);
        }

        match timer.kind {
            TimerKind::SettleInput => {
                if !self.transition(Trigger::SettleElapsed) {
                    return Reaction::ignored(Ignored::UnexpectedTimer);
                }
                self.accepting_input = true;
                Reaction {
                    outcome: Outcome::InputOpened,
                    cues: Vec::new(),
                }
            }
            TimerKind::NextRound => {
                if !self.transition(Trigger::PauseElapsed) {
                    return Reaction::ignored(Ignored::UnexpectedTimer);
                }
                let mut cues = Vec::new();
                let color = self.advance(colors, &mut cues);
                Reaction {
                    outcome: Outcome::Extended {
                        color,
                        level: self.level(),
                    },
                    cues,
                }
            }
        }
    }

    /// Grow the pattern by one color and play it back.
    fn advance<C: ColorSource>(&mut self, colors: &mut C, cues: &mut Vec<Cue>) -> Color {
        debug_assert_eq!(self.phase, GamePhase::Playback);

        let color = colors.next_color();
        self.pattern.push(color);
        debug!(%color, level = self.level(), "pattern extended");

        cues.push(Cue::Flash(color));
        cues.push(Cue::PlaySound(color.into()));
        cues.push(Cue::ShowLevel(self.level()));
        cues.push(Cue::Schedule(self.issue_timer(TimerKind::SettleInput)));
        color
    }

    /// Capture the report, then reset.
    fn end(&mut self, expected: Color, pressed: Color) -> GameOverReport {
        let report = GameOverReport {
            level: self.level(),
            expected,
            pressed,
            pattern: std::mem::take(&mut self.pattern),
        };

        self.user_input.clear();
        self.started = false;
        self.accepting_input = false;
        self.epoch += 1;
        info!(
            level = report.level,
            %expected,
            %pressed,
            "game over"
        );
        report
    }

    /// New timer stamped with a fresh epoch; older timers become stale.
    fn issue_timer(&mut self, kind: TimerKind) -> Timer {
        self.epoch += 1;
        let delay = match kind {
            TimerKind::SettleInput => self.timing.settle,
            TimerKind::NextRound => self.timing.round_pause,
        };
        Timer {
            kind,
            epoch: self.epoch,
            delay,
        }
    }

    fn transition(&mut self, on: Trigger) -> bool {
        let Some(to) = self.rules.resolve(self, on) else {
            return false;
        };
        let from = self.phase;
        // A start opens a fresh record for the new game.
        let history = if on == Trigger::AnyKey {
            StateHistory::new()
        } else {
            std::mem::take(&mut self.history)
        };
        self.history = history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            level: self.level(),
        });
        self.phase = to;
        debug!(from = from.name(), to = to.name(), trigger = ?on, "phase transition");
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pattern(&self) -> &[Color] {
        &self.pattern
    }

    pub fn user_input(&self) -> &[Color] {
        &self.user_input
    }

    /// Current level. Always the pattern length.
    pub fn level(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_accepting_input(&self) -> bool {
        self.accepting_input
    }

    /// Generation of the newest timer; anything older is ignored.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Every phase change made during this session.
    pub fn history(&self) -> &StateHistory<GamePhase> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedColors;

    fn open_input(game: &mut Game, reaction: &Reaction, colors: &mut ScriptedColors) {
        let timer = reaction.scheduled().expect("reaction schedules a timer");
        assert_eq!(timer.kind, TimerKind::SettleInput);
        let opened = game.timer_fired(timer, colors);
        assert_eq!(opened.outcome, Outcome::InputOpened);
    }

    fn play_round(game: &mut Game) -> Reaction {
        let pattern = game.pattern().to_vec();
        let mut last = None;
        for color in pattern {
            last = Some(game.submit_press(color));
        }
        last.expect("pattern is never empty during a round")
    }

    #[test]
    fn start_plays_the_first_color() {
        let mut colors = ScriptedColors::new([Color::Red]);
        let mut game = Game::default();

        let reaction = game.start(&mut colors);

        assert_eq!(reaction.outcome, Outcome::Started { first: Color::Red });
        assert_eq!(
            reaction.cues,
            vec![
                Cue::ClearBoard,
                Cue::Flash(Color::Red),
                Cue::PlaySound(Sound::Pad(Color::Red)),
                Cue::ShowLevel(1),
                Cue::Schedule(Timer {
                    kind: TimerKind::SettleInput,
                    epoch: game.epoch(),
                    delay: Duration::from_millis(500),
                }),
            ]
        );
        assert_eq!(game.phase(), GamePhase::Playback);
        assert!(game.is_started());
        assert!(!game.is_accepting_input());
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn press_during_playback_is_ignored() {
        let mut colors = ScriptedColors::new([Color::Green]);
        let mut game = Game::default();
        game.start(&mut colors);

        let reaction = game.submit_press(Color::Green);

        assert_eq!(reaction.outcome, Outcome::Ignored(Ignored::NotAcceptingInput));
        assert!(reaction.cues.is_empty());
        assert!(game.user_input().is_empty());
        assert_eq!(game.phase(), GamePhase::Playback);
    }

    #[test]
    fn press_before_any_game_is_ignored() {
        let mut game = Game::default();
        assert!(game.submit_press(Color::Blue).is_ignored());
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn settle_timer_opens_input() {
        let mut colors = ScriptedColors::new([Color::Yellow]);
        let mut game = Game::default();
        let started = game.start(&mut colors);

        open_input(&mut game, &started, &mut colors);

        assert_eq!(game.phase(), GamePhase::AwaitingInput);
        assert!(game.is_accepting_input());
    }

    #[test]
    fn completed_round_extends_to_level_two() {
        let mut colors = ScriptedColors::new([Color::Red, Color::Green]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);

        let done = game.submit_press(Color::Red);
        assert_eq!(done.outcome, Outcome::RoundComplete { level: 1 });
        assert_eq!(
            &done.cues[..2],
            &[
                Cue::AnimatePress(Color::Red),
                Cue::PlaySound(Sound::Pad(Color::Red)),
            ]
        );
        assert_eq!(game.phase(), GamePhase::Playback);
        assert!(game.user_input().is_empty());
        assert!(!game.is_accepting_input());

        let pause = done.scheduled().unwrap();
        assert_eq!(pause.kind, TimerKind::NextRound);
        assert_eq!(pause.delay, Duration::from_millis(1000));

        let next = game.timer_fired(pause, &mut colors);
        assert_eq!(
            next.outcome,
            Outcome::Extended {
                color: Color::Green,
                level: 2
            }
        );
        assert_eq!(game.pattern(), &[Color::Red, Color::Green]);
        assert_eq!(game.level(), 2);
    }

    #[test]
    fn partial_match_keeps_waiting() {
        let mut colors = ScriptedColors::new([Color::Green, Color::Blue]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);
        let done = play_round(&mut game);
        let next = game.timer_fired(done.scheduled().unwrap(), &mut colors);
        open_input(&mut game, &next, &mut colors);

        let first = game.submit_press(Color::Green);

        assert_eq!(first.outcome, Outcome::Correct { remaining: 1 });
        assert_eq!(game.phase(), GamePhase::AwaitingInput);
        assert_eq!(game.user_input(), &[Color::Green]);
        assert!(first.scheduled().is_none());
    }

    #[test]
    fn miss_reports_expected_and_pressed_colors() {
        let mut colors = ScriptedColors::new([Color::Green, Color::Blue]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);
        let done = play_round(&mut game);
        let next = game.timer_fired(done.scheduled().unwrap(), &mut colors);
        open_input(&mut game, &next, &mut colors);

        game.submit_press(Color::Green);
        let miss = game.submit_press(Color::Yellow);

        let report = GameOverReport {
            level: 2,
            expected: Color::Blue,
            pressed: Color::Yellow,
            pattern: vec![Color::Green, Color::Blue],
        };
        assert_eq!(miss.outcome, Outcome::GameOver(report.clone()));
        assert_eq!(
            miss.cues,
            vec![
                Cue::AnimatePress(Color::Yellow),
                Cue::PlaySound(Sound::Failure),
                Cue::GameOver(report),
            ]
        );
    }

    #[test]
    fn game_over_resets_everything() {
        let mut colors = ScriptedColors::new([Color::Red]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);

        game.submit_press(Color::Blue);

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.pattern().is_empty());
        assert!(game.user_input().is_empty());
        assert_eq!(game.level(), 0);
        assert!(!game.is_started());
        assert!(!game.is_accepting_input());
        assert!(game.submit_press(Color::Red).is_ignored());
    }

    #[test]
    fn any_key_mid_game_is_ignored() {
        let mut colors = ScriptedColors::new([Color::Red, Color::Red]);
        let mut game = Game::default();
        game.start(&mut colors);

        let again = game.start(&mut colors);

        assert_eq!(again.outcome, Outcome::Ignored(Ignored::AlreadyStarted));
        assert_eq!(game.pattern(), &[Color::Red]);
    }

    #[test]
    fn restart_after_game_over_begins_fresh() {
        let mut colors = ScriptedColors::new([Color::Red, Color::Yellow]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);
        game.submit_press(Color::Green);

        let restarted = game.start(&mut colors);

        assert_eq!(
            restarted.outcome,
            Outcome::Started {
                first: Color::Yellow
            }
        );
        assert_eq!(restarted.cues[0], Cue::ClearBoard);
        assert_eq!(game.pattern(), &[Color::Yellow]);
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn timer_from_a_previous_game_is_stale() {
        let mut colors = ScriptedColors::new([Color::Red, Color::Blue]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        let old_settle = started.scheduled().unwrap();
        game.timer_fired(old_settle, &mut colors);
        game.submit_press(Color::Green);
        game.start(&mut colors);

        let reaction = game.timer_fired(old_settle, &mut colors);

        assert_eq!(reaction.outcome, Outcome::Ignored(Ignored::StaleTimer));
        assert_eq!(game.phase(), GamePhase::Playback);
        assert!(!game.is_accepting_input());
    }

    #[test]
    fn duplicate_timer_is_unexpected() {
        let mut colors = ScriptedColors::new([Color::Red]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        let settle = started.scheduled().unwrap();
        game.timer_fired(settle, &mut colors);

        let again = game.timer_fired(settle, &mut colors);

        assert_eq!(again.outcome, Outcome::Ignored(Ignored::UnexpectedTimer));
        assert_eq!(game.phase(), GamePhase::AwaitingInput);
    }

    #[test]
    fn react_routes_events() {
        let mut colors = ScriptedColors::new([Color::Blue]);
        let mut game = Game::default();

        let started = game.react(InputEvent::AnyKey, &mut colors);
        let settle = started.scheduled().unwrap();
        game.react(InputEvent::Timer(settle), &mut colors);
        let done = game.react(InputEvent::Press(Color::Blue), &mut colors);

        assert_eq!(done.outcome, Outcome::RoundComplete { level: 1 });
    }

    #[test]
    fn custom_timing_flows_into_timers() {
        let timing = Timing {
            settle: Duration::from_millis(50),
            round_pause: Duration::from_millis(75),
        };
        let mut colors = ScriptedColors::new([Color::Red]);
        let mut game = Game::new(timing);

        let started = game.start(&mut colors);

        assert_eq!(started.scheduled().unwrap().delay, Duration::from_millis(50));
    }

    #[test]
    fn history_tracks_a_full_game() {
        let mut colors = ScriptedColors::new([Color::Red]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);
        game.submit_press(Color::Blue);

        assert_eq!(
            game.history().get_path(),
            vec![
                &GamePhase::Idle,
                &GamePhase::Playback,
                &GamePhase::AwaitingInput,
                &GamePhase::Evaluating,
                &GamePhase::GameOver,
            ]
        );
    }

    #[test]
    fn restart_begins_a_fresh_history() {
        let mut colors = ScriptedColors::new([Color::Red, Color::Green]);
        let mut game = Game::default();
        let started = game.start(&mut colors);
        open_input(&mut game, &started, &mut colors);
        game.submit_press(Color::Blue);

        let restarted = game.start(&mut colors);
        open_input(&mut game, &restarted, &mut colors);

        assert_eq!(
            game.history().get_path(),
            vec![
                &GamePhase::GameOver,
                &GamePhase::Playback,
                &GamePhase::AwaitingInput,
            ]
        );
    }

    #[test]
    fn ignored_start_keeps_the_history() {
        let mut colors = ScriptedColors::new([Color::Red]);
        let mut game = Game::default();
        game.start(&mut colors);

        let again = game.start(&mut colors);

        assert!(again.is_ignored());
        assert_eq!(game.history().len(), 1);
    }
}
