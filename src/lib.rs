//! Pattern Recall: a repeat-the-pattern memory game.
//!
//! The game shows a growing random sequence over four colors and checks
//! that the player reproduces it. It is built as a pure core with an
//! imperative shell around it:
//!
//! - [`core`]: the game state machine, its phases, rules and history. No I/O.
//! - [`effects`]: presentation, audio and scheduler seams, plus the
//!   controller that performs the cues the core emits.
//! - [`runtime`]: a hand-driven virtual clock and a tokio-backed scheduler.
//! - [`config`]: JSON configuration with accumulating validation.
//! - [`terminal`]: a plain-text frontend.
//!
//! # Example
//!
//! ```rust
//! use pattern_recall::core::{Color, Game, InputEvent, Outcome, ScriptedColors};
//! use pattern_recall::effects::{GameController, GameEnv, Recorder};
//! use pattern_recall::runtime::VirtualClock;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let recorder = Arc::new(Recorder::new());
//! let clock = Arc::new(VirtualClock::new());
//! let env = GameEnv::new(recorder.clone(), recorder.clone(), clock.clone());
//!
//! let mut controller = GameController::new(Game::default(), ScriptedColors::new([Color::Red]));
//! controller.handle(InputEvent::AnyKey, &env).await.unwrap();
//!
//! let settle = clock.fire_next().unwrap();
//! controller.handle(InputEvent::Timer(settle), &env).await.unwrap();
//!
//! let outcome = controller.handle(InputEvent::Press(Color::Red), &env).await.unwrap();
//! assert_eq!(outcome, Outcome::RoundComplete { level: 1 });
//! # });
//! ```

pub mod config;
pub mod core;
pub mod effects;
pub mod runtime;
pub mod terminal;

pub use crate::core::{Color, Game, GamePhase, InputEvent, Outcome, State};
pub use config::GameConfig;
pub use effects::{GameController, GameEnv};
