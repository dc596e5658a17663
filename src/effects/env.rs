//! Collaborators the game talks to through the shell.

use super::error::ShellError;
use crate::core::{Color, Cue, GameOverReport, Sound, Timer};
use std::sync::Arc;
use tracing::debug;

/// Draws the board.
pub trait Presentation: Send + Sync {
    /// Clear game-over markers and hide the overlay.
    fn reset_board(&self);
    fn flash(&self, color: Color);
    fn animate_press(&self, color: Color);
    fn show_level(&self, level: usize);
    /// Show the game-over overlay, the per-pad markers and the history strip.
    fn show_game_over(&self, report: &GameOverReport);
}

/// Plays sound clips. Fire-and-forget.
pub trait Audio: Send + Sync {
    fn play(&self, sound: Sound);
}

/// Delivers a timer back to the game once its delay has passed.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, timer: Timer) -> Result<(), ShellError>;
}

/// Audio sink that discards every clip.
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl Audio for Muted {
    fn play(&self, _sound: Sound) {}
}

/// Everything a cue may need, passed to effects as their environment.
#[derive(Clone)]
pub struct GameEnv {
    presentation: Arc<dyn Presentation>,
    audio: Arc<dyn Audio>,
    scheduler: Arc<dyn Scheduler>,
}

impl GameEnv {
    pub fn new(
        presentation: Arc<dyn Presentation>,
        audio: Arc<dyn Audio>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            presentation,
            audio,
            scheduler,
        }
    }

    /// Carry out a single cue.
    pub fn apply(&self, cue: &Cue) -> Result<(), ShellError> {
        debug!(cue = cue.label(), "dispatching cue");
        match cue {
            Cue::ClearBoard => self.presentation.reset_board(),
            Cue::Flash(color) => self.presentation.flash(*color),
            Cue::AnimatePress(color) => self.presentation.animate_press(*color),
            Cue::PlaySound(sound) => self.audio.play(*sound),
            Cue::ShowLevel(level) => self.presentation.show_level(*level),
            Cue::GameOver(report) => self.presentation.show_game_over(report),
            Cue::Schedule(timer) => self.scheduler.schedule(*timer)?,
        }
        Ok(())
    }
}
