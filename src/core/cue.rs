//! Cues: the side effects a reaction asks the shell to perform.
//!
//! The game never talks to the screen, speakers or clock directly. Each
//! operation returns an ordered list of cues and the shell carries them out.

use super::color::{Color, Sound};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What a scheduled timer does when it fires.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the playback flash; opens the input window.
    SettleInput,
    /// End of the pause after a completed round; extends the pattern.
    NextRound,
}

/// A delayed event, stamped with the epoch it was issued under.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Timer {
    pub kind: TimerKind,
    pub epoch: u64,
    pub delay: Duration,
}

/// Everything the presentation layer needs to draw the game-over screen.
///
/// Built before the game resets, so nothing here depends on reading game
/// state afterwards.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameOverReport {
    /// Level reached when the miss happened.
    pub level: usize,
    /// The color that should have been pressed.
    pub expected: Color,
    /// The color that was pressed.
    pub pressed: Color,
    /// The full pattern of the finished game.
    pub pattern: Vec<Color>,
}

impl GameOverReport {
    /// Headline shown over the board.
    pub fn message(&self) -> String {
        format!(
            "Game over! You reached level {}. Press any key to restart.",
            self.level
        )
    }
}

impl fmt::Display for GameOverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A single side effect, in dispatch order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Cue {
    /// Remove game-over markers and hide the overlay.
    ClearBoard,
    /// Highlight a pad as part of playback.
    Flash(Color),
    /// Brief pressed-state animation for player feedback.
    AnimatePress(Color),
    PlaySound(Sound),
    /// Update the level title.
    ShowLevel(usize),
    GameOver(GameOverReport),
    Schedule(Timer),
}

impl Cue {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ClearBoard => "clear_board",
            Self::Flash(_) => "flash",
            Self::AnimatePress(_) => "animate_press",
            Self::PlaySound(_) => "play_sound",
            Self::ShowLevel(_) => "show_level",
            Self::GameOver(_) => "game_over",
            Self::Schedule(_) => "schedule",
        }
    }
}

/// Level title, e.g. `Level 3`.
pub fn level_title(level: usize) -> String {
    format!("Level {level}")
}
