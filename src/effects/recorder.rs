//! A presentation and audio double that records what it was asked to do.

use super::env::{Audio, Presentation};
use crate::core::{Color, Cue, GameOverReport, Sound};
use parking_lot::Mutex;

/// Records every presentation and audio call as the cue that produced it.
///
/// Handy for headless runs and for asserting on what a player would have
/// seen and heard.
#[derive(Debug, Default)]
pub struct Recorder {
    log: Mutex<Vec<Cue>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn log(&self) -> Vec<Cue> {
        self.log.lock().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Cue> {
        std::mem::take(&mut *self.log.lock())
    }

    /// Sounds played so far, in order.
    pub fn sounds(&self) -> Vec<Sound> {
        self.log
            .lock()
            .iter()
            .filter_map(|cue| match cue {
                Cue::PlaySound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    /// The most recent game-over report, if any.
    pub fn last_game_over(&self) -> Option<GameOverReport> {
        self.log.lock().iter().rev().find_map(|cue| match cue {
            Cue::GameOver(report) => Some(report.clone()),
            _ => None,
        })
    }

    fn push(&self, cue: Cue) {
        self.log.lock().push(cue);
    }
}

impl Presentation for Recorder {
    fn reset_board(&self) {
        self.push(Cue::ClearBoard);
    }

    fn flash(&self, color: Color) {
        self.push(Cue::Flash(color));
    }

    fn animate_press(&self, color: Color) {
        self.push(Cue::AnimatePress(color));
    }

    fn show_level(&self, level: usize) {
        self.push(Cue::ShowLevel(level));
    }

    fn show_game_over(&self, report: &GameOverReport) {
        self.push(Cue::GameOver(report.clone()));
    }
}

impl Audio for Recorder {
    fn play(&self, sound: Sound) {
        self.push(Cue::PlaySound(sound));
    }
}
