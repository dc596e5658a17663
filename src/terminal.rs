//! Plain-text frontend: renders cues as lines and reads presses from text.

use crate::core::{level_title, Color, GameOverReport, InputEvent, Sound};
use crate::effects::{Audio, Presentation};
use parking_lot::Mutex;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Map a line of input to an event.
///
/// Until a game is running every line, color keys included, counts as
/// "any key". During a game a color name or its first letter presses that
/// pad and anything else is "any key".
pub fn event_from_line(line: &str, started: bool) -> InputEvent {
    if !started {
        return InputEvent::AnyKey;
    }
    match line.parse::<Color>() {
        Ok(color) => InputEvent::Press(color),
        Err(_) => InputEvent::AnyKey,
    }
}

/// Text board writing to any sink.
pub struct TextBoard<W: Write + Send> {
    out: Mutex<W>,
}

impl TextBoard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TextBoard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            warn!(%err, "failed to write to board");
        }
    }
}

impl<W: Write + Send> Presentation for TextBoard<W> {
    fn reset_board(&self) {
        self.line("");
    }

    fn flash(&self, color: Color) {
        self.line(&format!("  >> {}", color.as_str().to_uppercase()));
    }

    fn animate_press(&self, color: Color) {
        self.line(&format!("  [{color}]"));
    }

    fn show_level(&self, level: usize) {
        self.line(&level_title(level));
    }

    fn show_game_over(&self, report: &GameOverReport) {
        self.line(&report.message());
        self.line(&format!("  {:<7} <- correct", report.expected));
        self.line(&format!("  {:<7} <- Got you :P", report.pressed));
        let history = report
            .pattern
            .iter()
            .map(Color::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        self.line(&format!("  history: {history}"));
    }
}

/// Rings the terminal bell for every clip unless muted.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    muted: bool,
}

impl TerminalBell {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl Audio for TerminalBell {
    fn play(&self, sound: Sound) {
        debug!(clip = %sound.file_name(), "play");
        if self.muted {
            return;
        }
        let mut bell = io::stderr();
        if let Err(err) = bell.write_all(b"\x07").and_then(|_| bell.flush()) {
            warn!(%err, "failed to ring the bell");
        }
    }
}
