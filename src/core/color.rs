//! The four-color palette, the sounds bound to it, and sources of new colors.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four pads on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Yellow,
    Blue,
}

/// The palette, in board order.
pub const PALETTE: [Color; 4] = [Color::Green, Color::Red, Color::Yellow, Color::Blue];

impl Color {
    /// Lowercase identifier, also used as the pad's element id and sound name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        }
    }

    /// Position in [`PALETTE`].
    pub fn index(&self) -> usize {
        match self {
            Self::Green => 0,
            Self::Red => 1,
            Self::Yellow => 2,
            Self::Blue => 3,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown color '{0}', expected one of green, red, yellow, blue")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts full names and single-letter shortcuts, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" | "g" => Ok(Self::Green),
            "red" | "r" => Ok(Self::Red),
            "yellow" | "y" => Ok(Self::Yellow),
            "blue" | "b" => Ok(Self::Blue),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// A named sound clip.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Sound {
    /// The tone of a pad.
    Pad(Color),
    /// Played once on a miss.
    Failure,
}

impl Sound {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pad(color) => color.as_str(),
            Self::Failure => "wrong",
        }
    }

    /// Asset file name, e.g. `red.mp3`.
    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.name())
    }
}

impl From<Color> for Sound {
    fn from(color: Color) -> Self {
        Self::Pad(color)
    }
}

/// Supplies the next color appended to the pattern.
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

/// Uniform draw from [`PALETTE`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPalette<R> {
    rng: R,
}

impl<R: Rng> RandomPalette<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ColorSource for RandomPalette<R> {
    fn next_color(&mut self) -> Color {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }
}

/// Replays a fixed list of colors, then cycles through the palette.
///
/// Used to drive the game through known patterns.
#[derive(Debug, Clone, Default)]
pub struct ScriptedColors {
    queue: VecDeque<Color>,
    fallback: usize,
}

impl ScriptedColors {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            queue: colors.into_iter().collect(),
            fallback: 0,
        }
    }

    /// Queue more colors after the ones already scripted.
    pub fn push(&mut self, color: Color) {
        self.queue.push_back(color);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> Color {
        self.queue.pop_front().unwrap_or_else(|| {
            let color = PALETTE[self.fallback % PALETTE.len()];
            self.fallback += 1;
            color
        })
    }
}

impl<C: ColorSource + ?Sized> ColorSource for &mut C {
    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}
