//! Controller that feeds events to the game and performs the resulting cues.

use super::dispatch::perform;
use super::env::GameEnv;
use super::error::ShellError;
use crate::core::{ColorSource, Game, InputEvent, Outcome, Reaction};
use stillwater::effect::Effect;
use tracing::debug;

/// Owns one game and the color source that grows its pattern.
///
/// `react` is the pure half: it updates the game and hands back the cues.
/// `handle` also runs those cues against a [`GameEnv`].
pub struct GameController<C: ColorSource> {
    game: Game,
    colors: C,
}

impl<C: ColorSource> GameController<C> {
    pub fn new(game: Game, colors: C) -> Self {
        Self { game, colors }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Apply an event without performing any cues.
    pub fn react(&mut self, event: InputEvent) -> Reaction {
        self.game.react(event, &mut self.colors)
    }

    /// Apply an event and perform its cues.
    pub async fn handle(&mut self, event: InputEvent, env: &GameEnv) -> Result<Outcome, ShellError> {
        let Reaction { outcome, cues } = self.react(event);
        if !cues.is_empty() {
            let performed = perform(cues).run(env).await?;
            debug!(performed, ?outcome, "reaction performed");
        }
        Ok(outcome)
    }

    /// Take the controller apart.
    pub fn into_parts(self) -> (Game, C) {
        (self.game, self.colors)
    }
}
