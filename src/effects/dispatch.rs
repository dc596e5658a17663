//! Turning cues into a Stillwater effect.

use super::env::GameEnv;
use super::error::ShellError;
use crate::core::Cue;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Carry out `cues` in order against the environment.
///
/// Returns the number of cues performed. A failing cue stops the run;
/// the cues before it have already happened.
pub fn perform(cues: Vec<Cue>) -> impl Effect<Output = usize, Error = ShellError, Env = GameEnv> {
    from_fn(move |env: &GameEnv| -> Result<usize, ShellError> {
        for cue in &cues {
            env.apply(cue)?;
        }
        Ok(cues.len())
    })
}
