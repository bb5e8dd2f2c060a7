//! Start screens: the difficulty picker and the lobby.

use super::{Input, SceneCommand, SceneController, SceneEnv, SceneKind};
use crate::core::ConfigError;

/// Landscape start screen. A difficulty button leads to the lobby.
#[derive(Clone, Debug, Default)]
pub struct DifficultySelectScene;

impl SceneController for DifficultySelectScene {
    fn kind(&self) -> SceneKind {
        SceneKind::DifficultySelect
    }

    fn enter(&mut self, _env: &mut SceneEnv<'_>, _now: u64) -> Result<(), ConfigError> {
        Ok(())
    }

    fn handle_input(&mut self, env: &mut SceneEnv<'_>, input: Input, _now: u64) -> SceneCommand {
        match input {
            Input::Choose(difficulty) => {
                env.ctx.difficulty = difficulty;
                tracing::debug!(target: "scene", %difficulty, "difficulty chosen");
                SceneCommand::SwitchTo(SceneKind::Lobby)
            }
            _ => SceneCommand::None,
        }
    }

    fn advance(&mut self, _env: &mut SceneEnv<'_>, _now: u64) -> SceneCommand {
        SceneCommand::None
    }
}

/// Attract screen. Any tap starts a round.
#[derive(Clone, Debug, Default)]
pub struct LobbyScene;

impl SceneController for LobbyScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Lobby
    }

    fn enter(&mut self, _env: &mut SceneEnv<'_>, _now: u64) -> Result<(), ConfigError> {
        Ok(())
    }

    fn handle_input(&mut self, _env: &mut SceneEnv<'_>, input: Input, _now: u64) -> SceneCommand {
        if input.is_tap() {
            SceneCommand::SwitchTo(SceneKind::Play)
        } else {
            SceneCommand::None
        }
    }

    fn advance(&mut self, _env: &mut SceneEnv<'_>, _now: u64) -> SceneCommand {
        SceneCommand::None
    }
}
