//! The play scene: one `Session` from deal to outcome.

use super::{Input, SceneCommand, SceneController, SceneCue, SceneEnv, SceneKind};
use crate::core::ConfigError;
use crate::session::Session;
use crate::turn::RoundOutcome;

/// Deals a fresh round on entry and forwards taps to it.
#[derive(Clone, Debug, Default)]
pub struct PlayScene {
    session: Option<Session>,
}

impl PlayScene {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Forward round cues and map a finished round to the next scene.
    fn settle(&mut self, env: &mut SceneEnv<'_>) -> SceneCommand {
        let Some(session) = self.session.as_mut() else {
            return SceneCommand::None;
        };

        env.cues
            .extend(session.drain_cues().into_iter().map(SceneCue::Round));

        match session.outcome() {
            None => SceneCommand::None,
            Some(RoundOutcome::Won) => SceneCommand::SwitchTo(SceneKind::Winner),
            Some(RoundOutcome::Lost) => SceneCommand::SwitchTo(SceneKind::PlayAgain),
            Some(RoundOutcome::TimedOut) => SceneCommand::ReturnToStart,
        }
    }
}

impl SceneController for PlayScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Play
    }

    fn enter(&mut self, env: &mut SceneEnv<'_>, now: u64) -> Result<(), ConfigError> {
        let seed = env.rng.next_seed();
        self.session = Some(Session::deal(env.ctx, seed, now)?);
        self.settle(env);
        Ok(())
    }

    fn handle_input(&mut self, env: &mut SceneEnv<'_>, input: Input, now: u64) -> SceneCommand {
        let Some(session) = self.session.as_mut() else {
            return SceneCommand::None;
        };

        let result = match input {
            Input::TapCard(card) => session.tap_card(card, now),
            Input::TapEmpty => session.tap_empty(now),
            Input::Choose(_) => return SceneCommand::None,
        };
        tracing::trace!(target: "scene", ?input, ?result, now, "play input");

        self.settle(env)
    }

    fn advance(&mut self, env: &mut SceneEnv<'_>, now: u64) -> SceneCommand {
        if let Some(session) = self.session.as_mut() {
            session.advance(now);
        }
        self.settle(env)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.session.as_ref().and_then(Session::next_deadline)
    }

    fn settled_at(&self) -> Option<u64> {
        self.session.as_ref().and_then(Session::ended_at)
    }
}
