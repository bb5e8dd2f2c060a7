//! Winner and play-again screens.
//!
//! Both show a random bilingual message, restart on any tap and fall back
//! to the start screen when left alone for `end_screen_ms`.

use super::{Input, SceneCommand, SceneController, SceneCue, SceneEnv, SceneKind};
use crate::core::ConfigError;
use crate::schedule::{Scheduler, TimerId};

#[derive(Clone, Debug)]
pub struct EndScene {
    kind: SceneKind,
    timers: Scheduler<()>,
    timeout: Option<TimerId>,
    expired_at: Option<u64>,
}

impl EndScene {
    /// End screen shown after a win.
    #[must_use]
    pub fn winner() -> Self {
        Self::new(SceneKind::Winner)
    }

    /// End screen shown after a loss.
    #[must_use]
    pub fn play_again() -> Self {
        Self::new(SceneKind::PlayAgain)
    }

    fn new(kind: SceneKind) -> Self {
        Self {
            kind,
            timers: Scheduler::default(),
            timeout: None,
            expired_at: None,
        }
    }
}

impl SceneController for EndScene {
    fn kind(&self) -> SceneKind {
        self.kind
    }

    fn enter(&mut self, env: &mut SceneEnv<'_>, now: u64) -> Result<(), ConfigError> {
        if let Some(message) = env.messages.pick(env.rng) {
            env.cues.push(SceneCue::Message(message));
        }

        self.timers = Scheduler::new(now);
        let end_screen_ms = env.ctx.timing().end_screen_ms;
        self.timeout = Some(self.timers.schedule(end_screen_ms, ()));
        Ok(())
    }

    fn handle_input(&mut self, _env: &mut SceneEnv<'_>, input: Input, _now: u64) -> SceneCommand {
        if !input.is_tap() {
            return SceneCommand::None;
        }
        if let Some(id) = self.timeout.take() {
            self.timers.cancel(id);
        }
        SceneCommand::SwitchTo(SceneKind::Play)
    }

    fn advance(&mut self, _env: &mut SceneEnv<'_>, now: u64) -> SceneCommand {
        match self.timers.pop_due(now) {
            Some((id, ())) if self.timeout == Some(id) => {
                self.timeout = None;
                let due = self.timers.now();
                self.expired_at = Some(due);
                tracing::debug!(target: "scene", scene = %self.kind, due, now, "end screen timed out");
                SceneCommand::ReturnToStart
            }
            _ => SceneCommand::None,
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.next_due()
    }

    fn settled_at(&self) -> Option<u64> {
        self.expired_at
    }

    fn exit(&mut self, _env: &mut SceneEnv<'_>) {
        self.timers.clear();
        self.timeout = None;
    }
}
