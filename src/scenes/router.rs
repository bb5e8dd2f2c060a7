//! Scene router: owns the kiosk context and switches between scenes.

use super::{
    DifficultySelectScene, EndScene, Input, LobbyScene, PlayScene, SceneCommand, SceneController,
    SceneCue, SceneEnv, SceneKind,
};
use crate::core::{ConfigError, Difficulty, GameConfig, GameRng};
use crate::layout::{Orientation, Viewport};
use crate::messages::MessageBook;
use crate::session::{KioskContext, Session};

/// The active scene.
#[derive(Clone, Debug)]
enum ActiveScene {
    DifficultySelect(DifficultySelectScene),
    Lobby(LobbyScene),
    Play(PlayScene),
    End(EndScene),
}

impl ActiveScene {
    fn new(kind: SceneKind) -> Self {
        match kind {
            SceneKind::DifficultySelect => ActiveScene::DifficultySelect(DifficultySelectScene),
            SceneKind::Lobby => ActiveScene::Lobby(LobbyScene),
            SceneKind::Play => ActiveScene::Play(PlayScene::default()),
            SceneKind::Winner => ActiveScene::End(EndScene::winner()),
            SceneKind::PlayAgain => ActiveScene::End(EndScene::play_again()),
        }
    }

    fn controller(&self) -> &dyn SceneController {
        match self {
            ActiveScene::DifficultySelect(scene) => scene,
            ActiveScene::Lobby(scene) => scene,
            ActiveScene::Play(scene) => scene,
            ActiveScene::End(scene) => scene,
        }
    }

    fn controller_mut(&mut self) -> &mut dyn SceneController {
        match self {
            ActiveScene::DifficultySelect(scene) => scene,
            ActiveScene::Lobby(scene) => scene,
            ActiveScene::Play(scene) => scene,
            ActiveScene::End(scene) => scene,
        }
    }
}

/// Top-level state of a running kiosk.
///
/// ## Example
///
/// ```
/// use memory_kiosk::core::GameConfig;
/// use memory_kiosk::layout::Viewport;
/// use memory_kiosk::messages::MessageBook;
/// use memory_kiosk::scenes::{Input, SceneKind, SceneRouter};
///
/// let mut router = SceneRouter::boot(
///     GameConfig::default(),
///     Viewport::new(1080, 1920),
///     MessageBook::default(),
///     7,
///     0,
/// )
/// .unwrap();
///
/// assert_eq!(router.scene_kind(), SceneKind::Lobby);
/// router.handle_input(Input::TapEmpty, 1_000).unwrap();
/// assert_eq!(router.scene_kind(), SceneKind::Play);
/// assert_eq!(router.session().unwrap().registry().len(), 15);
/// ```
#[derive(Clone, Debug)]
pub struct SceneRouter {
    ctx: KioskContext,
    scene: ActiveScene,
    rng: GameRng,
    messages: MessageBook,
    cues: Vec<SceneCue>,
}

impl SceneRouter {
    /// Validate the configuration and enter the start screen at `now`.
    pub fn boot(
        config: GameConfig,
        viewport: Viewport,
        messages: MessageBook,
        seed: u64,
        now: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut router = Self {
            ctx: KioskContext::new(config, viewport),
            scene: ActiveScene::new(SceneKind::Lobby),
            rng: GameRng::new(seed),
            messages,
            cues: Vec::new(),
        };

        tracing::info!(
            target: "scene",
            %viewport,
            orientation = ?viewport.orientation(),
            messages = router.messages.len(),
            seed,
            "kiosk booted"
        );

        router.return_to_start(now)?;
        Ok(router)
    }

    /// Handle one input at `now`. Timers due at or before `now` fire first.
    pub fn handle_input(&mut self, input: Input, now: u64) -> Result<(), ConfigError> {
        self.advance(now)?;
        let command = self.dispatch(|scene, env| scene.handle_input(env, input, now));
        self.apply(command, now)
    }

    /// Fire everything due at or before `now`.
    ///
    /// A scene ended by a timer hands over at that timer's due time, and the
    /// next scene catches up to `now` in turn, so a late poll lands where a
    /// punctual one would have.
    pub fn advance(&mut self, now: u64) -> Result<(), ConfigError> {
        loop {
            let command = self.dispatch(|scene, env| scene.advance(env, now));
            if command == SceneCommand::None {
                return Ok(());
            }
            let at = self
                .scene
                .controller()
                .settled_at()
                .map_or(now, |at| at.min(now));
            self.apply(command, at)?;
        }
    }

    /// Record a new screen size. Takes effect on the next scene entry.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(target: "scene", %viewport, "viewport changed");
        self.ctx.viewport = viewport;
    }

    #[must_use]
    pub fn scene_kind(&self) -> SceneKind {
        self.scene.controller().kind()
    }

    /// The live round, while the play scene is active.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.scene {
            ActiveScene::Play(scene) => scene.session(),
            _ => None,
        }
    }

    #[must_use]
    pub fn context(&self) -> &KioskContext {
        &self.ctx
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.ctx.difficulty
    }

    /// When the active scene next needs `advance`.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.scene.controller().next_deadline()
    }

    /// Take every cue queued since the last drain.
    pub fn drain_cues(&mut self) -> Vec<SceneCue> {
        std::mem::take(&mut self.cues)
    }

    fn dispatch<R>(
        &mut self,
        f: impl FnOnce(&mut dyn SceneController, &mut SceneEnv<'_>) -> R,
    ) -> R {
        let mut env = SceneEnv {
            ctx: &mut self.ctx,
            rng: &mut self.rng,
            messages: &self.messages,
            cues: &mut self.cues,
        };
        f(self.scene.controller_mut(), &mut env)
    }

    fn apply(&mut self, command: SceneCommand, now: u64) -> Result<(), ConfigError> {
        match command {
            SceneCommand::None => Ok(()),
            SceneCommand::SwitchTo(kind) => self.switch_to(kind, now),
            SceneCommand::ReturnToStart => self.return_to_start(now),
        }
    }

    /// Portrait screens go to the lobby on easy; landscape screens to the picker.
    fn return_to_start(&mut self, now: u64) -> Result<(), ConfigError> {
        match self.ctx.orientation() {
            Orientation::Portrait => {
                self.ctx.difficulty = Difficulty::Easy;
                self.switch_to(SceneKind::Lobby, now)
            }
            Orientation::Landscape => self.switch_to(SceneKind::DifficultySelect, now),
        }
    }

    fn switch_to(&mut self, kind: SceneKind, now: u64) -> Result<(), ConfigError> {
        let from = self.scene_kind();
        self.dispatch(|scene, env| scene.exit(env));

        self.scene = ActiveScene::new(kind);
        self.cues.push(SceneCue::Entered(kind));
        tracing::info!(
            target: "scene",
            %from,
            to = %kind,
            difficulty = %self.ctx.difficulty,
            now,
            "scene switched"
        );

        self.dispatch(|scene, env| scene.enter(env, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTRAIT: Viewport = Viewport::new(1080, 1920);
    const LANDSCAPE: Viewport = Viewport::new(1920, 1080);

    fn boot(viewport: Viewport) -> SceneRouter {
        let messages = MessageBook::parse("Suerte \u{2014} Good luck\n");
        SceneRouter::boot(GameConfig::default(), viewport, messages, 11, 0).unwrap()
    }

    #[test]
    fn test_portrait_boot_goes_to_lobby_on_easy() {
        let mut router = boot(PORTRAIT);
        assert_eq!(router.scene_kind(), SceneKind::Lobby);
        assert_eq!(router.difficulty(), Difficulty::Easy);
        assert_eq!(router.drain_cues(), vec![SceneCue::Entered(SceneKind::Lobby)]);
    }

    #[test]
    fn test_landscape_boot_goes_to_picker() {
        let mut router = boot(LANDSCAPE);
        assert_eq!(router.scene_kind(), SceneKind::DifficultySelect);

        router.handle_input(Input::TapEmpty, 10).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::DifficultySelect);

        router.handle_input(Input::Choose(Difficulty::Hard), 20).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Lobby);
        assert_eq!(router.difficulty(), Difficulty::Hard);

        router.handle_input(Input::TapEmpty, 30).unwrap();
        assert_eq!(router.session().unwrap().registry().len(), 21);
    }

    #[test]
    fn test_boot_rejects_invalid_config() {
        let config = GameConfig::default().with_regular_pool(Vec::new());
        assert!(SceneRouter::boot(config, PORTRAIT, MessageBook::default(), 1, 0).is_err());
    }

    #[test]
    fn test_idle_play_returns_to_start() {
        let mut router = boot(PORTRAIT);
        router.handle_input(Input::TapEmpty, 0).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Play);
        assert_eq!(router.next_deadline(), Some(45_000));

        router.advance(45_000).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Play);
        router.advance(60_000).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Lobby);
        assert!(router.session().is_none());
    }

    #[test]
    fn test_end_screen_tap_replays_same_difficulty() {
        let mut router = boot(LANDSCAPE);
        router.handle_input(Input::Choose(Difficulty::Hard), 0).unwrap();
        router.handle_input(Input::TapEmpty, 0).unwrap();

        let winners: Vec<_> = router
            .session()
            .unwrap()
            .registry()
            .find(|c| c.kind().is_winner())
            .map(|c| c.id)
            .collect();
        router.handle_input(Input::TapCard(winners[0]), 100).unwrap();
        router.handle_input(Input::TapCard(winners[1]), 200).unwrap();
        router.advance(1_500).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Winner);

        let cues = router.drain_cues();
        assert!(cues.contains(&SceneCue::Message(crate::messages::BilingualMessage {
            spanish: "Suerte".to_string(),
            english: "Good luck".to_string(),
        })));

        router.handle_input(Input::TapEmpty, 2_000).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Play);
        assert_eq!(router.difficulty(), Difficulty::Hard);
        assert_eq!(
            router.session().unwrap().round().remaining_attempts(),
            10
        );
    }

    #[test]
    fn test_late_poll_catches_up_through_end_screen() {
        let mut router = boot(PORTRAIT);
        router.handle_input(Input::TapEmpty, 0).unwrap();
        router.drain_cues();

        let winners: Vec<_> = router
            .session()
            .unwrap()
            .registry()
            .find(|c| c.kind().is_winner())
            .map(|c| c.id)
            .collect();
        router.handle_input(Input::TapCard(winners[0]), 1_000).unwrap();
        router.handle_input(Input::TapCard(winners[1]), 1_000).unwrap();

        // Won at 2300; the winner screen would have timed out at 17300.
        router.advance(20_000).unwrap();
        assert_eq!(router.scene_kind(), SceneKind::Lobby);
        assert_eq!(router.next_deadline(), None);

        let entered: Vec<_> = router
            .drain_cues()
            .into_iter()
            .filter_map(|cue| match cue {
                SceneCue::Entered(kind) => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(entered, vec![SceneKind::Winner, SceneKind::Lobby]);
    }

    #[test]
    fn test_resize_applies_on_next_entry() {
        let mut router = boot(PORTRAIT);
        router.resize(LANDSCAPE);
        assert_eq!(router.scene_kind(), SceneKind::Lobby);

        router.handle_input(Input::TapEmpty, 0).unwrap();
        let layout = router.session().unwrap().layout();
        assert_eq!(layout.grid.columns, 5);
        assert_eq!(layout.grid.rows, 3);
    }

    #[test]
    fn test_play_forwards_round_cues() {
        let mut router = boot(PORTRAIT);
        router.handle_input(Input::TapEmpty, 0).unwrap();
        router.drain_cues();

        let card = router.session().unwrap().registry().iter().next().unwrap().id;
        router.handle_input(Input::TapCard(card), 10).unwrap();
        assert_eq!(
            router.drain_cues(),
            vec![SceneCue::Round(crate::cue::Cue::CardFlipped { card, face_up: true })]
        );
        assert_eq!(
            router.session().unwrap().round().selection.as_slice(),
            &[card]
        );
    }
}
