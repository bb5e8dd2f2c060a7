//! Scene flow of the kiosk.
//!
//! ```text
//! boot ─┬─ portrait ──> Lobby ──tap──> Play ─┬─ won ───> Winner ─┐
//!       └─ landscape ─> DifficultySelect ─┘   ├─ lost ──> PlayAgain ┤ tap: Play
//!                                             └─ idle ──> start     │ timeout: start
//! ```
//!
//! "Start" is the lobby on portrait screens (forced to easy) and the
//! difficulty picker on landscape screens. Orientation is read from the
//! viewport every time a scene is entered.
//!
//! ## Key Types
//!
//! - `SceneController`: what every scene implements
//! - `SceneRouter`: owns the kiosk context and the active scene
//! - `SceneCue`: router output; wraps round cues and adds scene changes

pub mod end;
pub mod menu;
pub mod play;
pub mod router;

use serde::{Deserialize, Serialize};

use crate::assets::Background;
use crate::core::{CardId, ConfigError, Difficulty, GameRng};
use crate::cue::Cue;
use crate::messages::{BilingualMessage, MessageBook};
use crate::session::KioskContext;

pub use end::EndScene;
pub use menu::{DifficultySelectScene, LobbyScene};
pub use play::PlayScene;
pub use router::SceneRouter;

/// Every screen the kiosk can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKind {
    DifficultySelect,
    Lobby,
    Play,
    Winner,
    PlayAgain,
}

impl SceneKind {
    /// Full-screen background, if the scene has one.
    #[must_use]
    pub const fn background(self) -> Option<Background> {
        match self {
            SceneKind::DifficultySelect => None,
            SceneKind::Lobby => Some(Background::Lobby),
            SceneKind::Play => Some(Background::Play),
            SceneKind::Winner => Some(Background::Winner),
            SceneKind::PlayAgain => Some(Background::PlayAgain),
        }
    }
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SceneKind::DifficultySelect => "difficulty-select",
            SceneKind::Lobby => "lobby",
            SceneKind::Play => "play",
            SceneKind::Winner => "winner",
            SceneKind::PlayAgain => "play-again",
        };
        f.write_str(name)
    }
}

/// Visitor input, already hit-tested by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    TapCard(CardId),
    /// A tap that hit no card.
    TapEmpty,
    /// A difficulty button on the picker.
    Choose(Difficulty),
}

impl Input {
    /// Any tap on the screen, as opposed to a button choice.
    #[must_use]
    pub const fn is_tap(self) -> bool {
        matches!(self, Input::TapCard(_) | Input::TapEmpty)
    }
}

/// What a scene asks the router to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    SwitchTo(SceneKind),
    /// Back to the lobby or picker, depending on orientation.
    ReturnToStart,
}

/// Router output for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneCue {
    Entered(SceneKind),
    Round(Cue),
    /// Message to show on an end screen.
    Message(BilingualMessage),
}

/// What a scene may touch while it runs.
pub struct SceneEnv<'a> {
    pub ctx: &'a mut KioskContext,
    pub rng: &'a mut GameRng,
    pub messages: &'a MessageBook,
    pub cues: &'a mut Vec<SceneCue>,
}

/// A screen of the kiosk.
pub trait SceneController {
    fn kind(&self) -> SceneKind;

    /// Called once when the scene becomes active at `now`.
    fn enter(&mut self, env: &mut SceneEnv<'_>, now: u64) -> Result<(), ConfigError>;

    fn handle_input(&mut self, env: &mut SceneEnv<'_>, input: Input, now: u64) -> SceneCommand;

    /// Fire whatever is due at `now`.
    fn advance(&mut self, env: &mut SceneEnv<'_>, now: u64) -> SceneCommand;

    /// Earliest time `advance` has work to do.
    fn next_deadline(&self) -> Option<u64> {
        None
    }

    /// Virtual time at which the command last returned by `advance` became
    /// due. The router enters the next scene at this time, not at the poll.
    fn settled_at(&self) -> Option<u64> {
        None
    }

    fn exit(&mut self, _env: &mut SceneEnv<'_>) {}
}
