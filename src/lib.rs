//! # memory-kiosk
//!
//! Turn engine for an unattended, single-player memory matching game.
//!
//! ## Design Principles
//!
//! 1. **Rendering-Agnostic**: The engine never draws. Taps come in already
//!    hit-tested; visible consequences go out as `Cue`s.
//!
//! 2. **Virtual Time**: Every call carries a millisecond timestamp. All
//!    delayed behavior is a cancelable task in a `Scheduler`, so rounds
//!    replay exactly from a seed and a list of timed inputs.
//!
//! 3. **Configuration Over Convention**: Deck sizes, turn limits and every
//!    delay live in `GameConfig`, one preset per difficulty.
//!
//! ## Modules
//!
//! - `core`: Card IDs, RNG, configuration, errors
//! - `cards`: Tokens, deck building, the live card registry
//! - `layout`: Grid planning and card placement
//! - `schedule`: Cancelable timers on a virtual clock
//! - `turn`: Round state and the tap/timer state machine
//! - `watchdog`: Inactivity warning and timeout
//! - `session`: One round, from deal to outcome
//! - `scenes`: Scene flow and the router that owns the kiosk context
//! - `messages`: Bilingual end-screen messages
//! - `assets`: Asset paths

pub mod assets;
pub mod cards;
pub mod core;
pub mod cue;
pub mod layout;
pub mod messages;
pub mod scenes;
pub mod schedule;
pub mod session;
pub mod turn;
pub mod watchdog;

// Re-export commonly used types
pub use crate::core::{
    CardId, ConfigError, DeckConfig, Difficulty, DifficultyPreset, GameConfig, GameRng,
    TimingConfig,
};

pub use crate::cards::{build_deck, CardEntity, CardRegistry, CardToken, RegularKind, TokenKind};

pub use crate::layout::{plan_grid, plan_table, GridLayout, Orientation, TableLayout, Viewport};

pub use crate::schedule::{Scheduler, TimerId};

pub use crate::cue::Cue;

pub use crate::turn::{RoundOutcome, RoundState, TapResult, TurnPhase};

pub use crate::watchdog::IdleWatchdog;

pub use crate::session::{KioskContext, Session, SessionSnapshot};

pub use crate::scenes::{Input, SceneCue, SceneKind, SceneRouter};

pub use crate::messages::{BilingualMessage, MessageBook};
