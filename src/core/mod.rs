//! Core types: card identity, RNG, configuration, errors.
//!
//! Nothing here knows about turns or scenes; the rest of the crate builds on
//! these pieces.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{DeckConfig, Difficulty, DifficultyPreset, GameConfig, TimingConfig};
pub use entity::CardId;
pub use error::ConfigError;
pub use rng::GameRng;
