//! Kiosk context: the settings every round is dealt from.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, DifficultyPreset, GameConfig, TimingConfig};
use crate::layout::{Orientation, Viewport};

/// Configuration, chosen difficulty and current screen.
///
/// Owned by the scene router and lent to each new `Session`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KioskContext {
    pub config: GameConfig,
    pub difficulty: Difficulty,
    pub viewport: Viewport,
}

impl KioskContext {
    /// Create a context on easy difficulty.
    #[must_use]
    pub fn new(config: GameConfig, viewport: Viewport) -> Self {
        Self {
            config,
            difficulty: Difficulty::Easy,
            viewport,
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.viewport.orientation()
    }

    /// Preset for the current difficulty.
    #[must_use]
    pub fn preset(&self) -> &DifficultyPreset {
        self.config.preset(self.difficulty)
    }

    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.preset().timing
    }
}
