//! Game configuration types.
//!
//! The kiosk is configured at startup by providing:
//! - `DeckConfig`: how many cards, winners and distinct types a deal uses
//! - `TimingConfig`: every delay the turn machine, watchdog and end screens wait
//! - `DifficultyPreset`: a deck, a timing table and a mismatch limit
//! - `GameConfig`: one preset per difficulty plus the regular card pool
//!
//! Published builds of the kiosk disagree on durations and turn limits, so
//! none of them are hard-coded in the engine. The defaults below are named
//! constants and every value can be overridden per difficulty from JSON.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::RegularKind;

/// Mismatches allowed on easy before the round is lost.
pub const EASY_MAX_TURNS: u32 = 5;
/// Mismatches allowed on hard before the round is lost.
pub const HARD_MAX_TURNS: u32 = 10;

/// Delay between the second flip and judging the pair.
pub const MATCH_CHECK_DELAY_MS: u64 = 300;
/// How long a matched pair celebrates before it is retired.
pub const MATCH_CELEBRATION_MS: u64 = 1_000;
/// Delay between the final mismatch and the lose screen.
pub const LOSE_DELAY_MS: u64 = 1_000;
/// How long a mismatched pair stays face-up.
pub const FLIP_BACK_DELAY_MS: u64 = 3_000;
/// Inactivity before the "are you still there" warning.
pub const INACTIVITY_WARNING_MS: u64 = 45_000;
/// Time the warning stays up before returning to the lobby.
pub const INACTIVITY_RETURN_MS: u64 = 15_000;
/// How long the winner and play-again screens stay up.
pub const END_SCREEN_MS: u64 = 15_000;

/// Difficulty selected on the start screen.
///
/// Portrait kiosks always play `Easy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// Lowercase name used in logs and config documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of one deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Cards on the table at the start of a round.
    pub total_cards: usize,

    /// Cards sharing the winner kind. Pairing any two wins the round.
    pub winner_count: usize,

    /// Upper bound on distinct regular types drawn into one deal.
    pub distinct_regular_types: usize,

    /// Maximum card tilt in degrees, applied both ways.
    #[serde(default)]
    pub tilt_range: u32,

    /// Maximum position offset in pixels, applied both ways on each axis.
    #[serde(default)]
    pub offset_range: u32,
}

impl DeckConfig {
    /// Create a deck configuration without jitter.
    #[must_use]
    pub fn new(total_cards: usize, winner_count: usize, distinct_regular_types: usize) -> Self {
        Self {
            total_cards,
            winner_count,
            distinct_regular_types,
            tilt_range: 0,
            offset_range: 0,
        }
    }

    /// Set the tilt and offset jitter ranges.
    #[must_use]
    pub fn with_jitter(mut self, tilt_range: u32, offset_range: u32) -> Self {
        self.tilt_range = tilt_range;
        self.offset_range = offset_range;
        self
    }

    /// Number of non-winner cards.
    ///
    /// Saturates at zero; `validate` rejects that case separately.
    #[must_use]
    pub fn regular_cards(&self) -> usize {
        self.total_cards.saturating_sub(self.winner_count)
    }

    /// Number of regular pairs a deal contains.
    #[must_use]
    pub fn pairs_needed(&self) -> usize {
        self.regular_cards() / 2
    }

    /// Check that a deal can be built from a pool of `pool_size` types.
    ///
    /// The pool must hold at least `distinct_regular_types` kinds, and a deck
    /// needs two winners to be winnable at all.
    pub fn validate(&self, pool_size: usize) -> Result<(), ConfigError> {
        if self.winner_count > self.total_cards {
            return Err(ConfigError::WinnersExceedDeck {
                total_cards: self.total_cards,
                winner_count: self.winner_count,
            });
        }

        if self.winner_count < 2 {
            return Err(ConfigError::TooFewWinners {
                winner_count: self.winner_count,
            });
        }

        let regular_cards = self.regular_cards();
        if regular_cards % 2 != 0 {
            return Err(ConfigError::OddRegularCount { regular_cards });
        }

        let pairs_needed = self.pairs_needed();
        if pool_size < self.distinct_regular_types {
            return Err(ConfigError::NotEnoughTypes {
                pairs_needed,
                types_available: pool_size,
            });
        }
        if pairs_needed > self.distinct_regular_types {
            return Err(ConfigError::NotEnoughTypes {
                pairs_needed,
                types_available: self.distinct_regular_types,
            });
        }

        Ok(())
    }
}

/// Every delay the engine waits, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub match_check_delay_ms: u64,
    pub celebration_ms: u64,
    pub lose_delay_ms: u64,
    pub flip_back_ms: u64,
    pub idle_warning_ms: u64,
    pub idle_return_ms: u64,
    pub end_screen_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            match_check_delay_ms: MATCH_CHECK_DELAY_MS,
            celebration_ms: MATCH_CELEBRATION_MS,
            lose_delay_ms: LOSE_DELAY_MS,
            flip_back_ms: FLIP_BACK_DELAY_MS,
            idle_warning_ms: INACTIVITY_WARNING_MS,
            idle_return_ms: INACTIVITY_RETURN_MS,
            end_screen_ms: END_SCREEN_MS,
        }
    }
}

impl TimingConfig {
    /// Set the flip-back delay for mismatched pairs.
    #[must_use]
    pub fn with_flip_back(mut self, ms: u64) -> Self {
        self.flip_back_ms = ms;
        self
    }

    /// Set both inactivity thresholds.
    #[must_use]
    pub fn with_idle(mut self, warning_ms: u64, return_ms: u64) -> Self {
        self.idle_warning_ms = warning_ms;
        self.idle_return_ms = return_ms;
        self
    }

    /// Set how long end screens stay up.
    #[must_use]
    pub fn with_end_screen(mut self, ms: u64) -> Self {
        self.end_screen_ms = ms;
        self
    }
}

/// Everything that differs between difficulties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub deck: DeckConfig,

    /// Mismatched turns that end the round.
    pub max_turns: u32,

    #[serde(default)]
    pub timing: TimingConfig,
}

impl DifficultyPreset {
    /// Create a preset with default timing.
    #[must_use]
    pub fn new(deck: DeckConfig, max_turns: u32) -> Self {
        Self {
            deck,
            max_turns,
            timing: TimingConfig::default(),
        }
    }

    /// The easy preset: 15 cards, 3 winners, 6 pair types, 5 turns.
    #[must_use]
    pub fn easy() -> Self {
        Self::new(DeckConfig::new(15, 3, 6).with_jitter(4, 5), EASY_MAX_TURNS)
    }

    /// The hard preset: 21 cards, 3 winners, 9 pair types, 10 turns.
    #[must_use]
    pub fn hard() -> Self {
        Self::new(DeckConfig::new(21, 3, 9).with_jitter(4, 5), HARD_MAX_TURNS)
    }

    /// Replace the timing table.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the mismatch limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Check this preset against a pool of `pool_size` regular types.
    pub fn validate(&self, pool_size: usize) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::ZeroMaxTurns);
        }
        self.deck.validate(pool_size)
    }
}

/// Complete kiosk configuration.
///
/// Owned by the scene router and passed by reference into each round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub easy: DifficultyPreset,
    pub hard: DifficultyPreset,

    /// Regular kinds a deal may draw from.
    pub regular_pool: Vec<RegularKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyPreset::easy(),
            hard: DifficultyPreset::hard(),
            regular_pool: RegularKind::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config document.
    ///
    /// Missing sections fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the preset for one difficulty.
    #[must_use]
    pub fn with_preset(mut self, difficulty: Difficulty, preset: DifficultyPreset) -> Self {
        match difficulty {
            Difficulty::Easy => self.easy = preset,
            Difficulty::Hard => self.hard = preset,
        }
        self
    }

    /// Replace the regular card pool.
    #[must_use]
    pub fn with_regular_pool(mut self, pool: Vec<RegularKind>) -> Self {
        self.regular_pool = pool;
        self
    }

    /// Get the preset for a difficulty.
    #[must_use]
    pub fn preset(&self, difficulty: Difficulty) -> &DifficultyPreset {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Check both presets against the regular pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.easy.validate(self.regular_pool.len())?;
        self.hard.validate(self.regular_pool.len())
    }
}
