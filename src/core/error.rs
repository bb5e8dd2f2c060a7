//! Configuration errors.
//!
//! Presets are trusted data, so an inconsistent one is a startup failure,
//! never something a round recovers from. Taps that cannot apply are not
//! errors at all; the turn machine simply ignores them.

/// A difficulty preset or config document that cannot produce a valid deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// More winner cards than cards in the deck.
    WinnersExceedDeck { total_cards: usize, winner_count: usize },

    /// Fewer than two winner cards, so no deal could ever be won.
    TooFewWinners { winner_count: usize },

    /// The non-winner part of the deck cannot be split into pairs.
    OddRegularCount { regular_cards: usize },

    /// The deck asks for more pairs than there are distinct types, or the
    /// pool holds fewer kinds than the preset promises.
    NotEnoughTypes { pairs_needed: usize, types_available: usize },

    /// A preset that allows no mismatches at all.
    ZeroMaxTurns,

    /// The config document did not parse.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::WinnersExceedDeck { total_cards, winner_count } => write!(
                f,
                "deck of {} cards cannot hold {} winner cards",
                total_cards, winner_count
            ),
            ConfigError::TooFewWinners { winner_count } => write!(
                f,
                "deck needs at least 2 winner cards, got {}",
                winner_count
            ),
            ConfigError::OddRegularCount { regular_cards } => write!(
                f,
                "{} regular cards cannot be dealt as pairs",
                regular_cards
            ),
            ConfigError::NotEnoughTypes { pairs_needed, types_available } => write!(
                f,
                "deck needs {} pairs but only {} card types are available",
                pairs_needed, types_available
            ),
            ConfigError::ZeroMaxTurns => write!(f, "max_turns must be at least 1"),
            ConfigError::Parse(msg) => write!(f, "invalid config document: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
