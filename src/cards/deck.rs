//! Deck building.
//!
//! A deal is `winner_count` winner cards plus one pair for each of a random
//! subset of the regular pool, shuffled together.

use super::token::{CardToken, RegularKind};
use crate::core::{ConfigError, DeckConfig, GameRng};

/// Build a shuffled deck.
///
/// The regular pairs are drawn from a uniformly random subset of `pool`;
/// each drawn kind contributes exactly two tokens.
///
/// ```
/// use memory_kiosk::cards::{build_deck, RegularKind, TokenKind};
/// use memory_kiosk::core::{DeckConfig, GameRng};
///
/// let config = DeckConfig::new(15, 3, 6);
/// let deck = build_deck(&config, &RegularKind::ALL, &mut GameRng::new(1)).unwrap();
///
/// assert_eq!(deck.len(), 15);
/// assert_eq!(deck.iter().filter(|t| t.kind == TokenKind::Winner).count(), 3);
/// ```
pub fn build_deck(
    config: &DeckConfig,
    pool: &[RegularKind],
    rng: &mut GameRng,
) -> Result<Vec<CardToken>, ConfigError> {
    config.validate(pool.len())?;

    let mut deck = Vec::with_capacity(config.total_cards);
    for index in 0..config.winner_count {
        deck.push(CardToken::winner(index));
    }

    let mut kinds = pool.to_vec();
    rng.shuffle(&mut kinds);
    kinds.truncate(config.pairs_needed());

    for kind in &kinds {
        deck.extend(CardToken::pair(*kind));
    }

    rng.shuffle(&mut deck);

    tracing::debug!(
        target: "deal",
        cards = deck.len(),
        winners = config.winner_count,
        kinds = ?kinds,
        "deck built"
    );

    Ok(deck)
}
