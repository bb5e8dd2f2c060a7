//! Card registry for the live cards of a round.
//!
//! The `CardRegistry` holds every dealt card that has not been retired.
//! It provides fast lookup by `CardId` and iteration in deal order.

use rustc_hash::FxHashMap;

use super::instance::CardEntity;
use super::token::CardToken;
use crate::core::CardId;
use crate::layout::Placement;

/// Registry of live card entities.
///
/// ## Example
///
/// ```
/// use memory_kiosk::cards::{CardRegistry, CardToken};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.register(CardToken::winner(0), None);
///
/// assert!(registry.contains(id));
/// assert!(registry.retire(id).is_some());
/// assert!(registry.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardEntity>,
    order: Vec<CardId>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every token of a deck, pairing each with its placement.
    ///
    /// Tokens without a placement (more tokens than placements) are
    /// registered unplaced.
    pub fn deal(tokens: Vec<CardToken>, placements: &[Placement]) -> Self {
        let mut registry = Self::new();
        for (index, token) in tokens.into_iter().enumerate() {
            registry.register(token, placements.get(index).copied());
        }
        registry
    }

    /// Register a card with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn register(&mut self, token: CardToken, placement: Option<Placement>) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;

        let mut card = CardEntity::new(id, token);
        card.placement = placement;
        self.cards.insert(id, card);
        self.order.push(id);
        id
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardEntity> {
        self.cards.get(&id)
    }

    /// Get a card by ID for mutation.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardEntity> {
        self.cards.get_mut(&id)
    }

    /// Check if a card is still on the table.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Remove a card from the table.
    pub fn retire(&mut self, id: CardId) -> Option<CardEntity> {
        let card = self.cards.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(card)
    }

    /// Set a card's face. Returns false if the card is gone.
    pub fn set_flipped(&mut self, id: CardId, face_up: bool) -> bool {
        match self.cards.get_mut(&id) {
            Some(card) => {
                card.is_flipped = face_up;
                true
            }
            None => false,
        }
    }

    /// Number of live cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over live cards in deal order.
    pub fn iter(&self) -> impl Iterator<Item = &CardEntity> {
        self.order.iter().filter_map(move |id| self.cards.get(id))
    }

    /// IDs of live cards that a tap could select right now.
    pub fn selectable(&self) -> impl Iterator<Item = CardId> + '_ {
        self.iter().filter(|c| c.is_selectable()).map(|c| c.id)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardEntity>
    where
        F: Fn(&CardEntity) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}
