//! Card entities - runtime card state.
//!
//! `CardEntity` is one dealt card: its token, where it sits, and the two
//! flags the turn machine reads and writes.

use serde::{Deserialize, Serialize};

use super::token::{CardToken, TokenKind};
use crate::core::CardId;
use crate::layout::Placement;

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardEntity {
    /// Identity registered with the presentation layer.
    pub id: CardId,

    pub token: CardToken,

    /// Face-up?
    pub is_flipped: bool,

    /// Part of a resolved pair. Never selectable again.
    pub is_matched: bool,

    /// Screen position; opaque to the turn machine.
    pub placement: Option<Placement>,
}

impl CardEntity {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, token: CardToken) -> Self {
        Self {
            id,
            token,
            is_flipped: false,
            is_matched: false,
            placement: None,
        }
    }

    /// Attach a screen placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Can a tap select this card?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}
