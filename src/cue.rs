//! Presentation cues.
//!
//! The core never touches the scene graph. Every visible consequence of a
//! tap or a timer is queued as a `Cue`; the host drains the queue after each
//! call and plays the matching animation.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// One instruction for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Turn a card face-up or face-down.
    CardFlipped { card: CardId, face_up: bool },

    /// Play the match celebration between two cards.
    MatchCelebrated { first: CardId, second: CardId },

    /// Remove a matched pair from the table.
    CardsRetired { first: CardId, second: CardId },

    /// The remaining-attempts counter changed. `low` asks for emphasis.
    AttemptsChanged { remaining: u32, low: bool },

    /// Show the "are you still there" overlay.
    IdleWarningShown,

    /// Hide the overlay after the visitor came back.
    IdleWarningCleared,

    RoundWon,
    RoundLost,

    /// Nobody answered the warning; leave the round.
    ReturnToLobby,
}
