//! Round state: the single mutable record of one play-through.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CardId;
use crate::schedule::TimerId;

/// Where the turn machine is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No card selected.
    #[default]
    Idle,
    /// One card face-up.
    AwaitingSecondCard,
    /// Two cards face-up, judgement scheduled.
    Resolving,
    /// A pair matched; waiting out the celebration.
    MatchCelebrating,
    /// A pair did not match and is still face-up. When the mismatch limit
    /// was just reached there is no pending pair: the round is about to be
    /// lost and taps stay blocked.
    MismatchShowing,
    Won,
    Lost,
}

impl TurnPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnPhase::Won | TurnPhase::Lost)
    }
}

/// A mismatched pair shown face-up until its flip-back fires or a tap
/// dismisses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMismatch {
    pub first: CardId,
    pub second: CardId,
    pub flip_back: TimerId,
}

impl PendingMismatch {
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.first == card || self.second == card
    }
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// A winner pair was matched.
    Won,
    /// The mismatch limit was reached.
    Lost,
    /// Nobody answered the idle warning.
    TimedOut,
}

/// What a tap did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapResult {
    /// Guarded away: nothing changed.
    Ignored,
    /// First card of a pair turned face-up.
    Selected,
    /// Second card turned face-up; judgement is scheduled.
    PairComplete,
    /// A shown mismatch was flipped back early.
    MismatchDismissed,
    /// A shown mismatch was flipped back and the tapped card starts a new pair.
    MismatchDismissedAndSelected,
    /// The tap only cleared the idle warning.
    WarningDismissed,
}

/// Mutable state of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Unequal pairs judged so far. Never decreases.
    pub mismatched_turns: u32,

    /// Mismatches that lose the round.
    pub max_turns: u32,

    /// Face-up cards of the current turn, at most two.
    pub selection: SmallVec<[CardId; 2]>,

    /// True from the second pick until the turn is fully resolved.
    pub processing: bool,

    pub pending_mismatch: Option<PendingMismatch>,

    pub phase: TurnPhase,
}

impl RoundState {
    /// Fresh state for a new deal.
    #[must_use]
    pub fn new(max_turns: u32) -> Self {
        Self {
            mismatched_turns: 0,
            max_turns,
            selection: SmallVec::new(),
            processing: false,
            pending_mismatch: None,
            phase: TurnPhase::Idle,
        }
    }

    /// Attempts left before the round is lost.
    #[must_use]
    pub fn remaining_attempts(&self) -> u32 {
        self.max_turns.saturating_sub(self.mismatched_turns)
    }

    /// Terminal outcome, if the round has ended on the table.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            TurnPhase::Won => Some(RoundOutcome::Won),
            TurnPhase::Lost => Some(RoundOutcome::Lost),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}
