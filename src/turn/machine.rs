//! Turn state machine.
//!
//! ```text
//! Idle -> AwaitingSecondCard -> Resolving -> MatchCelebrating -> Idle | Won
//!                                         -> MismatchShowing  -> Idle | Lost
//! ```
//!
//! Taps and timer firings are the only inputs. Every guard that makes a tap
//! a no-op (double taps, taps during animation) lives here; none of them is
//! an error.

use serde::{Deserialize, Serialize};

use super::state::{PendingMismatch, RoundState, TapResult, TurnPhase};
use crate::cards::CardRegistry;
use crate::core::{CardId, TimingConfig};
use crate::cue::Cue;
use crate::schedule::{Scheduler, TimerId};

/// At or below this many attempts the counter is flagged as low.
pub const LOW_ATTEMPTS: u32 = 2;

/// Delayed steps of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnTask {
    /// Judge the two selected cards.
    Resolve,
    /// Retire a celebrated pair and free the table.
    FinishMatch { first: CardId, second: CardId },
    /// Turn a shown mismatch face-down.
    FlipBack { first: CardId, second: CardId },
    DeclareWin,
    DeclareLoss,
}

/// Everything a turn step may touch besides the round itself.
pub struct TurnContext<'a, T> {
    pub registry: &'a mut CardRegistry,
    pub timers: &'a mut Scheduler<T>,
    pub cues: &'a mut Vec<Cue>,
    pub timing: &'a TimingConfig,
}

impl<'a, T> TurnContext<'a, T>
where
    T: From<TurnTask>,
{
    fn flip(&mut self, card: CardId, face_up: bool) {
        if self.registry.set_flipped(card, face_up) {
            self.cues.push(Cue::CardFlipped { card, face_up });
        }
    }

    fn schedule(&mut self, delay_ms: u64, task: TurnTask) -> TimerId {
        self.timers.schedule(delay_ms, T::from(task))
    }
}

impl RoundState {
    /// Handle a tap on a card.
    ///
    /// A shown mismatch is dismissed first; the tapped card then starts a new
    /// pair only if it is neither of the two dismissed cards and is still
    /// selectable. Tapping one of the shown cards just flips both back.
    pub fn select_card<T: From<TurnTask>>(
        &mut self,
        ctx: &mut TurnContext<'_, T>,
        card: CardId,
    ) -> TapResult {
        if self.is_over() {
            tracing::trace!(target: "turn", %card, "tap after round end");
            return TapResult::Ignored;
        }

        if let Some(pending) = self.pending_mismatch {
            self.dismiss_mismatch(ctx, pending);

            let eligible = !pending.contains(card)
                && ctx.registry.get(card).is_some_and(|c| c.is_selectable());
            if !eligible {
                return TapResult::MismatchDismissed;
            }

            self.pick(ctx, card);
            return TapResult::MismatchDismissedAndSelected;
        }

        if self.processing || self.selection.len() >= 2 {
            tracing::trace!(target: "turn", %card, phase = ?self.phase, "tap while busy");
            return TapResult::Ignored;
        }

        match ctx.registry.get(card) {
            Some(entity) if entity.is_selectable() => {}
            _ => {
                tracing::trace!(target: "turn", %card, "card not selectable");
                return TapResult::Ignored;
            }
        }

        self.pick(ctx, card)
    }

    /// Handle a tap that hit no card.
    ///
    /// Only a shown mismatch reacts: both cards flip back at once.
    pub fn tap_empty<T: From<TurnTask>>(&mut self, ctx: &mut TurnContext<'_, T>) -> TapResult {
        match self.pending_mismatch {
            Some(pending) if !self.is_over() => {
                self.dismiss_mismatch(ctx, pending);
                TapResult::MismatchDismissed
            }
            _ => TapResult::Ignored,
        }
    }

    /// Run a delayed turn step.
    pub fn on_timer<T: From<TurnTask>>(&mut self, ctx: &mut TurnContext<'_, T>, task: TurnTask) {
        if self.is_over() {
            return;
        }

        match task {
            TurnTask::Resolve => self.resolve(ctx),
            TurnTask::FinishMatch { first, second } => {
                ctx.registry.retire(first);
                ctx.registry.retire(second);
                ctx.cues.push(Cue::CardsRetired { first, second });
                self.clear_turn();
                tracing::debug!(target: "turn", %first, %second, left = ctx.registry.len(), "pair retired");
            }
            TurnTask::FlipBack { first, second } => {
                if let Some(pending) = self.pending_mismatch {
                    if pending.first == first && pending.second == second {
                        self.pending_mismatch = None;
                        ctx.flip(first, false);
                        ctx.flip(second, false);
                        self.clear_turn();
                        tracing::debug!(target: "turn", %first, %second, "mismatch flipped back");
                    }
                }
            }
            TurnTask::DeclareWin => {
                self.phase = TurnPhase::Won;
                ctx.cues.push(Cue::RoundWon);
                tracing::info!(target: "turn", mismatches = self.mismatched_turns, "round won");
            }
            TurnTask::DeclareLoss => {
                self.phase = TurnPhase::Lost;
                ctx.cues.push(Cue::RoundLost);
                tracing::info!(target: "turn", mismatches = self.mismatched_turns, "round lost");
            }
        }
    }

    /// Judge the two selected cards.
    pub fn resolve<T: From<TurnTask>>(&mut self, ctx: &mut TurnContext<'_, T>) {
        let (first, second) = match self.selection.as_slice() {
            [first, second] => (*first, *second),
            _ => return,
        };

        let judged = ctx
            .registry
            .get(first)
            .zip(ctx.registry.get(second))
            .map(|(a, b)| (a.token.matches(&b.token), a.kind().is_winner()));
        let Some((matched, winner)) = judged else {
            // Cards vanished from under the turn; start over.
            self.clear_turn();
            return;
        };

        if matched {
            self.on_match(ctx, first, second, winner);
        } else {
            self.on_mismatch(ctx, first, second);
        }
    }

    fn on_match<T: From<TurnTask>>(
        &mut self,
        ctx: &mut TurnContext<'_, T>,
        first: CardId,
        second: CardId,
        winner: bool,
    ) {
        for card in [first, second] {
            if let Some(entity) = ctx.registry.get_mut(card) {
                entity.is_matched = true;
            }
        }
        ctx.cues.push(Cue::MatchCelebrated { first, second });
        self.phase = TurnPhase::MatchCelebrating;

        let celebration = ctx.timing.celebration_ms;
        if winner {
            ctx.schedule(celebration, TurnTask::DeclareWin);
        } else {
            ctx.schedule(celebration, TurnTask::FinishMatch { first, second });
        }

        tracing::debug!(target: "turn", %first, %second, winner, "pair matched");
    }

    fn on_mismatch<T: From<TurnTask>>(
        &mut self,
        ctx: &mut TurnContext<'_, T>,
        first: CardId,
        second: CardId,
    ) {
        self.mismatched_turns += 1;
        let remaining = self.remaining_attempts();
        ctx.cues.push(Cue::AttemptsChanged {
            remaining,
            low: remaining <= LOW_ATTEMPTS,
        });
        self.phase = TurnPhase::MismatchShowing;

        if self.mismatched_turns >= self.max_turns {
            let lose_delay = ctx.timing.lose_delay_ms;
            ctx.schedule(lose_delay, TurnTask::DeclareLoss);
            tracing::debug!(target: "turn", %first, %second, mismatches = self.mismatched_turns, "mismatch limit reached");
            return;
        }

        let flip_back_ms = ctx.timing.flip_back_ms;
        let flip_back = ctx.schedule(flip_back_ms, TurnTask::FlipBack { first, second });
        self.pending_mismatch = Some(PendingMismatch {
            first,
            second,
            flip_back,
        });

        tracing::debug!(target: "turn", %first, %second, remaining, "mismatch shown");
    }

    fn pick<T: From<TurnTask>>(&mut self, ctx: &mut TurnContext<'_, T>, card: CardId) -> TapResult {
        ctx.flip(card, true);
        self.selection.push(card);

        if self.selection.len() == 2 {
            self.processing = true;
            self.phase = TurnPhase::Resolving;
            let delay = ctx.timing.match_check_delay_ms;
            ctx.schedule(delay, TurnTask::Resolve);
            tracing::debug!(target: "turn", %card, "second card picked");
            TapResult::PairComplete
        } else {
            self.phase = TurnPhase::AwaitingSecondCard;
            tracing::debug!(target: "turn", %card, "first card picked");
            TapResult::Selected
        }
    }

    fn dismiss_mismatch<T: From<TurnTask>>(
        &mut self,
        ctx: &mut TurnContext<'_, T>,
        pending: PendingMismatch,
    ) {
        ctx.timers.cancel(pending.flip_back);
        self.pending_mismatch = None;
        ctx.flip(pending.first, false);
        ctx.flip(pending.second, false);
        self.clear_turn();
        tracing::debug!(target: "turn", first = %pending.first, second = %pending.second, "mismatch dismissed early");
    }

    fn clear_turn(&mut self) {
        self.selection.clear();
        self.processing = false;
        self.phase = TurnPhase::Idle;
    }
}
