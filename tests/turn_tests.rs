//! Turn state machine tests.
//!
//! These tests drive a toy 7-card table `[W, W, W, Dog, Dog, Cat, Cat]`
//! through complete rounds:
//! - Winning by pairing two winner cards
//! - Losing after the mismatch limit, exactly once
//! - Dismissing a shown mismatch early
//! - Taps on face-up or matched cards changing nothing

use proptest::prelude::*;

use memory_kiosk::cards::{CardRegistry, CardToken, RegularKind};
use memory_kiosk::core::{CardId, TimingConfig};
use memory_kiosk::cue::Cue;
use memory_kiosk::schedule::Scheduler;
use memory_kiosk::turn::{RoundState, TapResult, TurnContext, TurnPhase, TurnTask};

const W0: CardId = CardId(0);
const W1: CardId = CardId(1);
const W2: CardId = CardId(2);
const DOG_A: CardId = CardId(3);
const DOG_B: CardId = CardId(4);
const CAT_A: CardId = CardId(5);
const CAT_B: CardId = CardId(6);

struct Table {
    registry: CardRegistry,
    timers: Scheduler<TurnTask>,
    cues: Vec<Cue>,
    timing: TimingConfig,
    round: RoundState,
}

impl Table {
    fn new(max_turns: u32) -> Self {
        let mut tokens = vec![CardToken::winner(0), CardToken::winner(1), CardToken::winner(2)];
        tokens.extend(CardToken::pair(RegularKind::Dog));
        tokens.extend(CardToken::pair(RegularKind::Cat));

        Self {
            registry: CardRegistry::deal(tokens, &[]),
            timers: Scheduler::new(0),
            cues: Vec::new(),
            timing: TimingConfig::default(),
            round: RoundState::new(max_turns),
        }
    }

    fn tap(&mut self, card: CardId) -> TapResult {
        let mut ctx = TurnContext {
            registry: &mut self.registry,
            timers: &mut self.timers,
            cues: &mut self.cues,
            timing: &self.timing,
        };
        self.round.select_card(&mut ctx, card)
    }

    fn tap_empty(&mut self) -> TapResult {
        let mut ctx = TurnContext {
            registry: &mut self.registry,
            timers: &mut self.timers,
            cues: &mut self.cues,
            timing: &self.timing,
        };
        self.round.tap_empty(&mut ctx)
    }

    /// Move the clock forward by `ms`, firing everything due.
    fn wait(&mut self, ms: u64) {
        let until = self.timers.now() + ms;
        while let Some((_, task)) = self.timers.pop_due(until) {
            let mut ctx = TurnContext {
                registry: &mut self.registry,
                timers: &mut self.timers,
                cues: &mut self.cues,
                timing: &self.timing,
            };
            self.round.on_timer(&mut ctx, task);
        }
        self.timers.set_now(until);
    }

    /// Pick two cards and let the turn play out completely.
    fn play_pair(&mut self, first: CardId, second: CardId) {
        self.tap(first);
        self.tap(second);
        self.wait(10_000);
    }

    fn count(&self, cue: &Cue) -> usize {
        self.cues.iter().filter(|c| *c == cue).count()
    }
}

/// Pairing two winner cards wins the round.
#[test]
fn test_winner_pair_wins() {
    let mut table = Table::new(5);

    table.tap(W0);
    table.tap(W2);
    table.wait(300);
    assert_eq!(table.round.phase, TurnPhase::MatchCelebrating);

    table.wait(1_000);
    assert_eq!(table.round.phase, TurnPhase::Won);
    assert_eq!(table.count(&Cue::RoundWon), 1);

    // The third winner cannot be picked any more.
    assert_eq!(table.tap(W1), TapResult::Ignored);
}

/// Regular matches retire cards without touching the mismatch count.
#[test]
fn test_regular_matches_retire_cards() {
    let mut table = Table::new(5);

    table.play_pair(DOG_A, DOG_B);
    table.play_pair(CAT_B, CAT_A);

    assert_eq!(table.round.mismatched_turns, 0);
    assert!(table.round.selection.is_empty());
    assert!(!table.round.processing);
    assert_eq!(table.registry.len(), 3);
    assert!(table.registry.iter().all(|c| c.kind().is_winner()));
    assert!(table.cues.contains(&Cue::CardsRetired { first: DOG_A, second: DOG_B }));
}

/// Five unequal pairs lose the round after the fifth, exactly once.
#[test]
fn test_five_mismatches_lose() {
    let mut table = Table::new(5);
    let pairs = [(W0, DOG_A), (DOG_A, CAT_A), (W1, CAT_B), (DOG_B, CAT_A), (W2, DOG_B)];

    for (turn, (first, second)) in pairs.into_iter().enumerate() {
        assert_eq!(table.round.phase, TurnPhase::Idle);
        table.play_pair(first, second);
        assert_eq!(table.round.mismatched_turns, turn as u32 + 1);
    }

    assert_eq!(table.round.phase, TurnPhase::Lost);
    assert_eq!(table.count(&Cue::RoundLost), 1);
    assert!(table.cues.contains(&Cue::AttemptsChanged { remaining: 0, low: true }));

    // Nothing retriggers the loss.
    table.tap(W0);
    table.tap(W1);
    table.wait(60_000);
    assert_eq!(table.count(&Cue::RoundLost), 1);
    assert_eq!(table.round.mismatched_turns, 5);
}

/// The fifth mismatch stays on screen until the loss; taps are ignored.
#[test]
fn test_final_mismatch_blocks_taps() {
    let mut table = Table::new(1);
    table.tap(W0);
    table.tap(CAT_A);
    table.wait(300);

    assert_eq!(table.round.phase, TurnPhase::MismatchShowing);
    assert_eq!(table.tap_empty(), TapResult::Ignored);
    assert_eq!(table.tap(DOG_A), TapResult::Ignored);
    assert!(table.registry.get(W0).unwrap().is_flipped);

    table.wait(1_000);
    assert_eq!(table.round.phase, TurnPhase::Lost);
}

/// An empty tap flips a shown mismatch back before its timer.
#[test]
fn test_empty_tap_dismisses_mismatch() {
    let mut table = Table::new(5);
    table.tap(DOG_A);
    table.tap(CAT_A);
    table.wait(300);
    assert!(table.round.pending_mismatch.is_some());

    table.wait(1_000);
    assert_eq!(table.tap_empty(), TapResult::MismatchDismissed);

    assert!(!table.registry.get(DOG_A).unwrap().is_flipped);
    assert!(!table.registry.get(CAT_A).unwrap().is_flipped);
    assert!(table.round.selection.is_empty());
    assert!(table.round.pending_mismatch.is_none());
    assert!(!table.round.processing);
    assert!(table.timers.is_empty());
}

/// A tap on a third card dismisses the mismatch and starts a new pair.
#[test]
fn test_third_card_starts_new_pair() {
    let mut table = Table::new(5);
    table.tap(DOG_A);
    table.tap(CAT_A);
    table.wait(300);

    assert_eq!(table.tap(DOG_B), TapResult::MismatchDismissedAndSelected);
    assert_eq!(table.tap(DOG_A), TapResult::PairComplete);
    table.wait(1_300);

    assert!(!table.registry.contains(DOG_A));
    assert!(!table.registry.contains(DOG_B));
    assert_eq!(table.round.mismatched_turns, 1);
}

/// Taps on face-up or matched cards change nothing.
#[test]
fn test_idempotent_taps() {
    let mut table = Table::new(5);

    table.tap(DOG_A);
    let before = table.round.clone();
    assert_eq!(table.tap(DOG_A), TapResult::Ignored);
    assert_eq!(table.round, before);

    table.tap(DOG_B);
    table.wait(300);
    assert!(table.registry.get(DOG_A).unwrap().is_matched);

    let before = table.round.clone();
    assert_eq!(table.tap(DOG_A), TapResult::Ignored);
    assert_eq!(table.tap(DOG_B), TapResult::Ignored);
    assert_eq!(table.round, before);
}

#[derive(Clone, Debug)]
enum Step {
    Tap(u32),
    TapEmpty,
    Wait(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0u32..8).prop_map(Step::Tap),
        1 => Just(Step::TapEmpty),
        2 => (0u64..4_000).prop_map(Step::Wait),
    ]
}

proptest! {
    /// Invariants that hold after any sequence of taps and waits.
    #[test]
    fn prop_round_invariants(steps in prop::collection::vec(step(), 0..80)) {
        let mut table = Table::new(5);
        let mut last_mismatches = 0;

        for step in steps {
            match step {
                Step::Tap(raw) => {
                    let card = CardId(raw);
                    let unavailable = table
                        .registry
                        .get(card)
                        .map_or(true, |c| c.is_flipped || c.is_matched);

                    if unavailable && table.round.pending_mismatch.is_none() {
                        let before = table.round.clone();
                        prop_assert_eq!(table.tap(card), TapResult::Ignored);
                        prop_assert_eq!(&table.round, &before);
                    } else {
                        table.tap(card);
                    }
                }
                Step::TapEmpty => {
                    table.tap_empty();
                }
                Step::Wait(ms) => table.wait(ms),
            }

            prop_assert!(table.round.selection.len() <= 2);
            prop_assert!(table.round.mismatched_turns >= last_mismatches);
            prop_assert!(table.round.mismatched_turns <= table.round.max_turns);
            prop_assert!(table.count(&Cue::RoundLost) <= 1);
            prop_assert!(table.count(&Cue::RoundWon) <= 1);
            prop_assert!(table.count(&Cue::RoundLost) + table.count(&Cue::RoundWon) <= 1);
            last_mismatches = table.round.mismatched_turns;
        }
    }
}
