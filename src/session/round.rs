//! One round on the table, from the deal to its outcome.
//!
//! `Session` owns everything a round needs: the dealt cards, the turn
//! state, the idle watchdog and a single timer queue shared by both. The
//! host calls `tap_card` / `tap_empty` on input and `advance` every frame,
//! then drains the queued cues.
//!
//! Ordering rule: before any input stamped `now` is handled, every timer
//! due at or before `now` fires, earliest first.

use serde::{Deserialize, Serialize};

use super::context::KioskContext;
use crate::cards::{build_deck, CardEntity, CardRegistry};
use crate::core::{CardId, ConfigError, Difficulty, GameRng, TimingConfig};
use crate::cue::Cue;
use crate::layout::{plan_table, TableLayout};
use crate::schedule::Scheduler;
use crate::turn::{RoundOutcome, RoundState, TapResult, TurnContext, TurnPhase, TurnTask, LOW_ATTEMPTS};
use crate::watchdog::{IdleWatchdog, WatchdogEvent, WatchdogTask};

/// Any timer a round can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundTimer {
    Turn(TurnTask),
    Watchdog(WatchdogTask),
}

impl From<TurnTask> for RoundTimer {
    fn from(task: TurnTask) -> Self {
        RoundTimer::Turn(task)
    }
}

impl From<WatchdogTask> for RoundTimer {
    fn from(task: WatchdogTask) -> Self {
        RoundTimer::Watchdog(task)
    }
}

/// A live round.
#[derive(Clone, Debug)]
pub struct Session {
    difficulty: Difficulty,
    seed: u64,
    timing: TimingConfig,
    layout: TableLayout,
    registry: CardRegistry,
    round: RoundState,
    watchdog: IdleWatchdog,
    timers: Scheduler<RoundTimer>,
    cues: Vec<Cue>,
    outcome: Option<RoundOutcome>,
    ended_at: Option<u64>,
}

impl Session {
    /// Deal a new round at time `now`.
    ///
    /// The deck and the layout jitter draw from separate streams of `seed`,
    /// so the same seed always deals the same table.
    pub fn deal(ctx: &KioskContext, seed: u64, now: u64) -> Result<Self, ConfigError> {
        let preset = ctx.preset();
        preset.validate(ctx.config.regular_pool.len())?;

        let rng = GameRng::new(seed);
        let deck = build_deck(&preset.deck, &ctx.config.regular_pool, &mut rng.for_context("deck"))?;
        let layout = plan_table(&preset.deck, ctx.viewport, &mut rng.for_context("jitter"));
        let registry = CardRegistry::deal(deck, &layout.placements);

        let round = RoundState::new(preset.max_turns);
        let mut timers = Scheduler::new(now);
        let mut watchdog = IdleWatchdog::from_timing(&preset.timing);
        watchdog.arm(&mut timers);

        let remaining = round.remaining_attempts();
        let cues = vec![Cue::AttemptsChanged {
            remaining,
            low: remaining <= LOW_ATTEMPTS,
        }];

        tracing::info!(
            target: "deal",
            difficulty = %ctx.difficulty,
            seed,
            cards = registry.len(),
            viewport = %ctx.viewport,
            "round dealt"
        );

        Ok(Self {
            difficulty: ctx.difficulty,
            seed,
            timing: preset.timing.clone(),
            layout,
            registry,
            round,
            watchdog,
            timers,
            cues,
            outcome: None,
            ended_at: None,
        })
    }

    /// Handle a tap on a card at time `now`.
    pub fn tap_card(&mut self, card: CardId, now: u64) -> TapResult {
        if !self.accept_input(now) {
            return TapResult::Ignored;
        }
        if self.watchdog.on_input(&mut self.timers, &mut self.cues) {
            return TapResult::WarningDismissed;
        }
        self.with_turn(|round, ctx| round.select_card(ctx, card))
    }

    /// Handle a tap that hit no card at time `now`.
    pub fn tap_empty(&mut self, now: u64) -> TapResult {
        if !self.accept_input(now) {
            return TapResult::Ignored;
        }
        if self.watchdog.on_input(&mut self.timers, &mut self.cues) {
            return TapResult::WarningDismissed;
        }
        self.with_turn(|round, ctx| round.tap_empty(ctx))
    }

    /// Fire every timer due at or before `now`.
    ///
    /// Returns the outcome once the round has ended.
    pub fn advance(&mut self, now: u64) -> Option<RoundOutcome> {
        while self.outcome.is_none() {
            let Some((id, timer)) = self.timers.pop_due(now) else {
                break;
            };

            match timer {
                RoundTimer::Turn(task) => {
                    self.with_turn(|round, ctx| round.on_timer(ctx, task));
                    if let Some(outcome) = self.round.outcome() {
                        self.finish(outcome);
                    }
                }
                RoundTimer::Watchdog(task) => {
                    let event = self.watchdog.on_timer(&mut self.timers, &mut self.cues, id, task);
                    if event == WatchdogEvent::Expired {
                        self.finish(RoundOutcome::TimedOut);
                    }
                }
            }
        }

        self.timers.set_now(now);
        self.outcome
    }

    /// Take every cue queued since the last drain.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Virtual time the round ended: the due time of the timer that ended
    /// it, which may be earlier than the last `advance`.
    #[must_use]
    pub fn ended_at(&self) -> Option<u64> {
        self.ended_at
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// When the next timer fires, if any is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_due()
    }

    #[must_use]
    pub fn is_warning_shown(&self) -> bool {
        self.watchdog.is_warning_shown()
    }

    /// Serializable view of the round for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty,
            seed: self.seed,
            now: self.timers.now(),
            phase: self.round.phase,
            mismatched_turns: self.round.mismatched_turns,
            remaining_attempts: self.round.remaining_attempts(),
            selection: self.round.selection.to_vec(),
            cards: self.registry.iter().cloned().collect(),
            warning_shown: self.watchdog.is_warning_shown(),
            outcome: self.outcome,
            ended_at: self.ended_at,
            next_deadline: self.timers.next_due(),
        }
    }

    /// Fire due timers and report whether input may still be handled.
    fn accept_input(&mut self, now: u64) -> bool {
        if self.advance(now).is_some() {
            tracing::trace!(target: "turn", now, "input after round end");
            return false;
        }
        true
    }

    fn with_turn<R>(
        &mut self,
        f: impl FnOnce(&mut RoundState, &mut TurnContext<'_, RoundTimer>) -> R,
    ) -> R {
        let mut ctx = TurnContext {
            registry: &mut self.registry,
            timers: &mut self.timers,
            cues: &mut self.cues,
            timing: &self.timing,
        };
        f(&mut self.round, &mut ctx)
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.outcome = Some(outcome);
        self.ended_at = Some(self.timers.now());
        self.watchdog.disarm(&mut self.timers);
        self.timers.clear();

        tracing::info!(
            target: "turn",
            ?outcome,
            mismatches = self.round.mismatched_turns,
            cards_left = self.registry.len(),
            now = self.timers.now(),
            "round finished"
        );
    }
}

/// Diagnostic view of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub now: u64,
    pub phase: TurnPhase,
    pub mismatched_turns: u32,
    pub remaining_attempts: u32,
    pub selection: Vec<CardId>,
    pub cards: Vec<CardEntity>,
    pub warning_shown: bool,
    pub outcome: Option<RoundOutcome>,
    pub ended_at: Option<u64>,
    pub next_deadline: Option<u64>,
}
