//! Cancelable timers on a virtual clock.
//!
//! The host engine owns real time; the core only sees the millisecond
//! timestamps it is handed. Every delayed action (pair judgement, flip-back,
//! celebration, watchdog, end screens) is a task in a `Scheduler`, so it can
//! be canceled the moment the state it would act on is invalidated.
//!
//! ```
//! use memory_kiosk::schedule::Scheduler;
//!
//! let mut timers = Scheduler::new(0);
//! let flip_back = timers.schedule(3_000, "flip back");
//! let _warn = timers.schedule(45_000, "warn");
//!
//! // A tap at 1s cancels the flip-back before it fires.
//! assert_eq!(timers.cancel(flip_back), Some("flip back"));
//!
//! assert!(timers.pop_due(10_000).is_none());
//! assert_eq!(timers.pop_due(45_000).map(|(_, task)| task), Some("warn"));
//! ```

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    /// Create a timer ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Pending tasks ordered by due time, then by scheduling order.
///
/// Tasks are popped one at a time so that a handler may cancel or schedule
/// other tasks before the next one is considered.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    /// Keyed by (due time, id) so ties fire in scheduling order.
    pending: BTreeMap<(u64, TimerId), T>,

    /// Due time of every pending id, for O(log n) cancel.
    due_at: FxHashMap<TimerId, u64>,

    /// Current virtual time.
    now: u64,

    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler whose clock reads `now`.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            pending: BTreeMap::new(),
            due_at: FxHashMap::default(),
            now,
            next_id: 0,
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward. Never moves it back.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Schedule `task` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;

        let due = self.now.saturating_add(delay_ms);
        self.pending.insert((due, id), task);
        self.due_at.insert(id, due);
        id
    }

    /// Cancel a pending task, returning it.
    ///
    /// Canceling a task that already fired or was canceled returns `None`.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_at.remove(&id)?;
        self.pending.remove(&(due, id))
    }

    /// Check if a task is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_at.contains_key(&id)
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// The clock moves to that task's due time, so tasks scheduled by its
    /// handler are timed from when it fired, not from `until`.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.pending.iter().next()?;
        if due > until {
            return None;
        }

        let task = self.pending.remove(&(due, id))?;
        self.due_at.remove(&id);
        self.set_now(due);
        Some((id, task))
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.due_at.clear();
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
