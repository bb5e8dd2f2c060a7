//! Idle watchdog.
//!
//! A kiosk left mid-round must find its way back to the start screen. After
//! `idle_warning_ms` without a tap the watchdog shows a warning; if the
//! warning is ignored for another `idle_return_ms` the round is abandoned.
//! A tap while the warning is up only dismisses it.

use serde::{Deserialize, Serialize};

use crate::core::TimingConfig;
use crate::cue::Cue;
use crate::schedule::{Scheduler, TimerId};

/// Watchdog timer tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchdogTask {
    /// Inactivity threshold reached: show the warning.
    Warn,
    /// Warning ignored: leave the round.
    Return,
}

/// Result of a watchdog timer firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchdogEvent {
    Continue,
    /// The round must be abandoned.
    Expired,
}

/// Inactivity tracking for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdleWatchdog {
    warning_ms: u64,
    return_ms: u64,
    warn_timer: Option<TimerId>,
    return_timer: Option<TimerId>,
    warning_shown: bool,
}

impl IdleWatchdog {
    #[must_use]
    pub fn new(warning_ms: u64, return_ms: u64) -> Self {
        Self {
            warning_ms,
            return_ms,
            warn_timer: None,
            return_timer: None,
            warning_shown: false,
        }
    }

    /// Watchdog with the thresholds of a timing table.
    #[must_use]
    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self::new(timing.idle_warning_ms, timing.idle_return_ms)
    }

    #[must_use]
    pub fn is_warning_shown(&self) -> bool {
        self.warning_shown
    }

    /// Is any watchdog timer pending?
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.warn_timer.is_some() || self.return_timer.is_some()
    }

    /// Cancel both timers and start the inactivity countdown from now.
    pub fn arm<T: From<WatchdogTask>>(&mut self, timers: &mut Scheduler<T>) {
        self.cancel_timers(timers);
        self.warning_shown = false;
        self.warn_timer = Some(timers.schedule(self.warning_ms, T::from(WatchdogTask::Warn)));
    }

    /// Record a tap.
    ///
    /// Returns true when the tap only dismissed the warning and must not
    /// reach the turn machine.
    pub fn on_input<T: From<WatchdogTask>>(
        &mut self,
        timers: &mut Scheduler<T>,
        cues: &mut Vec<Cue>,
    ) -> bool {
        let dismissed = self.warning_shown;
        self.arm(timers);

        if dismissed {
            cues.push(Cue::IdleWarningCleared);
            tracing::debug!(target: "watchdog", now = timers.now(), "idle warning dismissed");
        }
        dismissed
    }

    /// Handle a fired watchdog timer.
    ///
    /// Timers this watchdog no longer tracks are ignored.
    pub fn on_timer<T: From<WatchdogTask>>(
        &mut self,
        timers: &mut Scheduler<T>,
        cues: &mut Vec<Cue>,
        id: TimerId,
        task: WatchdogTask,
    ) -> WatchdogEvent {
        match task {
            WatchdogTask::Warn if self.warn_timer == Some(id) => {
                self.warn_timer = None;
                self.warning_shown = true;
                self.return_timer =
                    Some(timers.schedule(self.return_ms, T::from(WatchdogTask::Return)));
                cues.push(Cue::IdleWarningShown);
                tracing::debug!(target: "watchdog", now = timers.now(), "idle warning shown");
                WatchdogEvent::Continue
            }
            WatchdogTask::Return if self.return_timer == Some(id) => {
                self.return_timer = None;
                self.warning_shown = false;
                cues.push(Cue::ReturnToLobby);
                tracing::info!(target: "watchdog", now = timers.now(), "idle timeout, leaving round");
                WatchdogEvent::Expired
            }
            _ => {
                tracing::trace!(target: "watchdog", %id, ?task, "stale watchdog timer");
                WatchdogEvent::Continue
            }
        }
    }

    /// Stop watching. Used when the round ends.
    pub fn disarm<T>(&mut self, timers: &mut Scheduler<T>) {
        self.cancel_timers(timers);
        self.warning_shown = false;
    }

    fn cancel_timers<T>(&mut self, timers: &mut Scheduler<T>) {
        if let Some(id) = self.warn_timer.take() {
            timers.cancel(id);
        }
        if let Some(id) = self.return_timer.take() {
            timers.cancel(id);
        }
    }
}
