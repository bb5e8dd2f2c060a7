//! Idle watchdog tests, driven through a full session.
//!
//! These tests verify the inactivity flow of an unattended kiosk:
//! - Warning after the inactivity threshold, timeout after the return window
//! - A tap during the warning only clears it
//! - Every tap restarts the countdown

use memory_kiosk::core::{Difficulty, DifficultyPreset, GameConfig, TimingConfig};
use memory_kiosk::cue::Cue;
use memory_kiosk::layout::Viewport;
use memory_kiosk::session::{KioskContext, Session};
use memory_kiosk::turn::{RoundOutcome, TapResult};

fn portrait() -> KioskContext {
    KioskContext::new(GameConfig::default(), Viewport::new(1080, 1920))
}

/// No input: warning at 45s, back to the lobby at 60s.
#[test]
fn test_unattended_round_times_out() {
    let mut session = Session::deal(&portrait(), 21, 0).unwrap();
    session.drain_cues();

    assert_eq!(session.advance(44_999), None);
    assert!(!session.is_warning_shown());

    assert_eq!(session.advance(45_000), None);
    assert!(session.is_warning_shown());
    assert_eq!(session.drain_cues(), vec![Cue::IdleWarningShown]);

    assert_eq!(session.advance(59_999), None);
    assert_eq!(session.advance(60_000), Some(RoundOutcome::TimedOut));
    assert_eq!(session.drain_cues(), vec![Cue::ReturnToLobby]);
    assert_eq!(session.next_deadline(), None);
}

/// A tap during the warning clears it and leaves the round untouched.
#[test]
fn test_tap_during_warning_only_clears_it() {
    let mut session = Session::deal(&portrait(), 21, 0).unwrap();
    let cards: Vec<_> = session.registry().iter().map(|c| c.id).collect();

    // One mismatch before walking away, so there is a count to preserve.
    let first = cards[0];
    let second = session
        .registry()
        .iter()
        .find(|c| c.kind() != session.registry().get(first).unwrap().kind())
        .unwrap()
        .id;
    session.tap_card(first, 1_000);
    session.tap_card(second, 1_100);
    session.advance(10_000);
    assert_eq!(session.round().mismatched_turns, 1);

    session.advance(46_100);
    assert!(session.is_warning_shown());
    session.drain_cues();

    let before = session.round().clone();
    assert_eq!(session.tap_card(cards[2], 50_000), TapResult::WarningDismissed);
    assert_eq!(session.round(), &before);
    assert!(!session.is_warning_shown());
    assert_eq!(session.drain_cues(), vec![Cue::IdleWarningCleared]);

    // The countdown starts over from the dismissing tap.
    assert_eq!(session.next_deadline(), Some(95_000));
    assert_eq!(session.advance(94_999), None);
}

/// Steady play never sees the warning.
#[test]
fn test_taps_keep_round_alive() {
    let mut session = Session::deal(&portrait(), 21, 0).unwrap();

    for step in 1..=10 {
        session.tap_empty(step * 40_000);
        assert!(!session.is_warning_shown());
    }
    assert_eq!(session.outcome(), None);
}

/// Thresholds come from the difficulty preset.
#[test]
fn test_thresholds_follow_preset() {
    let timing = TimingConfig::default().with_idle(5_000, 2_000);
    let config = GameConfig::default()
        .with_preset(Difficulty::Hard, DifficultyPreset::hard().with_timing(timing));
    let ctx = KioskContext::new(config, Viewport::new(1920, 1080)).with_difficulty(Difficulty::Hard);

    let mut session = Session::deal(&ctx, 1, 0).unwrap();
    assert_eq!(session.advance(5_000), None);
    assert!(session.is_warning_shown());
    assert_eq!(session.advance(7_000), Some(RoundOutcome::TimedOut));
}
