//! Scene flow tests.
//!
//! These tests verify the kiosk's screen-to-screen flow:
//! - Portrait boot skips the difficulty picker and plays easy
//! - Landscape boot starts on the picker
//! - Win leads to the winner screen, which times out back to the start
//! - Loss leads to the play-again screen, which restarts on a tap
//! - A late poll enters each screen at the time it was due

use memory_kiosk::core::{CardId, Difficulty, GameConfig};
use memory_kiosk::layout::Viewport;
use memory_kiosk::messages::MessageBook;
use memory_kiosk::scenes::{Input, SceneCue, SceneKind, SceneRouter};

const MESSAGES: &str = "Buena suerte \u{2014} Good luck\nbroken line\n";

fn boot(viewport: Viewport) -> SceneRouter {
    SceneRouter::boot(
        GameConfig::default(),
        viewport,
        MessageBook::parse(MESSAGES),
        2024,
        0,
    )
    .unwrap()
}

fn winners(router: &SceneRouter) -> Vec<CardId> {
    router
        .session()
        .unwrap()
        .registry()
        .find(|c| c.kind().is_winner())
        .map(|c| c.id)
        .collect()
}

/// Two cards of different kinds, for forcing mismatches.
fn unequal_pair(router: &SceneRouter) -> (CardId, CardId) {
    let registry = router.session().unwrap().registry();
    let first = registry.iter().next().unwrap();
    let second = registry.iter().find(|c| c.kind() != first.kind()).unwrap();
    (first.id, second.id)
}

/// Portrait kiosks go straight to the lobby on easy.
#[test]
fn test_portrait_boot() {
    let mut router = boot(Viewport::new(1080, 1920));

    assert_eq!(router.scene_kind(), SceneKind::Lobby);
    assert_eq!(router.difficulty(), Difficulty::Easy);

    router.handle_input(Input::Choose(Difficulty::Hard), 10).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Lobby);

    router.handle_input(Input::TapEmpty, 20).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Play);
    assert_eq!(router.session().unwrap().registry().len(), 15);
}

/// Landscape kiosks start on the difficulty picker.
#[test]
fn test_landscape_boot() {
    let mut router = boot(Viewport::new(1920, 1080));
    assert_eq!(router.scene_kind(), SceneKind::DifficultySelect);

    router.handle_input(Input::Choose(Difficulty::Hard), 10).unwrap();
    router.handle_input(Input::TapEmpty, 20).unwrap();

    let session = router.session().unwrap();
    assert_eq!(session.difficulty(), Difficulty::Hard);
    assert_eq!(session.layout().grid.rows, 3);
    assert_eq!(session.layout().grid.columns, 7);
}

/// Win, winner screen, then back to the start after 15s alone.
#[test]
fn test_win_then_timeout_to_start() {
    let mut router = boot(Viewport::new(1920, 1080));
    router.handle_input(Input::Choose(Difficulty::Hard), 0).unwrap();
    router.handle_input(Input::TapEmpty, 0).unwrap();
    router.drain_cues();

    let w = winners(&router);
    router.handle_input(Input::TapCard(w[0]), 1_000).unwrap();
    router.handle_input(Input::TapCard(w[1]), 1_000).unwrap();
    router.advance(2_299).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Play);

    router.advance(2_300).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Winner);
    assert!(router.session().is_none());
    assert_eq!(router.next_deadline(), Some(17_300));

    router.advance(17_299).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Winner);
    router.advance(17_300).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::DifficultySelect);

    let entered: Vec<_> = router
        .drain_cues()
        .into_iter()
        .filter_map(|cue| match cue {
            SceneCue::Entered(kind) => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(entered, vec![SceneKind::Winner, SceneKind::DifficultySelect]);
}

/// Loss, play-again screen, then a tap deals a new round on the same difficulty.
#[test]
fn test_loss_then_replay() {
    let mut router = boot(Viewport::new(1080, 1920));
    router.handle_input(Input::TapEmpty, 0).unwrap();

    let mut now = 0;
    for _ in 0..5 {
        let (first, second) = unequal_pair(&router);
        now += 100;
        router.handle_input(Input::TapCard(first), now).unwrap();
        router.handle_input(Input::TapCard(second), now).unwrap();
        now += 5_000;
        router.advance(now).unwrap();
    }

    assert_eq!(router.scene_kind(), SceneKind::PlayAgain);
    let cues = router.drain_cues();
    assert!(cues.contains(&SceneCue::Round(memory_kiosk::cue::Cue::RoundLost)));

    router.handle_input(Input::TapEmpty, now + 1_000).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Play);
    assert_eq!(router.difficulty(), Difficulty::Easy);
    assert_eq!(router.session().unwrap().round().mismatched_turns, 0);
}

/// The winner screen counts its timeout from the win, not from the poll.
#[test]
fn test_late_poll_keeps_end_screen_timeout() {
    let mut router = boot(Viewport::new(1920, 1080));
    router.handle_input(Input::Choose(Difficulty::Easy), 0).unwrap();
    router.handle_input(Input::TapEmpty, 0).unwrap();

    let w = winners(&router);
    router.handle_input(Input::TapCard(w[0]), 1_000).unwrap();
    router.handle_input(Input::TapCard(w[1]), 1_000).unwrap();

    router.advance(10_000).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Winner);
    assert_eq!(router.next_deadline(), Some(17_300));

    router.advance(40_000).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::DifficultySelect);
}

/// Leaving a round alone returns a portrait kiosk to the lobby.
#[test]
fn test_idle_round_returns_to_lobby() {
    let mut router = boot(Viewport::new(1080, 1920));
    router.handle_input(Input::TapEmpty, 0).unwrap();

    router.advance(60_000).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Lobby);
}

/// End screens show a message when the picked line is well formed.
#[test]
fn test_end_screen_message() {
    let book = MessageBook::parse("Buena suerte \u{2014} Good luck\n");
    let mut router =
        SceneRouter::boot(GameConfig::default(), Viewport::new(1080, 1920), book, 5, 0).unwrap();
    router.handle_input(Input::TapEmpty, 0).unwrap();

    let w = winners(&router);
    router.handle_input(Input::TapCard(w[0]), 10).unwrap();
    router.handle_input(Input::TapCard(w[1]), 20).unwrap();
    router.advance(5_000).unwrap();
    assert_eq!(router.scene_kind(), SceneKind::Winner);

    let message = router.drain_cues().into_iter().find_map(|cue| match cue {
        SceneCue::Message(message) => Some(message),
        _ => None,
    });
    let message = message.unwrap();
    assert_eq!(message.spanish, "Buena suerte");
    assert_eq!(message.english, "Good luck");
}
