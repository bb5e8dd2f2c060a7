//! Asset paths the presentation layer loads.
//!
//! Backgrounds come in two variants; landscape files carry a `land_` prefix.

use crate::cards::TokenKind;
use crate::layout::Orientation;

pub const ASSET_DIR: &str = "assets";
pub const CARD_BACK: &str = "assets/card_back.png";
pub const MESSAGES: &str = "assets/fortunes.txt";

/// Full-screen background images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    Lobby,
    Play,
    Winner,
    PlayAgain,
}

impl Background {
    #[must_use]
    pub const fn stem(self) -> &'static str {
        match self {
            Background::Lobby => "lobby",
            Background::Play => "play",
            Background::Winner => "winner",
            Background::PlayAgain => "play_again",
        }
    }

    /// Path of this background for a screen orientation.
    #[must_use]
    pub fn path(self, orientation: Orientation) -> String {
        let prefix = match orientation {
            Orientation::Portrait => "",
            Orientation::Landscape => "land_",
        };
        format!("{ASSET_DIR}/{prefix}{}.jpg", self.stem())
    }
}

/// Face image for a card kind.
#[must_use]
pub fn card_face(kind: TokenKind) -> String {
    format!("{ASSET_DIR}/card_{}.png", kind.as_str())
}
