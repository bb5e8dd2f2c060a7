//! Card tokens: what is printed on a card face.

use serde::{Deserialize, Serialize};

/// The fixed set of regular card faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegularKind {
    Lady,
    Man,
    Pitcher,
    Dog,
    Cat,
    Cookies,
    Cross,
    Guitar,
    Kids,
    Owl,
}

impl RegularKind {
    /// Every regular kind, in catalogue order.
    pub const ALL: [RegularKind; 10] = [
        RegularKind::Lady,
        RegularKind::Man,
        RegularKind::Pitcher,
        RegularKind::Dog,
        RegularKind::Cat,
        RegularKind::Cookies,
        RegularKind::Cross,
        RegularKind::Guitar,
        RegularKind::Kids,
        RegularKind::Owl,
    ];

    /// Lowercase name used in asset keys and instance ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RegularKind::Lady => "lady",
            RegularKind::Man => "man",
            RegularKind::Pitcher => "pitcher",
            RegularKind::Dog => "dog",
            RegularKind::Cat => "cat",
            RegularKind::Cookies => "cookies",
            RegularKind::Cross => "cross",
            RegularKind::Guitar => "guitar",
            RegularKind::Kids => "kids",
            RegularKind::Owl => "owl",
        }
    }
}

/// Matchable category of a card.
///
/// Two cards match when their kinds are equal. Pairing two `Winner` cards
/// ends the round in a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Regular(RegularKind),
    Winner,
}

impl TokenKind {
    #[must_use]
    pub const fn is_winner(self) -> bool {
        matches!(self, TokenKind::Winner)
    }

    /// Lowercase face name (`"dog"`, `"winner"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Regular(kind) => kind.as_str(),
            TokenKind::Winner => "winner",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RegularKind> for TokenKind {
    fn from(kind: RegularKind) -> Self {
        TokenKind::Regular(kind)
    }
}

/// One card of a deal. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardToken {
    pub kind: TokenKind,

    /// Unique within a deal: `winner-0`, `dog-1`, `dog-2`.
    pub instance_id: String,
}

impl CardToken {
    /// The `index`-th winner card.
    #[must_use]
    pub fn winner(index: usize) -> Self {
        Self {
            kind: TokenKind::Winner,
            instance_id: format!("winner-{}", index),
        }
    }

    /// Both cards of a regular pair.
    #[must_use]
    pub fn pair(kind: RegularKind) -> [Self; 2] {
        [1, 2].map(|n| Self {
            kind: TokenKind::Regular(kind),
            instance_id: format!("{}-{}", kind.as_str(), n),
        })
    }

    /// Check whether two tokens match.
    #[must_use]
    pub fn matches(&self, other: &CardToken) -> bool {
        self.kind == other.kind
    }
}
