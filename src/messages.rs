//! Bilingual end-screen messages.
//!
//! The message file holds one message per line, Spanish first, the two
//! halves separated by a spaced em dash. Blank lines are skipped. Only the
//! first `PICK_WINDOW` messages are ever shown.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Separator between the Spanish and English halves of a line.
pub const SEPARATOR: &str = " \u{2014} ";

/// Number of leading messages a pick draws from.
pub const PICK_WINDOW: usize = 50;

/// One message in both languages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualMessage {
    pub spanish: String,
    pub english: String,
}

impl BilingualMessage {
    /// Split a raw line. Lines without a separator yield `None`.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split(SEPARATOR);
        let spanish = parts.next()?.trim();
        let english = parts.next()?.trim();

        Some(Self {
            spanish: spanish.to_string(),
            english: english.to_string(),
        })
    }
}

/// The non-empty lines of a message file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageBook {
    lines: Vec<String>,
}

impl MessageBook {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pick a random message from the first `PICK_WINDOW` lines.
    ///
    /// A picked line that does not split into two halves shows nothing.
    pub fn pick(&self, rng: &mut GameRng) -> Option<BilingualMessage> {
        if self.lines.is_empty() {
            return None;
        }
        let window = self.lines.len().min(PICK_WINDOW);
        let index = rng.gen_range(0..window);
        BilingualMessage::parse_line(&self.lines[index])
    }
}
