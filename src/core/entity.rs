//! Card identity handed to the presentation layer.
//!
//! When a round is dealt, every card is registered with the engine under an
//! opaque `CardId`. Taps come back tagged with that id; the core never sees
//! the engine's own objects.
//!
//! ```
//! use memory_kiosk::core::CardId;
//!
//! let id = CardId::new(3);
//! assert_eq!(id.raw(), 3);
//! assert_eq!(format!("{}", id), "Card(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Opaque identifier for a dealt card.
///
/// Ids are allocated in deal order starting at 0 and are never reused
/// within a round, so an id held by the engine after its card was retired
/// simply misses in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
