//! Card system: tokens, deck building, entities, and the live registry.
//!
//! ## Key Types
//!
//! - `RegularKind` / `TokenKind`: what a card face shows
//! - `CardToken`: one card of a deal, before it is on the table
//! - `build_deck`: the shuffled multiset for one round
//! - `CardEntity`: a dealt card with its flipped / matched flags
//! - `CardRegistry`: the cards still on the table

pub mod deck;
pub mod instance;
pub mod registry;
pub mod token;

pub use deck::build_deck;
pub use instance::CardEntity;
pub use registry::CardRegistry;
pub use token::{CardToken, RegularKind, TokenKind};
