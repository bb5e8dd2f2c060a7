//! Round sessions.
//!
//! A `KioskContext` says what to deal; a `Session` plays one round of it.

pub mod context;
pub mod round;

pub use context::KioskContext;
pub use round::{RoundTimer, Session, SessionSnapshot};
