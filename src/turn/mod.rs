//! Turn handling: round state plus the tap/timer state machine.

pub mod machine;
pub mod state;

pub use machine::{TurnContext, TurnTask, LOW_ATTEMPTS};
pub use state::{PendingMismatch, RoundOutcome, RoundState, TapResult, TurnPhase};
