//! Turn resolution.
//!
//! - `outcome`: guess directions and Hit/Miss/JokerHit evaluation
//! - `lookahead`: stage-driven selection of the next card
//! - `engine`: the state machine tying both to cups, rounds, and rotation

pub mod outcome;
pub mod lookahead;
pub mod engine;

pub use outcome::{evaluate, Guess, Outcome, ParseGuessError};
pub use lookahead::{choose_index, resolve, Draw};
pub use engine::{FollowUp, Resolution, RoundEngine, SharedRoundEngine};
