//! # high-low
//!
//! Round engine for a shared-screen High & Low party card game.
//!
//! Players take turns guessing whether the next card will be higher or lower
//! than the face-up card. A wrong guess stops the table on a loser; a Joker
//! doubles the cups; every full pass of correct guesses adds cups.
//!
//! ## Design Principles
//!
//! 1. **Commit first**: a guess is resolved and committed before any
//!    presentation runs. Overlays and delays never gate correctness.
//!
//! 2. **Injectable randomness**: decks come from a seeded `GameRng`, so every
//!    session can be replayed.
//!
//! 3. **Plain data out**: front ends read a `Snapshot` and a per-guess
//!    `Resolution`; they never touch engine state directly.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, session state, errors
//! - `cards`: cards and deck construction
//! - `rules`: outcome evaluation, lookahead, and the round engine
//! - `setup`: the setup form, validation, and the session handoff

pub mod core;
pub mod cards;
pub mod rules;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, GameRng, GameState, MissPolicy, PlayerId, Presentation, Roster, SetupError,
    Snapshot, Stage, TurnPhase,
};

pub use crate::cards::{Card, Deck, Suit};

pub use crate::rules::{
    evaluate, FollowUp, Guess, Outcome, ParseGuessError, Resolution, RoundEngine,
    SharedRoundEngine,
};

pub use crate::setup::{SessionHandoff, SetupForm};
