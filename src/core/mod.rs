//! Core types: players, RNG, configuration, session state, errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use player::{PlayerId, Roster};
pub use rng::GameRng;
pub use config::{EngineConfig, MissPolicy, Presentation, Stage};
pub use state::{GameState, Snapshot, TurnPhase, CUPS_PER_CAP};
pub use error::{Result, SetupError};
