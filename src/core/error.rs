//! Setup errors.
//!
//! Every variant is recoverable: the setup screen shows the message and the
//! form keeps its input. The round engine itself never returns errors.

use thiserror::Error;

/// Reasons a session cannot start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("need at least 2 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("player {0} has no name")]
    EmptyPlayerName(usize),
    #[error("duplicate player name: {0}")]
    DuplicatePlayerName(String),
    #[error("{field} is not a number: {value:?}")]
    NonNumericConfig { field: &'static str, value: String },
    #[error("{field} must be positive")]
    NonPositiveConfig { field: &'static str },
    #[error("unknown stage: {0}")]
    UnknownStage(String),
    #[error("unknown miss policy: {0}")]
    UnknownMissPolicy(String),
}

/// Result type for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SetupError::InvalidPlayerCount(1).to_string(),
            "need at least 2 players, got 1"
        );
        assert_eq!(
            SetupError::NonNumericConfig { field: "start cups", value: "x".into() }.to_string(),
            "start cups is not a number: \"x\""
        );
        assert_eq!(
            SetupError::NonPositiveConfig { field: "cups per round" }.to_string(),
            "cups per round must be positive"
        );
    }
}
