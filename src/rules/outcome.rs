//! Guess directions and outcome evaluation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::cards::Card;

/// Direction a player bets the next card will go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    High,
    Low,
}

impl Guess {
    /// True if `candidate` is strictly further in the guessed direction than `best`.
    #[must_use]
    pub fn prefers(self, candidate: u8, best: u8) -> bool {
        match self {
            Guess::High => candidate > best,
            Guess::Low => candidate < best,
        }
    }
}

/// Input that names neither direction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a guess: {0:?}")]
pub struct ParseGuessError(pub String);

impl FromStr for Guess {
    type Err = ParseGuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "high" => Ok(Guess::High),
            "l" | "low" => Ok(Guess::Low),
            _ => Err(ParseGuessError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Guess::High => "high",
            Guess::Low => "low",
        })
    }
}

/// Result of comparing the drawn card against the face-up card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Hit,
    Miss,
    /// A Joker was drawn. The guess direction is irrelevant.
    JokerHit,
}

/// Judge a guess. Ties always count as a Hit.
///
/// A face-up Joker (which the engine never leaves face up) compares as 0.
#[must_use]
pub fn evaluate(guess: Guess, current: Card, drawn: Card) -> Outcome {
    let Some(drawn_value) = drawn.value() else {
        return Outcome::JokerHit;
    };
    let current_value = current.value().unwrap_or(0);

    let hit = match guess {
        Guess::High => drawn_value >= current_value,
        Guess::Low => drawn_value <= current_value,
    };

    if hit {
        Outcome::Hit
    } else {
        Outcome::Miss
    }
}
