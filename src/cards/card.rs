//! Playing cards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Spades,
    Diamonds,
    Hearts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Diamonds, Suit::Hearts];

    /// Single-letter code used in card asset names.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Spades => 's',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
        }
    }
}

/// A standard card (rank 1–13) or a Joker.
///
/// Deserializing checks the rank the same way `Card::try_new` does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub enum Card {
    Standard { suit: Suit, rank: u8 },
    Joker,
}

/// Rank outside 1–13.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rank must be 1-13, got {0}")]
pub struct InvalidRank(pub u8);

/// Wire shape of a card, before the rank check.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CardRepr {
    Standard { suit: Suit, rank: u8 },
    Joker,
}

impl TryFrom<CardRepr> for Card {
    type Error = InvalidRank;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        match repr {
            CardRepr::Standard { suit, rank } => Card::try_new(suit, rank),
            CardRepr::Joker => Ok(Card::Joker),
        }
    }
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        match card {
            Card::Standard { suit, rank } => CardRepr::Standard { suit, rank },
            Card::Joker => CardRepr::Joker,
        }
    }
}

impl Card {
    /// Lowest rank (ace).
    pub const MIN_RANK: u8 = 1;
    /// Highest rank (king).
    pub const MAX_RANK: u8 = 13;

    /// Create a standard card.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is outside 1–13.
    #[must_use]
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!(
            (Self::MIN_RANK..=Self::MAX_RANK).contains(&rank),
            "Rank must be 1-13"
        );
        Card::Standard { suit, rank }
    }

    /// Create a standard card, rejecting ranks outside 1–13.
    pub fn try_new(suit: Suit, rank: u8) -> Result<Self, InvalidRank> {
        if (Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            Ok(Card::Standard { suit, rank })
        } else {
            Err(InvalidRank(rank))
        }
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker)
    }

    /// Comparable value; `None` for a Joker.
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Joker => None,
        }
    }

    /// Asset code (`c_07`, `h_13`, `j`).
    #[must_use]
    pub fn code(self) -> String {
        match self {
            Card::Standard { suit, rank } => format!("{}_{:02}", suit.code(), rank),
            Card::Joker => "j".to_string(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Standard { suit, rank } => {
                let face = match rank {
                    1 => "A".to_string(),
                    11 => "J".to_string(),
                    12 => "Q".to_string(),
                    13 => "K".to_string(),
                    n => n.to_string(),
                };
                write!(f, "{}{}", suit.symbol(), face)
            }
            Card::Joker => f.write_str("Joker"),
        }
    }
}
