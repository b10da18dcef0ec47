//! Deck construction and positional access.
//!
//! A fresh deck is the 52 standard cards plus the stage's Jokers, shuffled,
//! followed by 10 extra cards sampled from the shuffled deck. The extra
//! cards make some values recur more often than others. A deck whose first
//! card is a Joker is thrown away and rebuilt so the opening card always has
//! a value to compare against.

use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use crate::core::{GameRng, Stage};

/// Cards sampled from the shuffled deck and appended to it.
pub const REINSERTED_CARDS: usize = 10;

/// Below this many unread cards the engine builds a fresh deck.
pub const MIN_UNREAD: usize = 10;

/// Ordered draw pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a fresh deck for a stage.
    pub fn build(stage: Stage, rng: &mut GameRng) -> Self {
        let mut attempts = 1u32;
        let mut cards = Self::build_once(stage, rng);
        while cards.first().is_some_and(|c| c.is_joker()) {
            attempts += 1;
            cards = Self::build_once(stage, rng);
        }
        tracing::debug!(%stage, len = cards.len(), attempts, "built deck");
        Self { cards }
    }

    fn build_once(stage: Stage, rng: &mut GameRng) -> Vec<Card> {
        let jokers = stage.joker_count();
        let mut cards = Vec::with_capacity(52 + jokers + REINSERTED_CARDS);

        for suit in Suit::ALL {
            for rank in Card::MIN_RANK..=Card::MAX_RANK {
                cards.push(Card::new(suit, rank));
            }
        }
        cards.extend(std::iter::repeat(Card::Joker).take(jokers));

        rng.shuffle(&mut cards);

        let shuffled_len = cards.len();
        for _ in 0..REINSERTED_CARDS {
            if let Some(pick) = rng.choose(&cards[..shuffled_len]).copied() {
                cards.push(pick);
            }
        }

        cards
    }

    /// Wrap an explicit card order. Used to script draws in tests and replays.
    ///
    /// # Panics
    ///
    /// Panics if `cards` is empty or starts with a Joker.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        assert!(!cards.is_empty(), "Deck must not be empty");
        assert!(!cards[0].is_joker(), "Deck must not start with a Joker");
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    /// Cards after the one at `cursor` that have not been drawn.
    #[must_use]
    pub fn unread_after(&self, cursor: usize) -> usize {
        self.cards.len().saturating_sub(cursor + 1)
    }

    /// Number of Jokers in the deck, reinserted copies included.
    #[must_use]
    pub fn joker_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_joker()).count()
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.cards.swap(a, b);
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
