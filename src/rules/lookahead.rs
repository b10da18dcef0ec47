//! Lookahead draw selection.
//!
//! On stages with a positive lookahead the dealer peeks at the next
//! `lookahead + 1` cards and pulls the one furthest in the guessed direction
//! into the next-draw slot. The scan starts from the naive next card and only
//! a strictly better standard card replaces it. Jokers deeper in the window
//! are never pulled forward.

use super::outcome::Guess;
use crate::cards::{Card, Deck};

/// The card chosen for a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draw {
    pub card: Card,
    /// Slot the card came from before any swap.
    pub source: usize,
    /// Slot the card now occupies (`cursor + 1`).
    pub slot: usize,
}

impl Draw {
    /// Whether the card was pulled forward from deeper in the deck.
    #[must_use]
    pub fn reordered(&self) -> bool {
        self.source != self.slot
    }
}

/// Index of the card the dealer would draw, without touching the deck.
///
/// Returns `None` if there is no card after `cursor`.
#[must_use]
pub fn choose_index(deck: &Deck, cursor: usize, guess: Guess, lookahead: i32) -> Option<usize> {
    let start = cursor + 1;
    let first = deck.get(start)?;

    if lookahead <= 0 {
        return Some(start);
    }

    let Some(mut best_value) = first.value() else {
        return Some(start);
    };
    let mut best_index = start;

    let end = (start + lookahead as usize).min(deck.len() - 1);
    for index in start + 1..=end {
        let Some(value) = deck.get(index).and_then(Card::value) else {
            continue;
        };
        if guess.prefers(value, best_value) {
            best_value = value;
            best_index = index;
        }
    }

    Some(best_index)
}

/// Pick the next card for `guess` and swap it into the next-draw slot.
pub fn resolve(deck: &mut Deck, cursor: usize, guess: Guess, lookahead: i32) -> Option<Draw> {
    let slot = cursor + 1;
    let source = choose_index(deck, cursor, guess, lookahead)?;

    if source != slot {
        deck.swap(slot, source);
        tracing::debug!(source, slot, %guess, "lookahead pulled card forward");
    }

    Some(Draw {
        card: deck.get(slot)?,
        source,
        slot,
    })
}
