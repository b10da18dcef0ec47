//! Cards and the draw pile.
//!
//! - `Card`: a standard card (suit × rank 1–13) or a Joker
//! - `Deck`: the ordered draw pile, built per stage

pub mod card;
pub mod deck;

pub use card::{Card, InvalidRank, Suit};
pub use deck::{Deck, MIN_UNREAD, REINSERTED_CARDS};
