//! Session state and the read-only snapshot handed to presentation.
//!
//! ## GameState
//!
//! Everything the round engine mutates: roster and rotation, round and cup
//! counters, the turn phase, the deck with its read cursor, and the card
//! currently face up.
//!
//! ## Snapshot
//!
//! Plain data a front end renders after each transition.

use serde::{Deserialize, Serialize};

use super::config::Stage;
use super::player::{PlayerId, Roster};
use crate::cards::{Card, Deck};

/// Cups per cap, the larger display unit.
pub const CUPS_PER_CAP: u64 = 5;

/// Where the turn state machine currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// A guess will be accepted.
    #[default]
    AwaitingGuess,
    /// A guess is being resolved. Any other guess is dropped.
    Resolving,
    /// A Joker was drawn; waiting for the overlay to finish.
    JokerPenalty,
    /// The last guess missed.
    TurnFailed,
}

/// Mutable session state owned by the round engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub roster: Roster,

    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// Round number (starts at 1).
    pub round: u32,

    /// Cups on the table.
    pub cups: u64,

    pub phase: TurnPhase,

    pub deck: Deck,

    /// Index of the face-up card's slot in `deck`. The next draw is `cursor + 1`.
    pub cursor: usize,

    /// Face-up card. Unchanged by a Joker draw.
    pub current_card: Option<Card>,

    /// Seat that missed most recently.
    pub loser: Option<PlayerId>,
}

impl GameState {
    /// Fresh state with the deck's first card face up.
    #[must_use]
    pub fn new(roster: Roster, deck: Deck, start_cups: u64) -> Self {
        let current_card = deck.get(0);
        Self {
            roster,
            current_player: PlayerId::default(),
            round: 1,
            cups: start_cups,
            phase: TurnPhase::AwaitingGuess,
            deck,
            cursor: 0,
            current_card,
            loser: None,
        }
    }

    /// Whether a guess would be accepted right now.
    ///
    /// Requires a face-up card and at least one seated player.
    #[must_use]
    pub fn can_guess(&self) -> bool {
        self.phase == TurnPhase::AwaitingGuess
            && self.current_card.is_some()
            && !self.roster.is_empty()
    }

    #[must_use]
    pub fn current_player_name(&self) -> Option<&str> {
        self.roster.name(self.current_player)
    }

    /// Cups converted into caps, rounded down.
    #[must_use]
    pub fn caps(&self) -> u64 {
        self.cups / CUPS_PER_CAP
    }
}

/// Read-only view of a session after a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stage: Stage,
    pub add_per_round: u64,
    pub round: u32,
    pub cups: u64,
    pub caps: u64,
    /// `None` when no players are configured.
    pub current_player: Option<String>,
    pub current_card: Option<Card>,
    pub can_guess: bool,
    pub joker_active: bool,
    pub loss_active: bool,
    pub loser: Option<String>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(state: &GameState, stage: Stage, add_per_round: u64) -> Self {
        Self {
            stage,
            add_per_round,
            round: state.round,
            cups: state.cups,
            caps: state.caps(),
            current_player: state.current_player_name().map(str::to_string),
            current_card: state.current_card,
            can_guess: state.can_guess(),
            joker_active: state.phase == TurnPhase::JokerPenalty,
            loss_active: state.phase == TurnPhase::TurnFailed,
            loser: state
                .loser
                .and_then(|p| state.roster.name(p))
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn sample_state() -> GameState {
        let deck = Deck::from_cards(vec![Card::new(Suit::Hearts, 7), Card::new(Suit::Clubs, 9)]);
        GameState::new(Roster::new(["A", "B"]), deck, 12)
    }

    #[test]
    fn test_new_state() {
        let state = sample_state();

        assert_eq!(state.round, 1);
        assert_eq!(state.cups, 12);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.current_card, Some(Card::new(Suit::Hearts, 7)));
        assert_eq!(state.current_player_name(), Some("A"));
        assert!(state.can_guess());
        assert_eq!(state.caps(), 2);
    }

    #[test]
    fn test_can_guess_depends_on_phase() {
        let mut state = sample_state();
        for phase in [TurnPhase::Resolving, TurnPhase::JokerPenalty, TurnPhase::TurnFailed] {
            state.phase = phase;
            assert!(!state.can_guess());
        }
    }

    #[test]
    fn test_snapshot() {
        let mut state = sample_state();
        state.phase = TurnPhase::TurnFailed;
        state.loser = Some(PlayerId::new(1));

        let snap = Snapshot::capture(&state, Stage::Demon, 2);
        assert_eq!(snap.stage, Stage::Demon);
        assert_eq!(snap.add_per_round, 2);
        assert_eq!(snap.current_player.as_deref(), Some("A"));
        assert_eq!(snap.loser.as_deref(), Some("B"));
        assert!(snap.loss_active);
        assert!(!snap.joker_active);
        assert!(!snap.can_guess);
    }

    #[test]
    fn test_snapshot_without_players() {
        let deck = Deck::from_cards(vec![Card::new(Suit::Hearts, 7)]);
        let state = GameState::new(Roster::default(), deck, 0);
        let snap = Snapshot::capture(&state, Stage::Human, 1);
        assert_eq!(snap.current_player, None);
        assert!(!snap.can_guess);
    }
}
