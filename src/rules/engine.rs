//! The round engine: guess resolution, cup accounting, turn rotation.
//!
//! Every guess runs lookahead selection and evaluation, then commits the new
//! state before returning. Cosmetic follow-ups (Joker overlay, loss display)
//! are reported on the returned `Resolution`; a front end plays them and then
//! calls `finish_presentation`. With `Presentation::Immediate` the follow-up
//! transition is applied inside the commit and nothing needs to be called.
//!
//! ```
//! use high_low::cards::{Card, Deck, Suit};
//! use high_low::core::{EngineConfig, GameRng, Roster, Stage};
//! use high_low::rules::{Guess, Outcome, RoundEngine};
//!
//! let mut cards = vec![Card::new(Suit::Hearts, 7), Card::new(Suit::Clubs, 9)];
//! cards.extend(vec![Card::new(Suit::Spades, 1); 12]);
//!
//! let mut engine = RoundEngine::with_deck(
//!     EngineConfig::new(Stage::Human),
//!     Roster::new(["A", "B"]),
//!     Deck::from_cards(cards),
//!     GameRng::new(42),
//! );
//!
//! let resolution = engine.guess(Guess::High).unwrap();
//! assert_eq!(resolution.outcome, Outcome::Hit);
//! assert_eq!(engine.snapshot().current_player.as_deref(), Some("B"));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use super::lookahead;
use super::outcome::{evaluate, Guess, Outcome};
use crate::cards::{Card, Deck, MIN_UNREAD};
use crate::core::{
    EngineConfig, GameRng, GameState, MissPolicy, PlayerId, Presentation, Roster, Snapshot,
    TurnPhase,
};
use crate::setup::SessionHandoff;

/// Cosmetic step a front end should play before calling `finish_presentation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUp {
    JokerOverlay,
    LossDisplay,
}

/// Record of one committed guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Seat that guessed.
    pub player: PlayerId,
    pub guess: Guess,
    /// Face-up card the guess was made against.
    pub previous: Card,
    pub drawn: Card,
    pub outcome: Outcome,
    /// Slot the drawn card was pulled from, if lookahead moved it.
    pub pulled_from: Option<usize>,
    pub cups_before: u64,
    pub cups_after: u64,
    /// The guess closed a pass around the table.
    pub round_advanced: bool,
    /// The deck ran low and was rebuilt after this draw.
    pub deck_rebuilt: bool,
    /// Pending cosmetic step, when presentation is deferred.
    pub follow_up: Option<FollowUp>,
}

/// Owns one session: configuration, RNG, and mutable state.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    config: EngineConfig,
    rng: GameRng,
    state: GameState,
}

impl RoundEngine {
    /// Start a session with a freshly built deck.
    pub fn new(config: EngineConfig, roster: Roster, mut rng: GameRng) -> Self {
        let deck = Deck::build(config.stage, &mut rng);
        Self::with_deck(config, roster, deck, rng)
    }

    /// Start a session with an explicit deck order.
    ///
    /// Later rebuilds still draw from `rng`.
    pub fn with_deck(config: EngineConfig, roster: Roster, deck: Deck, rng: GameRng) -> Self {
        tracing::info!(
            stage = %config.stage,
            players = roster.len(),
            start_cups = config.start_cups,
            add_per_round = config.add_per_round,
            "session started"
        );
        let state = GameState::new(roster, deck, config.start_cups);
        Self { config, rng, state }
    }

    /// Start a session from a setup handoff.
    pub fn from_handoff(
        handoff: &SessionHandoff,
        miss_policy: MissPolicy,
        presentation: Presentation,
        rng: GameRng,
    ) -> Self {
        let config = EngineConfig {
            stage: handoff.stage,
            start_cups: handoff.start_cups,
            add_per_round: handoff.add_per_round,
            miss_policy,
            presentation,
        };
        Self::new(config, Roster::new(handoff.players.iter().cloned()), rng)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.config.stage, self.config.add_per_round)
    }

    /// The handoff that would recreate this session from setup.
    #[must_use]
    pub fn handoff(&self) -> SessionHandoff {
        SessionHandoff {
            players: self.state.roster.names().to_vec(),
            stage: self.config.stage,
            start_cups: self.config.start_cups,
            add_per_round: self.config.add_per_round,
        }
    }

    /// Card the dealer would draw for `guess`, without committing anything.
    #[must_use]
    pub fn peek(&self, guess: Guess) -> Option<Card> {
        let index = lookahead::choose_index(
            &self.state.deck,
            self.state.cursor,
            guess,
            self.config.stage.lookahead(),
        )?;
        self.state.deck.get(index)
    }

    /// Resolve a guess for the current player.
    ///
    /// Returns `None`, leaving state untouched, when no guess is acceptable:
    /// another resolution is in progress, a follow-up is pending, the session
    /// has failed, or there is no face-up card or player.
    pub fn guess(&mut self, guess: Guess) -> Option<Resolution> {
        if !self.state.can_guess() {
            tracing::debug!(phase = ?self.state.phase, %guess, "guess dropped");
            return None;
        }
        let previous = self.state.current_card?;
        let player = self.state.current_player;

        self.state.phase = TurnPhase::Resolving;

        let Some(draw) = lookahead::resolve(
            &mut self.state.deck,
            self.state.cursor,
            guess,
            self.config.stage.lookahead(),
        ) else {
            self.state.phase = TurnPhase::AwaitingGuess;
            return None;
        };

        let outcome = evaluate(guess, previous, draw.card);
        let cups_before = self.state.cups;
        let mut round_advanced = false;
        let mut follow_up = None;

        self.state.cursor = draw.slot;

        match outcome {
            Outcome::JokerHit => {
                self.state.cups = self.state.cups.saturating_mul(2);
                self.state.current_player = self.state.roster.next(player);
                follow_up = self.park(TurnPhase::JokerPenalty, FollowUp::JokerOverlay);
            }
            Outcome::Hit => {
                self.state.current_card = Some(draw.card);
                if self.state.roster.is_last(player) {
                    self.state.round += 1;
                    self.state.cups = self.state.cups.saturating_add(self.config.add_per_round);
                    round_advanced = true;
                }
                self.state.current_player = self.state.roster.next(player);
                self.state.phase = TurnPhase::AwaitingGuess;
            }
            Outcome::Miss => {
                self.state.current_card = Some(draw.card);
                self.state.loser = Some(player);
                follow_up = match self.config.miss_policy {
                    MissPolicy::Halt => {
                        self.state.phase = TurnPhase::TurnFailed;
                        Some(FollowUp::LossDisplay)
                    }
                    MissPolicy::ContinueSamePlayer => {
                        self.park(TurnPhase::TurnFailed, FollowUp::LossDisplay)
                    }
                };
            }
        }

        let deck_rebuilt = self.replenish();

        tracing::info!(
            player = self.state.roster.name(player).unwrap_or_default(),
            %guess,
            previous = %previous,
            drawn = %draw.card,
            ?outcome,
            cups = self.state.cups,
            round = self.state.round,
            "guess resolved"
        );

        Some(Resolution {
            player,
            guess,
            previous,
            drawn: draw.card,
            outcome,
            pulled_from: draw.reordered().then_some(draw.source),
            cups_before,
            cups_after: self.state.cups,
            round_advanced,
            deck_rebuilt,
            follow_up,
        })
    }

    /// Close a pending Joker overlay or loss display.
    ///
    /// Re-opens guessing after a Joker, and after a Miss when the policy lets
    /// the same player continue. Returns whether anything changed.
    pub fn finish_presentation(&mut self) -> bool {
        match (self.state.phase, self.config.miss_policy) {
            (TurnPhase::JokerPenalty, _)
            | (TurnPhase::TurnFailed, MissPolicy::ContinueSamePlayer) => {
                self.state.phase = TurnPhase::AwaitingGuess;
                true
            }
            _ => false,
        }
    }

    /// Throw away the session and deal a new one with the same players and settings.
    pub fn restart(&mut self) {
        let deck = Deck::build(self.config.stage, &mut self.rng);
        let roster = std::mem::take(&mut self.state.roster);
        self.state = GameState::new(roster, deck, self.config.start_cups);
        tracing::info!(stage = %self.config.stage, "session restarted");
    }

    /// Enter `phase` and report `follow_up`, or skip straight back to
    /// guessing when presentation is immediate.
    fn park(&mut self, phase: TurnPhase, follow_up: FollowUp) -> Option<FollowUp> {
        match self.config.presentation {
            Presentation::Immediate => {
                self.state.phase = TurnPhase::AwaitingGuess;
                None
            }
            Presentation::Deferred => {
                self.state.phase = phase;
                Some(follow_up)
            }
        }
    }

    /// Rebuild the deck when fewer than `MIN_UNREAD` cards are left to draw.
    fn replenish(&mut self) -> bool {
        let unread = self.state.deck.unread_after(self.state.cursor);
        if unread >= MIN_UNREAD {
            return false;
        }
        self.state.deck = Deck::build(self.config.stage, &mut self.rng);
        self.state.cursor = 0;
        tracing::debug!(unread, "deck running low, rebuilt");
        true
    }
}

/// A round engine shared between input handlers.
///
/// `try_guess` takes the lock without waiting. A guess that arrives while
/// another handler holds the engine is dropped, never queued.
#[derive(Clone, Debug)]
pub struct SharedRoundEngine {
    inner: Arc<Mutex<RoundEngine>>,
}

impl SharedRoundEngine {
    #[must_use]
    pub fn new(engine: RoundEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Submit a guess unless another one is in flight.
    pub fn try_guess(&self, guess: Guess) -> Option<Resolution> {
        match self.inner.try_lock() {
            Ok(mut engine) => engine.guess(guess),
            Err(TryLockError::WouldBlock) => {
                tracing::debug!(%guess, "guess dropped, engine busy");
                None
            }
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().guess(guess),
        }
    }

    /// Lock the engine, waiting for any in-flight guess to commit.
    pub fn lock(&self) -> MutexGuard<'_, RoundEngine> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn finish_presentation(&self) -> bool {
        self.lock().finish_presentation()
    }
}
