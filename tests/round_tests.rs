//! Round engine scenario tests.
//!
//! These drive whole sessions through the public API with scripted decks:
//! - Hit/Miss/Joker transitions and turn rotation
//! - Round and cup accounting across passes
//! - Lookahead pulling cards forward on the harder stages
//! - Dropped guesses while the engine is busy or parked

use high_low::cards::{Card, Deck, Suit};
use high_low::core::{EngineConfig, GameRng, MissPolicy, PlayerId, Roster, Stage, TurnPhase};
use high_low::rules::{FollowUp, Guess, Outcome, RoundEngine, SharedRoundEngine};
use high_low::setup::{SessionHandoff, SetupForm};

fn card(rank: u8) -> Card {
    Card::new(Suit::Clubs, rank)
}

/// Scripted deck; 0 is a Joker. Padded with aces so no rebuild interferes.
fn scripted(ranks: &[u8]) -> Deck {
    let mut cards: Vec<Card> = ranks
        .iter()
        .map(|&r| if r == 0 { Card::Joker } else { card(r) })
        .collect();
    cards.extend(std::iter::repeat(card(1)).take(30));
    Deck::from_cards(cards)
}

fn table(config: EngineConfig, players: &[&str], ranks: &[u8]) -> RoundEngine {
    RoundEngine::with_deck(
        config,
        Roster::new(players.iter().copied()),
        scripted(ranks),
        GameRng::new(2024),
    )
}

/// Human stage, A then B: a Hit passes the turn, a Miss stops on B.
#[test]
fn test_human_hit_then_miss() {
    let config = EngineConfig::new(Stage::Human).with_start_cups(1).with_add_per_round(1);
    let mut engine = table(config, &["A", "B"], &[7, 9, 3]);

    let first = engine.guess(Guess::High).expect("A may guess");
    assert_eq!(first.outcome, Outcome::Hit);
    let snap = engine.snapshot();
    assert_eq!(snap.cups, 1);
    assert_eq!(snap.round, 1);
    assert_eq!(snap.current_player.as_deref(), Some("B"));

    let second = engine.guess(Guess::High).expect("B may guess");
    assert_eq!(second.outcome, Outcome::Miss);
    let snap = engine.snapshot();
    assert_eq!(snap.loser.as_deref(), Some("B"));
    assert_eq!(snap.cups, 1);
    assert_eq!(snap.round, 1);
    assert_eq!(snap.current_card, Some(card(3)));
}

/// Extreme stage looks two cards past the next one.
#[test]
fn test_extreme_pulls_best_card_forward() {
    let mut engine = table(EngineConfig::new(Stage::Extreme), &["A", "B"], &[5, 6, 9, 2]);

    let r = engine.guess(Guess::High).unwrap();
    assert_eq!(r.drawn, card(9));
    assert_eq!(r.pulled_from, Some(2));

    let deck = &engine.state().deck;
    assert_eq!(deck.get(1), Some(card(9)));
    assert_eq!(deck.get(2), Some(card(6)));
    assert_eq!(deck.get(3), Some(card(2)));
}

/// Demon stage looks one card past the next one.
#[test]
fn test_demon_window_is_two_cards() {
    let mut engine = table(EngineConfig::new(Stage::Demon), &["A", "B"], &[8, 9, 3, 1]);

    let r = engine.guess(Guess::Low).unwrap();
    assert_eq!(r.drawn, card(3));
    assert_eq!(r.outcome, Outcome::Hit);
}

/// Heaven and human draw the next card as-is.
#[test]
fn test_easy_stages_never_reorder() {
    for stage in [Stage::Heaven, Stage::Human] {
        let mut engine = table(EngineConfig::new(stage), &["A", "B"], &[5, 6, 13]);
        let r = engine.guess(Guess::High).unwrap();
        assert_eq!(r.drawn, card(6));
        assert_eq!(r.pulled_from, None);
    }
}

/// A Joker doubles cups for either guess and moves on to the next player.
#[test]
fn test_joker_doubles_regardless_of_guess() {
    for guess in [Guess::High, Guess::Low] {
        let config = EngineConfig::new(Stage::Extreme).with_start_cups(5);
        let mut engine = table(config, &["A", "B", "C"], &[10, 0, 1, 13]);

        let r = engine.guess(guess).unwrap();
        assert_eq!(r.outcome, Outcome::JokerHit);
        assert_eq!(r.cups_after, 10);
        assert_eq!(engine.state().current_player, PlayerId::new(1));
        assert_eq!(engine.state().current_card, Some(card(10)));
    }
}

/// A Joker drawn by the last seat does not count as completing the pass.
#[test]
fn test_joker_does_not_advance_round() {
    let config = EngineConfig::new(Stage::Human).with_start_cups(1).with_add_per_round(10);
    let mut engine = table(config, &["A", "B"], &[4, 5, 0, 6]);

    engine.guess(Guess::High).unwrap();
    let r = engine.guess(Guess::High).unwrap();

    assert_eq!(r.outcome, Outcome::JokerHit);
    assert!(!r.round_advanced);
    assert_eq!(engine.state().round, 1);
    assert_eq!(engine.state().cups, 2);
    assert_eq!(engine.state().current_player, PlayerId::new(0));
}

/// Rounds count full passes of Hits.
#[test]
fn test_rounds_count_full_passes() {
    let config = EngineConfig::new(Stage::Human).with_start_cups(1).with_add_per_round(2);
    let mut engine = table(config, &["A", "B", "C"], &[2, 3, 4, 5, 6, 7, 8]);

    for expected_round in [1, 1, 2, 2, 2, 3] {
        engine.guess(Guess::High).unwrap();
        assert_eq!(engine.state().round, expected_round);
    }
    assert_eq!(engine.state().cups, 5);
}

/// Halt policy: nothing more happens until restart.
#[test]
fn test_halt_requires_restart() {
    let config = EngineConfig::new(Stage::Human).with_start_cups(2).deferred();
    let mut engine = table(config, &["A", "B"], &[7, 2]);

    let r = engine.guess(Guess::High).unwrap();
    assert_eq!(r.follow_up, Some(FollowUp::LossDisplay));
    assert_eq!(engine.state().phase, TurnPhase::TurnFailed);

    assert!(!engine.finish_presentation());
    assert!(engine.guess(Guess::High).is_none());
    assert!(engine.guess(Guess::Low).is_none());

    engine.restart();
    assert!(engine.snapshot().can_guess);
    assert_eq!(engine.snapshot().cups, 2);
}

/// Continue policy: the loser guesses again after the display.
#[test]
fn test_continue_policy_keeps_loser_at_the_table() {
    let config = EngineConfig::new(Stage::Human)
        .with_miss_policy(MissPolicy::ContinueSamePlayer)
        .deferred();
    let mut engine = table(config, &["A", "B"], &[7, 9, 3, 4]);

    engine.guess(Guess::High).unwrap();
    engine.guess(Guess::High).unwrap();
    assert!(engine.snapshot().loss_active);

    engine.finish_presentation();
    let r = engine.guess(Guess::High).unwrap();
    assert_eq!(r.player, PlayerId::new(1));
    assert_eq!(r.outcome, Outcome::Hit);
}

/// Guesses during a pending Joker overlay are dropped without side effects.
#[test]
fn test_guess_during_overlay_is_dropped() {
    let config = EngineConfig::new(Stage::Demon).with_start_cups(3).deferred();
    let mut engine = table(config, &["A", "B"], &[6, 0, 7, 8]);

    engine.guess(Guess::High).unwrap();
    let committed = engine.snapshot();
    let cursor = engine.state().cursor;

    assert!(engine.guess(Guess::Low).is_none());
    assert_eq!(engine.snapshot(), committed);
    assert_eq!(engine.state().cursor, cursor);
}

/// A second handler's guess is dropped while the first holds the engine.
#[test]
fn test_concurrent_guess_is_dropped() {
    let engine = table(EngineConfig::new(Stage::Human), &["A", "B"], &[7, 9, 11]);
    let shared = SharedRoundEngine::new(engine);
    let other = shared.clone();

    let guard = shared.lock();
    let before = guard.snapshot();
    let dropped = std::thread::spawn(move || other.try_guess(Guess::High))
        .join()
        .unwrap();
    assert!(dropped.is_none());
    assert_eq!(guard.snapshot(), before);
    drop(guard);

    assert!(shared.try_guess(Guess::High).is_some());
    assert_eq!(shared.snapshot().current_player.as_deref(), Some("B"));
}

/// The deck is rebuilt under ten unread cards without touching progress.
#[test]
fn test_long_session_rebuilds_deck() {
    let config = EngineConfig::new(Stage::Extreme)
        .with_miss_policy(MissPolicy::ContinueSamePlayer)
        .with_start_cups(1);
    let mut engine = RoundEngine::new(config, Roster::new(["A", "B", "C"]), GameRng::new(77));

    let mut rebuilds = 0;
    for i in 0..300 {
        let guess = if i % 2 == 0 { Guess::High } else { Guess::Low };
        let round = engine.state().round;
        let cups = engine.state().cups;
        let r = engine.guess(guess).expect("continue policy never parks");

        if r.deck_rebuilt {
            rebuilds += 1;
            assert_eq!(engine.state().cursor, 0);
            assert!(engine.state().current_card.is_some_and(|c| !c.is_joker()));
        }
        assert!(engine.state().deck.unread_after(engine.state().cursor) >= 10);
        assert!(engine.state().round >= round);
        assert!(engine.state().cups >= cups);
    }
    assert!(rebuilds > 0);
}

/// Setup feeds the engine through a serialized handoff.
#[test]
fn test_setup_to_engine_handoff() {
    let mut form = SetupForm::new();
    form.open_roster_dialog();
    form.set_player_count(3);
    form.set_player_name(0, "Aki");
    form.set_player_name(1, "Ben");
    form.set_player_name(2, "Chie");
    form.confirm_roster_dialog().unwrap();
    form.set_start_cups("4");
    form.set_add_per_round("2");
    form.set_stage(Stage::Demon);

    let handoff = form.start().unwrap();
    let payload = handoff.to_json().unwrap();
    let received = SessionHandoff::from_json_lenient(&payload);

    let engine = RoundEngine::from_handoff(
        &received,
        MissPolicy::Halt,
        Default::default(),
        GameRng::new(3),
    );
    let snap = engine.snapshot();
    assert_eq!(snap.stage, Stage::Demon);
    assert_eq!(snap.cups, 4);
    assert_eq!(snap.add_per_round, 2);
    assert_eq!(snap.current_player.as_deref(), Some("Aki"));

    // Reinserted samples may repeat a Joker; the base deck holds exactly four.
    let deck = &engine.state().deck;
    let base = &deck.cards()[..52 + Stage::Demon.joker_count()];
    assert_eq!(base.iter().filter(|c| c.is_joker()).count(), 4);
    assert!(deck.joker_count() >= 4);

    let back = SetupForm::resume(&engine.handoff());
    assert_eq!(back.players(), handoff.players.as_slice());
}

/// A broken handoff starts a session with nobody to guess.
#[test]
fn test_broken_handoff_fails_closed() {
    let received = SessionHandoff::from_json_lenient(r#"{"players":42,"stage":"nope"}"#);
    let mut engine = RoundEngine::from_handoff(
        &received,
        MissPolicy::Halt,
        Default::default(),
        GameRng::new(3),
    );

    let snap = engine.snapshot();
    assert_eq!(snap.stage, Stage::Human);
    assert_eq!(snap.current_player, None);
    assert!(!snap.can_guess);
    assert!(engine.guess(Guess::High).is_none());
}
