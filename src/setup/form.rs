//! Setup screen state: roster editing, cup inputs, stage choice.
//!
//! The form never loses input on a failed start. Errors are kept on the form
//! until dismissed so a front end can show them as a blocking message.

use serde::Deserialize;

use super::handoff::SessionHandoff;
use super::validate::{parse_cups, require_positive, validate_players, MIN_PLAYERS};
use crate::core::error::{Result, SetupError};
use crate::core::Stage;

/// Largest table the player-count selector offers.
pub const MAX_PLAYERS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupForm {
    players: Vec<String>,
    player_count: usize,
    backup: Vec<String>,
    dialog_open: bool,
    start_cups: String,
    add_per_round: String,
    stage: Stage,
    error: Option<SetupError>,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            player_count: MIN_PLAYERS,
            backup: Vec::new(),
            dialog_open: false,
            start_cups: String::new(),
            add_per_round: String::new(),
            stage: Stage::default(),
            error: None,
        }
    }
}

/// Saved roster entries: plain names or `{ "name": ... }` records.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedPlayer {
    Name(String),
    Record { name: String },
}

impl SavedPlayer {
    fn into_name(self) -> String {
        match self {
            SavedPlayer::Name(name) | SavedPlayer::Record { name } => name,
        }
    }
}

impl SetupForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from the session the players just left.
    #[must_use]
    pub fn resume(handoff: &SessionHandoff) -> Self {
        let mut form = Self::new();
        form.set_players(handoff.players.clone());
        form.stage = handoff.stage;
        form.start_cups = handoff.start_cups.to_string();
        form.add_per_round = handoff.add_per_round.to_string();
        form
    }

    /// Prefill the roster from a saved player list. A malformed list is ignored.
    pub fn resume_players_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Vec<SavedPlayer>>(json) {
            Ok(saved) => {
                self.set_players(saved.into_iter().map(SavedPlayer::into_name).collect());
                true
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable saved players");
                false
            }
        }
    }

    /// Replace the whole roster, as typed.
    pub fn set_players(&mut self, players: Vec<String>) {
        self.player_count = players.len();
        self.players = players;
    }

    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn start_cups(&self) -> &str {
        &self.start_cups
    }

    #[must_use]
    pub fn add_per_round(&self) -> &str {
        &self.add_per_round
    }

    /// Pending error message, if the last action failed.
    #[must_use]
    pub fn error(&self) -> Option<&SetupError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Open the roster dialog, remembering the roster so cancel can restore it.
    pub fn open_roster_dialog(&mut self) {
        self.backup = self.players.clone();
        let count = if self.players.is_empty() {
            MIN_PLAYERS
        } else {
            self.players.len()
        };
        self.set_player_count(count);
        self.dialog_open = true;
    }

    /// Resize the roster, padding with blank names or dropping trailing seats.
    pub fn set_player_count(&mut self, count: usize) {
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.player_count = count;
        self.players.resize(count, String::new());
    }

    pub fn set_player_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(slot) = self.players.get_mut(index) {
            *slot = name.into();
        }
    }

    pub fn remove_player(&mut self, index: usize) {
        if index < self.players.len() {
            self.players.remove(index);
        }
    }

    /// Close the dialog if the roster is valid; otherwise keep it open and
    /// record the error.
    pub fn confirm_roster_dialog(&mut self) -> Result<()> {
        match validate_players(&self.players) {
            Ok(_) => {
                self.dialog_open = false;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn cancel_roster_dialog(&mut self) {
        self.players = std::mem::take(&mut self.backup);
        self.player_count = self.players.len();
        self.dialog_open = false;
    }

    /// Update the starting cups input. Non-digit input is ignored.
    pub fn set_start_cups(&mut self, input: &str) -> bool {
        accept_digits(&mut self.start_cups, input)
    }

    /// Update the per-round cups input. Non-digit input is ignored.
    pub fn set_add_per_round(&mut self, input: &str) -> bool {
        accept_digits(&mut self.add_per_round, input)
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Validate everything and produce the handoff for the play screen.
    pub fn start(&mut self) -> Result<SessionHandoff> {
        let result = self.build_handoff();
        if let Err(err) = &result {
            self.error = Some(err.clone());
        }
        result
    }

    fn build_handoff(&self) -> Result<SessionHandoff> {
        let players = validate_players(&self.players)?;

        let start = parse_cups("start cups", &self.start_cups)?;
        let add = parse_cups("cups per round", &self.add_per_round)?;

        Ok(SessionHandoff {
            players,
            stage: self.stage,
            start_cups: require_positive("start cups", start)?,
            add_per_round: require_positive("cups per round", add)?,
        })
    }

    fn fail(&mut self, err: SetupError) -> SetupError {
        self.error = Some(err.clone());
        err
    }
}

fn accept_digits(field: &mut String, input: &str) -> bool {
    if input.chars().all(|c| c.is_ascii_digit()) {
        *field = input.to_string();
        true
    } else {
        false
    }
}
