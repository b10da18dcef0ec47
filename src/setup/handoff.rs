//! The object passed from the setup screen to the play screen.
//!
//! Strict parsing (`from_json`) is for payloads this crate produced. Lenient
//! parsing (`from_json_lenient`) is for anything that crossed a transport:
//! it never fails, and degrades bad fields to an empty roster, the default
//! stage, or zero cups.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Stage;

/// Validated settings for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHandoff {
    pub players: Vec<String>,
    pub stage: Stage,
    pub start_cups: u64,
    pub add_per_round: u64,
}

impl SessionHandoff {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a payload without ever failing.
    #[must_use]
    pub fn from_json_lenient(json: &str) -> Self {
        let value: Value = serde_json::from_str(json).unwrap_or_else(|err| {
            tracing::warn!(%err, "unreadable handoff, starting with nothing configured");
            Value::Null
        });

        let players = match value.get("players") {
            Some(players) => parse_players(players).unwrap_or_else(|| {
                tracing::warn!("unreadable player list in handoff, no players configured");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let stage = value
            .get("stage")
            .and_then(Value::as_str)
            .map(Stage::from_tag_or_default)
            .unwrap_or_default();

        Self {
            players,
            stage,
            start_cups: parse_count(value.get("startCups")),
            add_per_round: parse_count(value.get("addPerRound")),
        }
    }
}

/// Accepts an array of strings, or a string holding one (the encoded form
/// used when the list travels inside another string).
fn parse_players(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(_) => serde_json::from_value(value.clone()).ok(),
        Value::String(encoded) => serde_json::from_str(encoded).ok(),
        _ => None,
    }
}

fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
