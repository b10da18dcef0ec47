//! Session configuration types.
//!
//! A session is configured once at startup by providing:
//! - `Stage`: difficulty tier (Joker density and lookahead)
//! - `MissPolicy`: what happens after a wrong guess
//! - `Presentation`: whether cosmetic follow-ups run inline or wait for a clock
//! - `EngineConfig`: combines all configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::SetupError;

/// Difficulty tier.
///
/// Higher stages add Jokers to the deck and let the dealer peek further
/// ahead when picking the next card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Heaven,
    #[default]
    Human,
    Demon,
    Extreme,
}

impl Stage {
    /// All stages from easiest to hardest.
    pub const ALL: [Stage; 4] = [Stage::Heaven, Stage::Human, Stage::Demon, Stage::Extreme];

    /// Jokers added to a fresh deck.
    #[must_use]
    pub const fn joker_count(self) -> usize {
        match self {
            Stage::Heaven | Stage::Human => 0,
            Stage::Demon => 4,
            Stage::Extreme => 6,
        }
    }

    /// Upcoming positions the dealer may inspect before committing a draw.
    ///
    /// Zero or less means the next card is drawn as-is.
    #[must_use]
    pub const fn lookahead(self) -> i32 {
        match self {
            Stage::Heaven => -1,
            Stage::Human => 0,
            Stage::Demon => 1,
            Stage::Extreme => 2,
        }
    }

    /// Wire tag used in handoff payloads.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Stage::Heaven => "heaven",
            Stage::Human => "human",
            Stage::Demon => "demon",
            Stage::Extreme => "extreme",
        }
    }

    /// Name shown on the table.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Stage::Heaven => "天界",
            Stage::Human => "人間界",
            Stage::Demon => "魔界",
            Stage::Extreme => "極界",
        }
    }

    /// Parse a wire tag, falling back to the default stage.
    #[must_use]
    pub fn from_tag_or_default(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::warn!(tag, "unknown stage tag, using default stage");
            Stage::default()
        })
    }
}

impl FromStr for Stage {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.tag() == s)
            .ok_or_else(|| SetupError::UnknownStage(s.to_string()))
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// What happens after a Miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissPolicy {
    /// The session stays failed until it is restarted or abandoned.
    #[default]
    Halt,
    /// After the loss display, the same player guesses again.
    ContinueSamePlayer,
}

impl FromStr for MissPolicy {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "halt" => Ok(MissPolicy::Halt),
            "continue" | "continue-same-player" => Ok(MissPolicy::ContinueSamePlayer),
            other => Err(SetupError::UnknownMissPolicy(other.to_string())),
        }
    }
}

/// How cosmetic follow-ups (Joker overlay, loss display) are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Follow-ups run inside the commit. Used headless and in tests.
    #[default]
    Immediate,
    /// The engine parks until `finish_presentation` is called.
    Deferred,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub stage: Stage,

    /// Cups on the table when the session starts.
    pub start_cups: u64,

    /// Cups added each time play completes a pass around the table.
    pub add_per_round: u64,

    pub miss_policy: MissPolicy,

    pub presentation: Presentation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stage: Stage::default(),
            start_cups: 1,
            add_per_round: 1,
            miss_policy: MissPolicy::default(),
            presentation: Presentation::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration for a stage with default cup settings.
    #[must_use]
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start_cups(mut self, cups: u64) -> Self {
        self.start_cups = cups;
        self
    }

    #[must_use]
    pub fn with_add_per_round(mut self, cups: u64) -> Self {
        self.add_per_round = cups;
        self
    }

    #[must_use]
    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    /// Park after Joker and loss events until the external clock fires.
    #[must_use]
    pub fn deferred(mut self) -> Self {
        self.presentation = Presentation::Deferred;
        self
    }
}
