//! Player identification and the fixed seating order.
//!
//! ## PlayerId
//!
//! Type-safe seat index. The first player to guess is `PlayerId(0)`.
//!
//! ## Roster
//!
//! The ordered list of player names for one session. The roster is fixed
//! once play begins; rotation wraps from the last seat back to the first.

use serde::{Deserialize, Serialize};

/// Seat index into a `Roster`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Ordered player names for a session.
///
/// Built from an already validated handoff, so names are assumed unique and
/// non-blank. An empty roster is representable: it is what a malformed
/// handoff degrades to, and it simply has no current player.
///
/// Serializes as a plain list of names. Deserializing goes through
/// `Roster::new`, so the seat cap holds for saved rosters too.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Create a roster from names in seating order.
    ///
    /// Seats beyond 255 are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().take(u8::MAX as usize).map(Into::into).collect(),
        }
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at a seat, if seated.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player.index()).map(String::as_str)
    }

    /// Seat following `player`, wrapping to the first seat.
    #[must_use]
    pub fn next(&self, player: PlayerId) -> PlayerId {
        if self.names.is_empty() {
            return PlayerId::default();
        }
        PlayerId(((player.index() + 1) % self.names.len()) as u8)
    }

    /// True when `player` closes a pass around the table.
    #[must_use]
    pub fn is_last(&self, player: PlayerId) -> bool {
        !self.names.is_empty() && player.index() == self.names.len() - 1
    }

    /// Names in seating order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl From<Vec<String>> for Roster {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_roster_rotation_wraps() {
        let roster = Roster::new(["A", "B", "C"]);

        assert_eq!(roster.next(PlayerId::new(0)), PlayerId::new(1));
        assert_eq!(roster.next(PlayerId::new(1)), PlayerId::new(2));
        assert_eq!(roster.next(PlayerId::new(2)), PlayerId::new(0));
    }

    #[test]
    fn test_roster_is_last() {
        let roster = Roster::new(["A", "B"]);

        assert!(!roster.is_last(PlayerId::new(0)));
        assert!(roster.is_last(PlayerId::new(1)));
        assert!(!Roster::default().is_last(PlayerId::new(0)));
    }

    #[test]
    fn test_roster_names() {
        let roster = Roster::new(vec!["Aki".to_string(), "Ben".to_string()]);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.name(PlayerId::new(1)), Some("Ben"));
        assert_eq!(roster.name(PlayerId::new(2)), None);
        assert_eq!(roster.names(), &["Aki".to_string(), "Ben".to_string()]);
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::default();
        assert!(roster.is_empty());
        assert_eq!(roster.next(PlayerId::new(0)), PlayerId::new(0));
        assert_eq!(roster.name(PlayerId::new(0)), None);
    }

    #[test]
    fn test_roster_serialization() {
        let roster = Roster::new(["A", "B"]);
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"["A","B"]"#);
        let deserialized: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(roster, deserialized);
    }

    #[test]
    fn test_deserialize_caps_seats() {
        let names: Vec<String> = (0..300).map(|i| format!("P{i}")).collect();
        let json = serde_json::to_string(&names).unwrap();
        let roster: Roster = serde_json::from_str(&json).unwrap();

        assert_eq!(roster.len(), 255);
        let last = PlayerId::new(254);
        assert!(roster.is_last(last));
        assert_eq!(roster.next(last), PlayerId::new(0));
        assert_eq!(roster.name(last), Some("P254"));
    }
}
