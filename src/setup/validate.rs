//! Checks a session must pass before play starts.

use std::collections::HashSet;

use crate::core::error::{Result, SetupError};

/// Fewest players a session accepts.
pub const MIN_PLAYERS: usize = 2;

/// Trim names and check the roster: at least two players, no blank names,
/// no exact duplicates.
pub fn validate_players(players: &[String]) -> Result<Vec<String>> {
    let trimmed: Vec<String> = players.iter().map(|p| p.trim().to_string()).collect();

    if trimmed.len() < MIN_PLAYERS {
        return Err(SetupError::InvalidPlayerCount(trimmed.len()));
    }

    if let Some(index) = trimmed.iter().position(String::is_empty) {
        return Err(SetupError::EmptyPlayerName(index));
    }

    let mut seen = HashSet::with_capacity(trimmed.len());
    for name in &trimmed {
        if !seen.insert(name.as_str()) {
            return Err(SetupError::DuplicatePlayerName(name.clone()));
        }
    }

    Ok(trimmed)
}

/// Parse a cup count typed into the setup form.
///
/// Blank input counts as zero. Returns the parsed value without checking
/// its sign; see `require_positive`.
pub fn parse_cups(field: &'static str, input: &str) -> Result<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    input.parse::<i64>().map_err(|_| SetupError::NonNumericConfig {
        field,
        value: input.to_string(),
    })
}

pub fn require_positive(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or(SetupError::NonPositiveConfig { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_roster_is_trimmed() {
        let roster = validate_players(&names(&[" Aki ", "Ben"])).unwrap();
        assert_eq!(roster, names(&["Aki", "Ben"]));
    }

    #[test]
    fn test_too_few_players() {
        assert_eq!(validate_players(&names(&["Solo"])), Err(SetupError::InvalidPlayerCount(1)));
        assert_eq!(validate_players(&[]), Err(SetupError::InvalidPlayerCount(0)));
    }

    #[test]
    fn test_blank_names() {
        assert_eq!(
            validate_players(&names(&["A", "   ", "C"])),
            Err(SetupError::EmptyPlayerName(1))
        );
    }

    #[test]
    fn test_duplicates_after_trim() {
        assert_eq!(
            validate_players(&names(&["A", "B", " A"])),
            Err(SetupError::DuplicatePlayerName("A".into()))
        );
    }

    #[test]
    fn test_duplicates_are_case_sensitive() {
        assert!(validate_players(&names(&["amy", "Amy"])).is_ok());
    }

    #[test]
    fn test_parse_cups() {
        assert_eq!(parse_cups("start", "12"), Ok(12));
        assert_eq!(parse_cups("start", ""), Ok(0));
        assert_eq!(parse_cups("start", "-3"), Ok(-3));
        assert!(matches!(
            parse_cups("start", "two"),
            Err(SetupError::NonNumericConfig { field: "start", .. })
        ));
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("add", 4), Ok(4));
        let err = Err(SetupError::NonPositiveConfig { field: "add" });
        assert_eq!(require_positive("add", 0), err);
        assert_eq!(require_positive("add", -1), err);
    }
}
