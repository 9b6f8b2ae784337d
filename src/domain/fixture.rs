//! Fixtures: scheduled matches between two teams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle of a fixture.
///
/// Transitions are monotonic and admin-driven:
/// `Upcoming -> Live -> Completed`. Settlement is what moves a fixture to
/// `Completed`, and a completed fixture never leaves that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    Upcoming,
    Live,
    Completed,
}

impl FixtureStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "live" => Ok(Self::Live),
            "completed" => Ok(Self::Completed),
            other => Err(Error::Parse(format!("unknown fixture status '{other}'"))),
        }
    }

    /// Whether wagers may still be placed.
    #[must_use]
    pub const fn accepts_wagers(&self) -> bool {
        matches!(self, Self::Upcoming | Self::Live)
    }
}

/// A scheduled match between two distinct teams.
///
/// Final scores are present iff the fixture is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub kickoff: DateTime<Utc>,
    pub status: FixtureStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl Fixture {
    /// Final score, available once the fixture is completed.
    #[must_use]
    pub fn final_score(&self) -> Option<(i32, i32)> {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            FixtureStatus::Upcoming,
            FixtureStatus::Live,
            FixtureStatus::Completed,
        ] {
            assert_eq!(FixtureStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        assert!(FixtureStatus::parse("postponed").is_err());
    }

    #[test]
    fn only_open_fixtures_accept_wagers() {
        assert!(FixtureStatus::Upcoming.accepts_wagers());
        assert!(FixtureStatus::Live.accepts_wagers());
        assert!(!FixtureStatus::Completed.accepts_wagers());
    }
}
