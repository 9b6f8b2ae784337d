//! Canonical outcome facts derived from a final score.
//!
//! Settlement derives these once per fixture and evaluates every predicate
//! against the same facts, so no predicate ever re-reads the store.

use crate::domain::error::DomainError;

/// Who won the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Home,
    Away,
    Draw,
}

/// Outcome facts for a completed fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureOutcome {
    pub winner: Winner,
    pub home_score: i32,
    pub away_score: i32,
    pub total_goals: i32,
    pub both_scored: bool,
}

impl FixtureOutcome {
    /// Derive outcome facts from a final score.
    ///
    /// # Errors
    /// Returns [`DomainError::NegativeScore`] if either score is negative.
    pub fn from_scores(home: i32, away: i32) -> Result<Self, DomainError> {
        if home < 0 || away < 0 {
            return Err(DomainError::NegativeScore { home, away });
        }
        let winner = match home.cmp(&away) {
            std::cmp::Ordering::Greater => Winner::Home,
            std::cmp::Ordering::Less => Winner::Away,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        Ok(Self {
            winner,
            home_score: home,
            away_score: away,
            total_goals: home + away,
            both_scored: home > 0 && away > 0,
        })
    }
}
