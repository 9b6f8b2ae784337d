//! Wagers: a user's stake against a priced target.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle of a wager.
///
/// A wager stays `Pending` until its target is settled, then transitions
/// exactly once to `Won` or `Lost`. Never reversed, never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerStatus {
    Pending,
    Won,
    Lost,
}

impl WagerStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            other => Err(Error::Parse(format!("unknown wager status '{other}'"))),
        }
    }
}

/// Exactly one settlement target per wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WagerTarget {
    /// A catalog-derived odds instance, settled from the final score.
    Odds(i32),
    /// A custom bet, settled from an admin-declared boolean result.
    Custom(i32),
}

/// A stake placed by a user against one target.
///
/// `price` is resolved at placement time and never looked up again: later
/// odds edits must not change what an existing wager pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    pub id: i32,
    pub username: String,
    pub fixture_id: i32,
    pub stake: i64,
    pub price: Decimal,
    pub odds_instance_id: Option<i32>,
    pub custom_bet_id: Option<i32>,
    pub status: WagerStatus,
    pub placed_at: DateTime<Utc>,
}

impl Wager {
    /// The target this wager settles against.
    pub fn target(&self) -> Result<WagerTarget, Error> {
        match (self.odds_instance_id, self.custom_bet_id) {
            (Some(id), None) => Ok(WagerTarget::Odds(id)),
            (None, Some(id)) => Ok(WagerTarget::Custom(id)),
            _ => Err(crate::domain::error::DomainError::AmbiguousTarget.into()),
        }
    }

    /// Derived convenience figure: what this wager would pay if won.
    ///
    /// Settlement recomputes the payout from `stake` and `price`; this is
    /// display data, never authoritative.
    #[must_use]
    pub fn potential_winnings(&self) -> Decimal {
        (Decimal::from(self.stake) * self.price).floor()
    }
}
