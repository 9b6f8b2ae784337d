//! Ad-hoc custom bets and the user proposal workflow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle of a custom bet.
///
/// A custom bet is bettable from the moment it exists (whether created
/// directly by an admin or spawned from an approved proposal) and becomes
/// terminal when an admin declares its boolean result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomBetStatus {
    Open,
    Completed,
}

impl CustomBetStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            other => Err(Error::Parse(format!("unknown custom bet status '{other}'"))),
        }
    }
}

/// Admin-declared result of a custom bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomBetResult {
    Yes,
    No,
}

impl CustomBetResult {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(Error::Parse(format!("unknown custom bet result '{other}'"))),
        }
    }
}

/// A free-form, non-templated wager option tied to one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBet {
    pub id: i32,
    pub fixture_id: i32,
    pub description: String,
    pub price: Decimal,
    pub player_id: Option<i32>,
    pub status: CustomBetStatus,
    /// Set exactly once, when the bet is settled.
    pub result: Option<CustomBetResult>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Disposition of a proposal. Terminal either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::Parse(format!("unknown proposal status '{other}'"))),
        }
    }
}

/// A user-submitted candidate custom bet awaiting admin disposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: i32,
    pub username: String,
    pub fixture_id: i32,
    pub description: String,
    pub proposed_price: Decimal,
    pub status: ProposalStatus,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// What an admin decides about a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Spawn exactly one custom bet, optionally overriding the price.
    Approve,
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_roundtrip_through_strings() {
        for status in [
            ProposalStatus::Pending,
            ProposalStatus::Approved,
            ProposalStatus::Rejected,
        ] {
            assert_eq!(ProposalStatus::parse(status.as_str()).unwrap(), status);
        }
        for status in [CustomBetStatus::Open, CustomBetStatus::Completed] {
            assert_eq!(CustomBetStatus::parse(status.as_str()).unwrap(), status);
        }
        for result in [CustomBetResult::Yes, CustomBetResult::No] {
            assert_eq!(CustomBetResult::parse(result.as_str()).unwrap(), result);
        }
    }

    #[test]
    fn garbage_strings_fail_to_parse() {
        assert!(ProposalStatus::parse("maybe").is_err());
        assert!(CustomBetResult::parse("").is_err());
    }
}
