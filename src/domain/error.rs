//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors and mutators that enforce
//! domain invariants, before anything reaches the store.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// A fixture must pit two different teams against each other.
    #[error("fixture teams must differ, got team {team_id} twice")]
    IdenticalTeams {
        /// The team that appeared on both sides.
        team_id: i32,
    },

    /// Every odds price must stay at or above the minimum payout multiplier.
    #[error("price {price} below minimum {min}")]
    PriceBelowMinimum { price: Decimal, min: Decimal },

    /// Stakes must be strictly positive.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake { stake: i64 },

    /// Final scores cannot be negative.
    #[error("scores must be non-negative, got {home}-{away}")]
    NegativeScore { home: i32, away: i32 },

    /// A wager must reference exactly one settlement target.
    #[error("wager must reference exactly one of odds instance or custom bet")]
    AmbiguousTarget,
}
