//! Materialized odds instances and their revision trail.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Minimum payout multiplier for any priced instance.
///
/// Enforced at instantiation (after drift) and at every manual edit.
pub const MIN_PRICE: Decimal = dec!(1.1);

/// Validate a price against the book-wide floor.
///
/// # Errors
/// Returns [`DomainError::PriceBelowMinimum`] for prices under [`MIN_PRICE`].
pub fn validate_price(price: Decimal) -> Result<(), DomainError> {
    if price < MIN_PRICE {
        return Err(DomainError::PriceBelowMinimum {
            price,
            min: MIN_PRICE,
        });
    }
    Ok(())
}

/// A template materialized for one fixture (and optionally one player).
///
/// The price is concrete and may drift from the template default; it only
/// changes through [`crate::service::OddsService::update_price`], which
/// appends a revision in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsInstance {
    pub id: i32,
    pub fixture_id: i32,
    pub template_id: i32,
    /// Present iff the template requires a player.
    pub player_id: Option<i32>,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One immutable entry in the price audit trail.
///
/// Revisions are append-only: nothing in the crate mutates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsRevision {
    pub id: i32,
    pub odds_instance_id: i32,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_at_or_above_floor_pass() {
        assert!(validate_price(dec!(1.1)).is_ok());
        assert!(validate_price(dec!(2.75)).is_ok());
    }

    #[test]
    fn prices_below_floor_fail() {
        assert!(matches!(
            validate_price(dec!(1.09)),
            Err(DomainError::PriceBelowMinimum { .. })
        ));
        assert!(validate_price(dec!(0)).is_err());
    }
}
