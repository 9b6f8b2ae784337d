//! The odds catalog: categories and reusable bet-type templates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A grouping of templates, e.g. "Match result" or "Goals".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsCategory {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

/// A reusable bet-type definition with a default price.
///
/// Templates are static reference data: the catalog of all bet shapes the
/// book offers. The `bet_type` key is what the settlement predicate
/// registry dispatches on, so it must be unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsTemplate {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub bet_type: String,
    pub default_price: Decimal,
    /// When set, instantiation produces one priced instance per player
    /// eligible for the fixture instead of a single instance.
    pub requires_player: bool,
    pub is_active: bool,
}
