//! The settlement engine: irreversible resolution of pending wagers.
//!
//! Two independent entry points share one discipline:
//!
//! - [`SettlementEngine::settle_fixture`] resolves every pending
//!   odds-instance wager on a fixture against its final score.
//! - [`SettlementEngine::settle_custom_bet`] resolves the wagers on one
//!   custom bet against an admin-declared boolean result.
//!
//! Each entry point runs as a single immediate transaction with a terminal
//! status guard, so re-settlement is rejected instead of double-paying and
//! a crash mid-loop rolls back to the fully-unsettled state.

pub mod predicate;

pub use predicate::{Predicate, PredicateRegistry};

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{CustomBetResult, CustomBetStatus, FixtureOutcome, FixtureStatus, WagerStatus};
use crate::error::{Error, Result};
use crate::store::model::{parse_price, CustomBetRow, FixtureRow, WagerRow};
use crate::store::schema::{custom_bets, fixtures, odds_instances, odds_templates, users, wagers};
use crate::store::{get_conn, DbPool};

/// What one settlement call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementSummary {
    /// Wagers moved out of pending.
    pub wagers_settled: usize,
    /// How many of those won.
    pub wagers_won: usize,
    /// Total points credited to winners.
    pub points_paid: i64,
}

/// A wager's computed fate, collected before any row is touched.
struct Resolution {
    wager_id: i32,
    username: String,
    /// `Some(payout)` for winners, `None` for losers.
    payout: Option<i64>,
}

/// Resolves pending wagers against final outcomes and credits winners.
pub struct SettlementEngine {
    pool: DbPool,
    predicates: PredicateRegistry,
}

impl SettlementEngine {
    /// Engine with the standard bet-type predicates.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self::with_registry(pool, PredicateRegistry::standard())
    }

    /// Engine with a caller-supplied predicate registry.
    #[must_use]
    pub fn with_registry(pool: DbPool, predicates: PredicateRegistry) -> Self {
        Self { pool, predicates }
    }

    /// The predicate registry this engine dispatches on.
    #[must_use]
    pub fn predicates(&self) -> &PredicateRegistry {
        &self.predicates
    }

    /// Settle a fixture with its final score.
    ///
    /// Marks the fixture completed, evaluates every pending odds-instance
    /// wager through the predicate registry, credits winners with
    /// `floor(stake * price)` and flips each wager to won or lost. Wagers
    /// on custom bets are untouched; they settle through
    /// [`Self::settle_custom_bet`].
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the fixture does not exist.
    /// - [`Error::AlreadySettled`] if the fixture is already completed.
    /// - [`Error::Domain`] for negative scores.
    pub fn settle_fixture(
        &self,
        fixture_id: i32,
        home_score: i32,
        away_score: i32,
    ) -> Result<SettlementSummary> {
        let outcome = FixtureOutcome::from_scores(home_score, away_score)?;

        let mut conn = get_conn(&self.pool)?;
        let summary = conn.immediate_transaction::<_, Error, _>(|conn| {
            let fixture: FixtureRow = fixtures::table
                .find(fixture_id)
                .first(conn)
                .optional()?
                .ok_or(Error::NotFound {
                    entity: "fixture",
                    id: fixture_id.to_string(),
                })?;

            if FixtureStatus::parse(&fixture.status)? == FixtureStatus::Completed {
                return Err(Error::AlreadySettled {
                    entity: "fixture",
                    id: fixture_id,
                });
            }

            diesel::update(fixtures::table.find(fixture_id))
                .set((
                    fixtures::status.eq(FixtureStatus::Completed.as_str()),
                    fixtures::home_score.eq(Some(home_score)),
                    fixtures::away_score.eq(Some(away_score)),
                ))
                .execute(conn)?;

            let pending: Vec<WagerRow> = wagers::table
                .filter(wagers::fixture_id.eq(fixture_id))
                .filter(wagers::status.eq(WagerStatus::Pending.as_str()))
                .filter(wagers::odds_instance_id.is_not_null())
                .load(conn)?;

            let bet_types = self.bet_types_for(conn, &pending)?;

            let mut resolutions = Vec::with_capacity(pending.len());
            for wager in &pending {
                let won = wager
                    .odds_instance_id
                    .and_then(|instance_id| bet_types.get(&instance_id))
                    .is_some_and(|bet_type| self.predicates.wins(bet_type, &outcome));

                let payout = if won {
                    Some(payout_for(wager.stake, parse_price(&wager.price)?)?)
                } else {
                    None
                };
                debug!(
                    wager_id = wager.id,
                    username = %wager.username,
                    won,
                    "wager resolved"
                );
                resolutions.push(Resolution {
                    wager_id: wager.id,
                    username: wager.username.clone(),
                    payout,
                });
            }

            let summary = apply_resolutions(conn, &resolutions)?;
            info!(
                fixture_id,
                home_score,
                away_score,
                settled = summary.wagers_settled,
                won = summary.wagers_won,
                paid = summary.points_paid,
                "fixture settled"
            );
            Ok(summary)
        })?;

        Ok(summary)
    }

    /// Settle one custom bet with its admin-declared result.
    ///
    /// A `yes` result pays every pending wager on the bet at its stored
    /// price; a `no` result marks them all lost. Independent of the
    /// fixture score and of [`Self::settle_fixture`].
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the custom bet does not exist.
    /// - [`Error::AlreadySettled`] if it was settled before.
    pub fn settle_custom_bet(
        &self,
        custom_bet_id: i32,
        result: CustomBetResult,
    ) -> Result<SettlementSummary> {
        let mut conn = get_conn(&self.pool)?;
        let summary = conn.immediate_transaction::<_, Error, _>(|conn| {
            let bet: CustomBetRow = custom_bets::table
                .find(custom_bet_id)
                .first(conn)
                .optional()?
                .ok_or(Error::NotFound {
                    entity: "custom bet",
                    id: custom_bet_id.to_string(),
                })?;

            if CustomBetStatus::parse(&bet.status)? == CustomBetStatus::Completed {
                return Err(Error::AlreadySettled {
                    entity: "custom bet",
                    id: custom_bet_id,
                });
            }

            diesel::update(custom_bets::table.find(custom_bet_id))
                .set((
                    custom_bets::status.eq(CustomBetStatus::Completed.as_str()),
                    custom_bets::result.eq(Some(result.as_str())),
                ))
                .execute(conn)?;

            let pending: Vec<WagerRow> = wagers::table
                .filter(wagers::custom_bet_id.eq(custom_bet_id))
                .filter(wagers::status.eq(WagerStatus::Pending.as_str()))
                .load(conn)?;

            let mut resolutions = Vec::with_capacity(pending.len());
            for wager in &pending {
                let payout = if result == CustomBetResult::Yes {
                    Some(payout_for(wager.stake, parse_price(&wager.price)?)?)
                } else {
                    None
                };
                resolutions.push(Resolution {
                    wager_id: wager.id,
                    username: wager.username.clone(),
                    payout,
                });
            }

            let summary = apply_resolutions(conn, &resolutions)?;
            info!(
                custom_bet_id,
                result = result.as_str(),
                settled = summary.wagers_settled,
                paid = summary.points_paid,
                "custom bet settled"
            );
            Ok(summary)
        })?;

        Ok(summary)
    }

    /// Map each referenced odds instance to its template's bet-type key.
    fn bet_types_for(
        &self,
        conn: &mut SqliteConnection,
        pending: &[WagerRow],
    ) -> Result<HashMap<i32, String>> {
        let instance_ids: Vec<i32> = pending.iter().filter_map(|w| w.odds_instance_id).collect();
        if instance_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let instances: Vec<(i32, i32)> = odds_instances::table
            .filter(odds_instances::id.eq_any(&instance_ids))
            .select((odds_instances::id, odds_instances::template_id))
            .load(conn)?;

        let template_ids: Vec<i32> = instances.iter().map(|(_, tid)| *tid).collect();
        let templates: Vec<(i32, String)> = odds_templates::table
            .filter(odds_templates::id.eq_any(&template_ids))
            .select((odds_templates::id, odds_templates::bet_type))
            .load(conn)?;
        let by_template: HashMap<i32, String> = templates.into_iter().collect();

        Ok(instances
            .into_iter()
            .filter_map(|(iid, tid)| by_template.get(&tid).map(|bt| (iid, bt.clone())))
            .collect())
    }
}

/// Winner payout: `floor(stake * price)` in whole points.
fn payout_for(stake: i64, price: Decimal) -> Result<i64> {
    (Decimal::from(stake) * price)
        .floor()
        .to_i64()
        .ok_or_else(|| Error::Parse(format!("payout overflow for stake {stake} at {price}")))
}

/// Apply collected resolutions: credit winners, flip statuses.
fn apply_resolutions(conn: &mut SqliteConnection, resolutions: &[Resolution]) -> Result<SettlementSummary> {
    let mut summary = SettlementSummary {
        wagers_settled: resolutions.len(),
        wagers_won: 0,
        points_paid: 0,
    };

    for resolution in resolutions {
        let status = match resolution.payout {
            Some(payout) => {
                diesel::update(users::table.find(&resolution.username))
                    .set(users::points.eq(users::points + payout))
                    .execute(conn)?;
                summary.wagers_won += 1;
                summary.points_paid += payout;
                WagerStatus::Won
            }
            None => WagerStatus::Lost,
        };
        diesel::update(wagers::table.find(resolution.wager_id))
            .set(wagers::status.eq(status.as_str()))
            .execute(conn)?;
    }

    Ok(summary)
}
