//! The wager ledger: stake intake with atomic balance debits.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    CustomBetStatus, DomainError, FixtureStatus, Wager, WagerStatus, WagerTarget,
};
use crate::error::{Error, Result};
use crate::store::model::{encode_price, encode_ts, parse_price, NewWagerRow, WagerRow};
use crate::store::schema::{custom_bets, fixtures, odds_instances, users, wagers};
use crate::store::{get_conn, last_insert_rowid, DbPool};

/// Accepts stakes and records them against priced targets.
pub struct WagerLedger {
    pool: DbPool,
}

impl WagerLedger {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Place a stake against one target.
    ///
    /// The target's current price is copied onto the wager at this moment;
    /// later price edits never touch it. The balance debit and the wager
    /// insert commit together or not at all.
    ///
    /// # Errors
    /// - [`DomainError::NonPositiveStake`] for a zero or negative stake.
    /// - [`Error::NotFound`] if the fixture, user, or target is missing or
    ///   no longer bettable.
    /// - [`Error::BettingClosed`] if the fixture is completed.
    /// - [`Error::InsufficientFunds`] if the stake exceeds the balance.
    pub fn place(
        &self,
        username: &str,
        fixture_id: i32,
        stake: i64,
        target: WagerTarget,
    ) -> Result<Wager> {
        if stake <= 0 {
            return Err(DomainError::NonPositiveStake { stake }.into());
        }

        let mut conn = get_conn(&self.pool)?;
        let wager = conn.immediate_transaction::<_, Error, _>(|conn| {
            let fixture_status: Option<String> = fixtures::table
                .find(fixture_id)
                .select(fixtures::status)
                .first(conn)
                .optional()?;
            let fixture_status = fixture_status.ok_or(Error::NotFound {
                entity: "fixture",
                id: fixture_id.to_string(),
            })?;
            if !FixtureStatus::parse(&fixture_status)?.accepts_wagers() {
                return Err(Error::BettingClosed { fixture_id });
            }

            let balance: Option<i64> = users::table
                .find(username)
                .select(users::points)
                .first(conn)
                .optional()?;
            let balance = balance.ok_or(Error::NotFound {
                entity: "user",
                id: username.to_string(),
            })?;
            if balance < stake {
                return Err(Error::InsufficientFunds { balance, stake });
            }

            let price = resolve_price(conn, fixture_id, target)?;
            let (odds_instance_id, custom_bet_id) = match target {
                WagerTarget::Odds(id) => (Some(id), None),
                WagerTarget::Custom(id) => (None, Some(id)),
            };

            diesel::update(users::table.find(username))
                .set(users::points.eq(users::points - stake))
                .execute(conn)?;

            let now = Utc::now();
            diesel::insert_into(wagers::table)
                .values(&NewWagerRow {
                    username: username.to_string(),
                    fixture_id,
                    stake,
                    price: encode_price(price),
                    odds_instance_id,
                    custom_bet_id,
                    status: WagerStatus::Pending.as_str().to_string(),
                    placed_at: encode_ts(now),
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

            Ok(Wager {
                id,
                username: username.to_string(),
                fixture_id,
                stake,
                price,
                odds_instance_id,
                custom_bet_id,
                status: WagerStatus::Pending,
                placed_at: now,
            })
        })?;

        info!(
            wager_id = wager.id,
            username,
            fixture_id,
            stake,
            price = %wager.price,
            "wager placed"
        );
        Ok(wager)
    }

    /// A user's wagers, most recent first.
    pub fn user_wagers(&self, username: &str) -> Result<Vec<Wager>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<WagerRow> = wagers::table
            .filter(wagers::username.eq(username))
            .order(wagers::id.desc())
            .load(&mut conn)?;
        rows.into_iter().map(Wager::try_from).collect()
    }

    /// Pending wagers on a fixture, for exposure reporting.
    pub fn fixture_pending(&self, fixture_id: i32) -> Result<Vec<Wager>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<WagerRow> = wagers::table
            .filter(wagers::fixture_id.eq(fixture_id))
            .filter(wagers::status.eq(WagerStatus::Pending.as_str()))
            .order(wagers::id.asc())
            .load(&mut conn)?;
        rows.into_iter().map(Wager::try_from).collect()
    }
}

/// Look up the target's current price, checking it is live and belongs to
/// the fixture the wager names.
fn resolve_price(
    conn: &mut SqliteConnection,
    fixture_id: i32,
    target: WagerTarget,
) -> Result<Decimal> {
    match target {
        WagerTarget::Odds(instance_id) => {
            let row: Option<(i32, String, bool)> = odds_instances::table
                .find(instance_id)
                .select((
                    odds_instances::fixture_id,
                    odds_instances::price,
                    odds_instances::is_active,
                ))
                .first(conn)
                .optional()?;
            match row {
                Some((fid, price, true)) if fid == fixture_id => parse_price(&price),
                _ => Err(Error::NotFound {
                    entity: "odds instance",
                    id: instance_id.to_string(),
                }),
            }
        }
        WagerTarget::Custom(custom_bet_id) => {
            let row: Option<(i32, String, String)> = custom_bets::table
                .find(custom_bet_id)
                .select((
                    custom_bets::fixture_id,
                    custom_bets::price,
                    custom_bets::status,
                ))
                .first(conn)
                .optional()?;
            if let Some((fid, price, status)) = row {
                if fid == fixture_id && CustomBetStatus::parse(&status)? == CustomBetStatus::Open {
                    return parse_price(&price);
                }
            }
            Err(Error::NotFound {
                entity: "custom bet",
                id: custom_bet_id.to_string(),
            })
        }
    }
}
