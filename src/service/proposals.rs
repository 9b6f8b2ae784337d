//! Custom bets and the user proposal workflow.
//!
//! Admins can create custom bets directly; users route through proposals,
//! which an admin approves (spawning exactly one custom bet) or rejects.
//! Both dispositions are terminal: a second review of the same proposal
//! is an error, never a second custom bet.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    CustomBet, CustomBetStatus, Proposal, ProposalStatus, ReviewAction,
};
use crate::error::{Error, Result};
use crate::store::model::{
    encode_price, encode_ts, parse_price, CustomBetRow, NewCustomBetRow, NewProposalRow,
    ProposalRow,
};
use crate::store::schema::{custom_bets, fixtures, proposals, users};
use crate::store::{get_conn, last_insert_rowid, DbPool};

/// Custom bets and their proposal pipeline.
pub struct ProposalService {
    pool: DbPool,
}

impl ProposalService {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Admin path: create a custom bet directly, bypassing review.
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] for a non-positive price or empty
    ///   description.
    /// - [`Error::NotFound`] if the fixture does not exist.
    pub fn add_custom_bet(
        &self,
        fixture_id: i32,
        description: &str,
        price: Decimal,
        player_id: Option<i32>,
        created_by: &str,
    ) -> Result<CustomBet> {
        if description.trim().is_empty() {
            return Err(Error::InvalidInput("description must not be empty".into()));
        }
        if price <= Decimal::ZERO {
            return Err(Error::InvalidInput(format!(
                "custom bet price must be positive, got {price}"
            )));
        }

        let mut conn = get_conn(&self.pool)?;
        let bet = conn.immediate_transaction::<_, Error, _>(|conn| {
            require_fixture(conn, fixture_id)?;
            insert_custom_bet(conn, fixture_id, description, price, player_id, created_by)
        })?;

        info!(custom_bet_id = bet.id, fixture_id, "custom bet created");
        Ok(bet)
    }

    /// Open (still bettable) custom bets on a fixture.
    pub fn open_custom_bets(&self, fixture_id: i32) -> Result<Vec<CustomBet>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<CustomBetRow> = custom_bets::table
            .filter(custom_bets::fixture_id.eq(fixture_id))
            .filter(custom_bets::status.eq(CustomBetStatus::Open.as_str()))
            .order(custom_bets::id.asc())
            .load(&mut conn)?;
        rows.into_iter().map(CustomBet::try_from).collect()
    }

    pub fn get_custom_bet(&self, custom_bet_id: i32) -> Result<CustomBet> {
        let mut conn = get_conn(&self.pool)?;
        let row: Option<CustomBetRow> = custom_bets::table
            .find(custom_bet_id)
            .first(&mut conn)
            .optional()?;
        row.ok_or(Error::NotFound {
            entity: "custom bet",
            id: custom_bet_id.to_string(),
        })?
        .try_into()
    }

    /// User path: submit a candidate custom bet for review.
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] for a non-positive price or empty
    ///   description.
    /// - [`Error::NotFound`] if the fixture or the user does not exist.
    pub fn propose(
        &self,
        username: &str,
        fixture_id: i32,
        description: &str,
        proposed_price: Decimal,
    ) -> Result<Proposal> {
        if description.trim().is_empty() {
            return Err(Error::InvalidInput("description must not be empty".into()));
        }
        if proposed_price <= Decimal::ZERO {
            return Err(Error::InvalidInput(format!(
                "proposed price must be positive, got {proposed_price}"
            )));
        }

        let mut conn = get_conn(&self.pool)?;
        let proposal = conn.immediate_transaction::<_, Error, _>(|conn| {
            require_fixture(conn, fixture_id)?;

            let user: Option<String> = users::table
                .find(username)
                .select(users::username)
                .first(conn)
                .optional()?;
            if user.is_none() {
                return Err(Error::NotFound {
                    entity: "user",
                    id: username.to_string(),
                });
            }

            let now = Utc::now();
            diesel::insert_into(proposals::table)
                .values(&NewProposalRow {
                    username: username.to_string(),
                    fixture_id,
                    description: description.to_string(),
                    proposed_price: encode_price(proposed_price),
                    status: ProposalStatus::Pending.as_str().to_string(),
                    created_at: encode_ts(now),
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

            Ok(Proposal {
                id,
                username: username.to_string(),
                fixture_id,
                description: description.to_string(),
                proposed_price,
                status: ProposalStatus::Pending,
                admin_response: None,
                created_at: now,
                reviewed_at: None,
            })
        })?;

        info!(proposal_id = proposal.id, username, "proposal submitted");
        Ok(proposal)
    }

    /// Proposals, optionally narrowed to one status, oldest first.
    pub fn list_proposals(&self, status: Option<ProposalStatus>) -> Result<Vec<Proposal>> {
        let mut conn = get_conn(&self.pool)?;
        let mut query = proposals::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(proposals::status.eq(status.as_str()));
        }
        let rows: Vec<ProposalRow> = query.order(proposals::id.asc()).load(&mut conn)?;
        rows.into_iter().map(Proposal::try_from).collect()
    }

    /// Dispose of a pending proposal.
    ///
    /// Approval spawns exactly one open custom bet, priced at `final_price`
    /// when given and at the proposed price otherwise. Rejection spawns
    /// nothing. Either way the proposal is terminal afterwards.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the proposal does not exist.
    /// - [`Error::AlreadySettled`] if it was already reviewed.
    pub fn review(
        &self,
        proposal_id: i32,
        admin: &str,
        action: ReviewAction,
        response: &str,
        final_price: Option<Decimal>,
    ) -> Result<(Proposal, Option<CustomBet>)> {
        let mut conn = get_conn(&self.pool)?;
        let reviewed = conn.immediate_transaction::<_, Error, _>(|conn| {
            let row: Option<ProposalRow> =
                proposals::table.find(proposal_id).first(conn).optional()?;
            let row = row.ok_or(Error::NotFound {
                entity: "proposal",
                id: proposal_id.to_string(),
            })?;

            if ProposalStatus::parse(&row.status)? != ProposalStatus::Pending {
                return Err(Error::AlreadySettled {
                    entity: "proposal",
                    id: proposal_id,
                });
            }

            let now = Utc::now();
            let status = match action {
                ReviewAction::Approve => ProposalStatus::Approved,
                ReviewAction::Reject => ProposalStatus::Rejected,
            };
            diesel::update(proposals::table.find(proposal_id))
                .set((
                    proposals::status.eq(status.as_str()),
                    proposals::admin_response.eq(Some(response)),
                    proposals::reviewed_at.eq(Some(encode_ts(now))),
                ))
                .execute(conn)?;

            let spawned = match action {
                ReviewAction::Approve => {
                    let price = match final_price {
                        Some(price) => price,
                        None => parse_price(&row.proposed_price)?,
                    };
                    if price <= Decimal::ZERO {
                        return Err(Error::InvalidInput(format!(
                            "custom bet price must be positive, got {price}"
                        )));
                    }
                    Some(insert_custom_bet(
                        conn,
                        row.fixture_id,
                        &row.description,
                        price,
                        None,
                        admin,
                    )?)
                }
                ReviewAction::Reject => None,
            };

            let proposal = Proposal {
                id: row.id,
                username: row.username,
                fixture_id: row.fixture_id,
                description: row.description,
                proposed_price: parse_price(&row.proposed_price)?,
                status,
                admin_response: Some(response.to_string()),
                created_at: crate::store::model::parse_ts(&row.created_at)?,
                reviewed_at: Some(now),
            };
            Ok((proposal, spawned))
        })?;

        info!(
            proposal_id,
            admin,
            approved = reviewed.1.is_some(),
            "proposal reviewed"
        );
        Ok(reviewed)
    }
}

fn require_fixture(conn: &mut SqliteConnection, fixture_id: i32) -> Result<()> {
    let found: Option<i32> = fixtures::table
        .find(fixture_id)
        .select(fixtures::id)
        .first(conn)
        .optional()?;
    if found.is_none() {
        return Err(Error::NotFound {
            entity: "fixture",
            id: fixture_id.to_string(),
        });
    }
    Ok(())
}

fn insert_custom_bet(
    conn: &mut SqliteConnection,
    fixture_id: i32,
    description: &str,
    price: Decimal,
    player_id: Option<i32>,
    created_by: &str,
) -> Result<CustomBet> {
    let now = Utc::now();
    diesel::insert_into(custom_bets::table)
        .values(&NewCustomBetRow {
            fixture_id,
            description: description.to_string(),
            price: encode_price(price),
            player_id,
            status: CustomBetStatus::Open.as_str().to_string(),
            created_by: created_by.to_string(),
            created_at: encode_ts(now),
        })
        .execute(conn)?;
    let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

    Ok(CustomBet {
        id,
        fixture_id,
        description: description.to_string(),
        price,
        player_id,
        status: CustomBetStatus::Open,
        result: None,
        created_by: created_by.to_string(),
        created_at: now,
    })
}
