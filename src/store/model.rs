//! Database model types for Diesel ORM, plus row <-> domain conversions.
//!
//! Queryable row structs mirror the table column order exactly. Autoincrement
//! tables get a separate `New*Row` insert struct without the id.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{
    custom_bets, fixtures, odds_categories, odds_instances, odds_revisions, odds_templates,
    players, proposals, teams, users, wagers,
};
use crate::domain::{
    CustomBet, CustomBetResult, CustomBetStatus, Fixture, FixtureStatus, OddsCategory,
    OddsInstance, OddsRevision, OddsTemplate, Player, Proposal, ProposalStatus, Team, User, Wager,
    WagerStatus,
};
use crate::error::{Error, Result};

pub(crate) fn encode_price(price: Decimal) -> String {
    price.to_string()
}

pub(crate) fn parse_price(s: &str) -> Result<Decimal> {
    Decimal::from_str(s).map_err(|e| Error::Parse(format!("bad price '{s}': {e}")))
}

pub(crate) fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("bad timestamp '{s}': {e}")))
}

/// Database row for a user account.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub points: i64,
    pub is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            username: row.username,
            points: row.points,
            is_admin: row.is_admin,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TeamRow {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    pub name: String,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayerRow {
    pub id: i32,
    pub name: String,
    pub team_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = players)]
pub struct NewPlayerRow {
    pub name: String,
    pub team_id: i32,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player {
            id: row.id,
            name: row.name,
            team_id: row.team_id,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = fixtures)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FixtureRow {
    pub id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub kickoff: String,
    pub status: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = fixtures)]
pub struct NewFixtureRow {
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub kickoff: String,
    pub status: String,
}

impl TryFrom<FixtureRow> for Fixture {
    type Error = Error;

    fn try_from(row: FixtureRow) -> Result<Self> {
        Ok(Fixture {
            id: row.id,
            home_team_id: row.home_team_id,
            away_team_id: row.away_team_id,
            kickoff: parse_ts(&row.kickoff)?,
            status: FixtureStatus::parse(&row.status)?,
            home_score: row.home_score,
            away_score: row.away_score,
        })
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = odds_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OddsCategoryRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = odds_categories)]
pub struct NewOddsCategoryRow {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<OddsCategoryRow> for OddsCategory {
    fn from(row: OddsCategoryRow) -> Self {
        OddsCategory {
            id: row.id,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = odds_templates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OddsTemplateRow {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub bet_type: String,
    pub default_price: String,
    pub requires_player: bool,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = odds_templates)]
pub struct NewOddsTemplateRow {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub bet_type: String,
    pub default_price: String,
    pub requires_player: bool,
    pub is_active: bool,
}

impl TryFrom<OddsTemplateRow> for OddsTemplate {
    type Error = Error;

    fn try_from(row: OddsTemplateRow) -> Result<Self> {
        Ok(OddsTemplate {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            bet_type: row.bet_type,
            default_price: parse_price(&row.default_price)?,
            requires_player: row.requires_player,
            is_active: row.is_active,
        })
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = odds_instances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OddsInstanceRow {
    pub id: i32,
    pub fixture_id: i32,
    pub template_id: i32,
    pub player_id: Option<i32>,
    pub price: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = odds_instances)]
pub struct NewOddsInstanceRow {
    pub fixture_id: i32,
    pub template_id: i32,
    pub player_id: Option<i32>,
    pub price: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<OddsInstanceRow> for OddsInstance {
    type Error = Error;

    fn try_from(row: OddsInstanceRow) -> Result<Self> {
        Ok(OddsInstance {
            id: row.id,
            fixture_id: row.fixture_id,
            template_id: row.template_id,
            player_id: row.player_id,
            price: parse_price(&row.price)?,
            is_active: row.is_active,
            created_at: parse_ts(&row.created_at)?,
            updated_at: parse_ts(&row.updated_at)?,
        })
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = odds_revisions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OddsRevisionRow {
    pub id: i32,
    pub odds_instance_id: i32,
    pub old_price: String,
    pub new_price: String,
    pub changed_by: String,
    pub changed_at: String,
    pub reason: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = odds_revisions)]
pub struct NewOddsRevisionRow {
    pub odds_instance_id: i32,
    pub old_price: String,
    pub new_price: String,
    pub changed_by: String,
    pub changed_at: String,
    pub reason: String,
}

impl TryFrom<OddsRevisionRow> for OddsRevision {
    type Error = Error;

    fn try_from(row: OddsRevisionRow) -> Result<Self> {
        Ok(OddsRevision {
            id: row.id,
            odds_instance_id: row.odds_instance_id,
            old_price: parse_price(&row.old_price)?,
            new_price: parse_price(&row.new_price)?,
            changed_by: row.changed_by,
            changed_at: parse_ts(&row.changed_at)?,
            reason: row.reason,
        })
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = custom_bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomBetRow {
    pub id: i32,
    pub fixture_id: i32,
    pub description: String,
    pub price: String,
    pub player_id: Option<i32>,
    pub status: String,
    pub result: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = custom_bets)]
pub struct NewCustomBetRow {
    pub fixture_id: i32,
    pub description: String,
    pub price: String,
    pub player_id: Option<i32>,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
}

impl TryFrom<CustomBetRow> for CustomBet {
    type Error = Error;

    fn try_from(row: CustomBetRow) -> Result<Self> {
        Ok(CustomBet {
            id: row.id,
            fixture_id: row.fixture_id,
            description: row.description,
            price: parse_price(&row.price)?,
            player_id: row.player_id,
            status: CustomBetStatus::parse(&row.status)?,
            result: row
                .result
                .as_deref()
                .map(CustomBetResult::parse)
                .transpose()?,
            created_by: row.created_by,
            created_at: parse_ts(&row.created_at)?,
        })
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = proposals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProposalRow {
    pub id: i32,
    pub username: String,
    pub fixture_id: i32,
    pub description: String,
    pub proposed_price: String,
    pub status: String,
    pub admin_response: Option<String>,
    pub created_at: String,
    pub reviewed_at: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = proposals)]
pub struct NewProposalRow {
    pub username: String,
    pub fixture_id: i32,
    pub description: String,
    pub proposed_price: String,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<ProposalRow> for Proposal {
    type Error = Error;

    fn try_from(row: ProposalRow) -> Result<Self> {
        Ok(Proposal {
            id: row.id,
            username: row.username,
            fixture_id: row.fixture_id,
            description: row.description,
            proposed_price: parse_price(&row.proposed_price)?,
            status: ProposalStatus::parse(&row.status)?,
            admin_response: row.admin_response,
            created_at: parse_ts(&row.created_at)?,
            reviewed_at: row.reviewed_at.as_deref().map(parse_ts).transpose()?,
        })
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = wagers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WagerRow {
    pub id: i32,
    pub username: String,
    pub fixture_id: i32,
    pub stake: i64,
    pub price: String,
    pub odds_instance_id: Option<i32>,
    pub custom_bet_id: Option<i32>,
    pub status: String,
    pub placed_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = wagers)]
pub struct NewWagerRow {
    pub username: String,
    pub fixture_id: i32,
    pub stake: i64,
    pub price: String,
    pub odds_instance_id: Option<i32>,
    pub custom_bet_id: Option<i32>,
    pub status: String,
    pub placed_at: String,
}

impl TryFrom<WagerRow> for Wager {
    type Error = Error;

    fn try_from(row: WagerRow) -> Result<Self> {
        Ok(Wager {
            id: row.id,
            username: row.username,
            fixture_id: row.fixture_id,
            stake: row.stake,
            price: parse_price(&row.price)?,
            odds_instance_id: row.odds_instance_id,
            custom_bet_id: row.custom_bet_id,
            status: WagerStatus::parse(&row.status)?,
            placed_at: parse_ts(&row.placed_at)?,
        })
    }
}
