//! Teams, players, and the fixture schedule.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::domain::{DomainError, Fixture, FixtureStatus, Player, Team};
use crate::error::{Error, Result};
use crate::store::model::{
    encode_ts, FixtureRow, NewFixtureRow, NewPlayerRow, NewTeamRow, PlayerRow, TeamRow,
};
use crate::store::schema::{fixtures, players, teams};
use crate::store::{get_conn, last_insert_rowid, DbPool};

/// Reference data and the fixture lifecycle up to (but not including)
/// settlement.
pub struct FixtureService {
    pool: DbPool,
}

impl FixtureService {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// # Errors
    /// [`Error::Duplicate`] on a team-name collision.
    pub fn add_team(&self, name: &str) -> Result<Team> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("team name must not be empty".into()));
        }
        let mut conn = get_conn(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let taken: Option<i32> = teams::table
                .filter(teams::name.eq(name))
                .select(teams::id)
                .first(conn)
                .optional()?;
            if taken.is_some() {
                return Err(Error::Duplicate {
                    entity: "team",
                    name: name.to_string(),
                });
            }

            diesel::insert_into(teams::table)
                .values(&NewTeamRow {
                    name: name.to_string(),
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(Team {
                id,
                name: name.to_string(),
            })
        })
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<TeamRow> = teams::table.order(teams::name.asc()).load(&mut conn)?;
        Ok(rows.into_iter().map(Team::from).collect())
    }

    /// # Errors
    /// [`Error::NotFound`] if the team does not exist.
    pub fn add_player(&self, name: &str, team_id: i32) -> Result<Player> {
        let mut conn = get_conn(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let team: Option<i32> = teams::table
                .find(team_id)
                .select(teams::id)
                .first(conn)
                .optional()?;
            if team.is_none() {
                return Err(Error::NotFound {
                    entity: "team",
                    id: team_id.to_string(),
                });
            }

            diesel::insert_into(players::table)
                .values(&NewPlayerRow {
                    name: name.to_string(),
                    team_id,
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(Player {
                id,
                name: name.to_string(),
                team_id,
            })
        })
    }

    /// Players on either side of a fixture; the eligible set for
    /// player-scoped odds.
    pub fn fixture_players(&self, fixture_id: i32) -> Result<Vec<Player>> {
        let mut conn = get_conn(&self.pool)?;
        let fixture = self.fixture_row(&mut conn, fixture_id)?;
        let rows: Vec<PlayerRow> = players::table
            .filter(
                players::team_id
                    .eq(fixture.home_team_id)
                    .or(players::team_id.eq(fixture.away_team_id)),
            )
            .order(players::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    /// Schedule a fixture between two distinct teams.
    ///
    /// # Errors
    /// - [`DomainError::IdenticalTeams`] if both sides are the same team.
    /// - [`Error::NotFound`] if either team does not exist.
    pub fn add_fixture(
        &self,
        home_team_id: i32,
        away_team_id: i32,
        kickoff: DateTime<Utc>,
    ) -> Result<Fixture> {
        if home_team_id == away_team_id {
            return Err(DomainError::IdenticalTeams {
                team_id: home_team_id,
            }
            .into());
        }

        let mut conn = get_conn(&self.pool)?;
        let fixture = conn.immediate_transaction::<_, Error, _>(|conn| {
            for team_id in [home_team_id, away_team_id] {
                let found: Option<i32> = teams::table
                    .find(team_id)
                    .select(teams::id)
                    .first(conn)
                    .optional()?;
                if found.is_none() {
                    return Err(Error::NotFound {
                        entity: "team",
                        id: team_id.to_string(),
                    });
                }
            }

            diesel::insert_into(fixtures::table)
                .values(&NewFixtureRow {
                    home_team_id,
                    away_team_id,
                    kickoff: encode_ts(kickoff),
                    status: FixtureStatus::Upcoming.as_str().to_string(),
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

            Ok(Fixture {
                id,
                home_team_id,
                away_team_id,
                kickoff,
                status: FixtureStatus::Upcoming,
                home_score: None,
                away_score: None,
            })
        })?;

        info!(
            fixture_id = fixture.id,
            home_team_id, away_team_id, "fixture scheduled"
        );
        Ok(fixture)
    }

    pub fn get(&self, fixture_id: i32) -> Result<Fixture> {
        let mut conn = get_conn(&self.pool)?;
        self.fixture_row(&mut conn, fixture_id)?.try_into()
    }

    /// Move an upcoming fixture to live. Transitions are one-directional.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if the fixture is not upcoming.
    pub fn set_live(&self, fixture_id: i32) -> Result<()> {
        let mut conn = get_conn(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let row = fixtures::table
                .find(fixture_id)
                .first::<FixtureRow>(conn)
                .optional()?
                .ok_or(Error::NotFound {
                    entity: "fixture",
                    id: fixture_id.to_string(),
                })?;

            if FixtureStatus::parse(&row.status)? != FixtureStatus::Upcoming {
                return Err(Error::InvalidInput(format!(
                    "fixture {fixture_id} is {}, only upcoming fixtures can go live",
                    row.status
                )));
            }

            diesel::update(fixtures::table.find(fixture_id))
                .set(fixtures::status.eq(FixtureStatus::Live.as_str()))
                .execute(conn)?;
            Ok(())
        })
    }

    /// Upcoming and live fixtures in kickoff order.
    pub fn list_upcoming(&self) -> Result<Vec<Fixture>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<FixtureRow> = fixtures::table
            .filter(
                fixtures::status
                    .eq(FixtureStatus::Upcoming.as_str())
                    .or(fixtures::status.eq(FixtureStatus::Live.as_str())),
            )
            .order(fixtures::kickoff.asc())
            .load(&mut conn)?;
        rows.into_iter().map(Fixture::try_from).collect()
    }

    /// Completed fixtures, most recent kickoff first.
    pub fn history(&self) -> Result<Vec<Fixture>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<FixtureRow> = fixtures::table
            .filter(fixtures::status.eq(FixtureStatus::Completed.as_str()))
            .order(fixtures::kickoff.desc())
            .load(&mut conn)?;
        rows.into_iter().map(Fixture::try_from).collect()
    }

    fn fixture_row(&self, conn: &mut SqliteConnection, fixture_id: i32) -> Result<FixtureRow> {
        fixtures::table
            .find(fixture_id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound {
                entity: "fixture",
                id: fixture_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_pool, run_migrations};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FixtureService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = dir.path().join("fixtures.db");
        let pool = create_pool(url.to_str().unwrap()).expect("pool");
        run_migrations(&pool).expect("migrations");
        (dir, FixtureService::new(pool))
    }

    fn two_teams(service: &FixtureService) -> (Team, Team) {
        (
            service.add_team("Dynamos").unwrap(),
            service.add_team("Lions").unwrap(),
        )
    }

    #[test]
    fn duplicate_team_names_are_rejected() {
        let (_dir, service) = setup();
        service.add_team("Dynamos").unwrap();
        assert!(matches!(
            service.add_team("Dynamos"),
            Err(Error::Duplicate { .. })
        ));
    }

    #[test]
    fn fixture_requires_two_distinct_existing_teams() {
        let (_dir, service) = setup();
        let (home, away) = two_teams(&service);

        assert!(service.add_fixture(home.id, home.id, Utc::now()).is_err());
        assert!(matches!(
            service.add_fixture(home.id, 999, Utc::now()),
            Err(Error::NotFound { .. })
        ));
        let fixture = service.add_fixture(home.id, away.id, Utc::now()).unwrap();
        assert_eq!(fixture.status, FixtureStatus::Upcoming);
        assert_eq!(fixture.final_score(), None);
    }

    #[test]
    fn player_must_join_an_existing_team() {
        let (_dir, service) = setup();
        let (home, _) = two_teams(&service);
        assert!(service.add_player("Ana", home.id).is_ok());
        assert!(matches!(
            service.add_player("Ghost", 42),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn fixture_players_spans_both_sides_only() {
        let (_dir, service) = setup();
        let (home, away) = two_teams(&service);
        let other = service.add_team("Hawks").unwrap();

        service.add_player("Ana", home.id).unwrap();
        service.add_player("Bruno", away.id).unwrap();
        service.add_player("Carla", other.id).unwrap();

        let fixture = service.add_fixture(home.id, away.id, Utc::now()).unwrap();
        let eligible = service.fixture_players(fixture.id).unwrap();
        let names: Vec<&str> = eligible.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[test]
    fn set_live_is_one_directional() {
        let (_dir, service) = setup();
        let (home, away) = two_teams(&service);
        let fixture = service.add_fixture(home.id, away.id, Utc::now()).unwrap();

        service.set_live(fixture.id).unwrap();
        assert_eq!(
            service.get(fixture.id).unwrap().status,
            FixtureStatus::Live
        );
        // already live: a second transition is refused
        assert!(service.set_live(fixture.id).is_err());
    }

    #[test]
    fn upcoming_list_includes_live_fixtures() {
        let (_dir, service) = setup();
        let (home, away) = two_teams(&service);
        let first = service.add_fixture(home.id, away.id, Utc::now()).unwrap();
        service.add_fixture(away.id, home.id, Utc::now()).unwrap();
        service.set_live(first.id).unwrap();

        assert_eq!(service.list_upcoming().unwrap().len(), 2);
        assert!(service.history().unwrap().is_empty());
    }
}
