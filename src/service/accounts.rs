//! Account registration, authentication, and balance maintenance.

use diesel::prelude::*;
use tracing::info;

use crate::domain::User;
use crate::error::{Error, Result};
use crate::store::model::UserRow;
use crate::store::schema::users;
use crate::store::{get_conn, DbPool};

/// User accounts and point balances.
pub struct AccountService {
    pool: DbPool,
    starting_points: i64,
}

impl AccountService {
    #[must_use]
    pub fn new(pool: DbPool, starting_points: i64) -> Self {
        Self {
            pool,
            starting_points,
        }
    }

    /// Register a new account with the configured starting balance.
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] for an empty username or password.
    /// - [`Error::Duplicate`] if the username is taken.
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() {
            return Err(Error::InvalidInput("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(Error::InvalidInput("password must not be empty".into()));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| Error::Credentials(e.to_string()))?;

        let mut conn = get_conn(&self.pool)?;
        let row = conn.immediate_transaction::<_, Error, _>(|conn| {
            let taken: Option<String> = users::table
                .find(username)
                .select(users::username)
                .first(conn)
                .optional()?;
            if taken.is_some() {
                return Err(Error::Duplicate {
                    entity: "user",
                    name: username.to_string(),
                });
            }

            let row = UserRow {
                username: username.to_string(),
                password_hash,
                points: self.starting_points,
                is_admin: false,
            };
            diesel::insert_into(users::table).values(&row).execute(conn)?;
            Ok(row)
        })?;

        info!(username, points = row.points, "user registered");
        Ok(row.into())
    }

    /// Verify credentials. Returns `None` for a bad password or an unknown
    /// user, so callers cannot distinguish the two.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let mut conn = get_conn(&self.pool)?;
        let row: Option<UserRow> = users::table.find(username).first(&mut conn).optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let verified = bcrypt::verify(password, &row.password_hash)
            .map_err(|e| Error::Credentials(e.to_string()))?;
        Ok(verified.then(|| row.into()))
    }

    pub fn get(&self, username: &str) -> Result<User> {
        let mut conn = get_conn(&self.pool)?;
        let row: Option<UserRow> = users::table.find(username).first(&mut conn).optional()?;
        row.map(User::from).ok_or(Error::NotFound {
            entity: "user",
            id: username.to_string(),
        })
    }

    /// All accounts, highest balance first. The leaderboard query.
    pub fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<UserRow> = users::table
            .order(users::points.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Admin maintenance: apply a signed delta to a balance.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if the result would be negative.
    pub fn adjust_points(&self, username: &str, delta: i64) -> Result<User> {
        let mut conn = get_conn(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let row: Option<UserRow> = users::table.find(username).first(conn).optional()?;
            let row = row.ok_or(Error::NotFound {
                entity: "user",
                id: username.to_string(),
            })?;

            let updated = row.points + delta;
            if updated < 0 {
                return Err(Error::InvalidInput(format!(
                    "adjustment would leave {username} at {updated} points"
                )));
            }

            diesel::update(users::table.find(username))
                .set(users::points.eq(updated))
                .execute(conn)?;
            Ok(User {
                username: row.username,
                points: updated,
                is_admin: row.is_admin,
            })
        })
    }

    /// Admin maintenance: grant or revoke the admin flag.
    pub fn set_admin(&self, username: &str, is_admin: bool) -> Result<()> {
        let mut conn = get_conn(&self.pool)?;
        let changed = diesel::update(users::table.find(username))
            .set(users::is_admin.eq(is_admin))
            .execute(&mut conn)?;
        if changed == 0 {
            return Err(Error::NotFound {
                entity: "user",
                id: username.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_pool, run_migrations};
    use tempfile::TempDir;

    fn setup() -> (TempDir, AccountService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = dir.path().join("accounts.db");
        let pool = create_pool(url.to_str().unwrap()).expect("pool");
        run_migrations(&pool).expect("migrations");
        (dir, AccountService::new(pool, 100))
    }

    #[test]
    fn register_seeds_starting_balance() {
        let (_dir, accounts) = setup();
        let user = accounts.register("alice", "hunter2").unwrap();
        assert_eq!(user.points, 100);
        assert!(!user.is_admin);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let (_dir, accounts) = setup();
        accounts.register("alice", "hunter2").unwrap();
        assert!(matches!(
            accounts.register("alice", "other"),
            Err(Error::Duplicate { .. })
        ));
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let (_dir, accounts) = setup();
        assert!(matches!(
            accounts.register("  ", "pw"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            accounts.register("bob", ""),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn authenticate_accepts_the_right_password_only() {
        let (_dir, accounts) = setup();
        accounts.register("alice", "hunter2").unwrap();

        let user = accounts.authenticate("alice", "hunter2").unwrap();
        assert_eq!(user.unwrap().username, "alice");

        assert!(accounts.authenticate("alice", "wrong").unwrap().is_none());
        assert!(accounts.authenticate("nobody", "hunter2").unwrap().is_none());
    }

    #[test]
    fn adjust_points_enforces_non_negative_balance() {
        let (_dir, accounts) = setup();
        accounts.register("alice", "pw").unwrap();

        let user = accounts.adjust_points("alice", 50).unwrap();
        assert_eq!(user.points, 150);

        assert!(matches!(
            accounts.adjust_points("alice", -200),
            Err(Error::InvalidInput(_))
        ));
        // failed adjustment leaves the balance untouched
        assert_eq!(accounts.get("alice").unwrap().points, 150);
    }

    #[test]
    fn list_orders_by_points_descending() {
        let (_dir, accounts) = setup();
        accounts.register("alice", "pw").unwrap();
        accounts.register("bob", "pw").unwrap();
        accounts.adjust_points("bob", 500).unwrap();

        let users = accounts.list().unwrap();
        assert_eq!(users[0].username, "bob");
        assert_eq!(users[1].username, "alice");
    }

    #[test]
    fn set_admin_flags_an_existing_user() {
        let (_dir, accounts) = setup();
        accounts.register("alice", "pw").unwrap();
        accounts.set_admin("alice", true).unwrap();
        assert!(accounts.get("alice").unwrap().is_admin);

        assert!(matches!(
            accounts.set_admin("ghost", true),
            Err(Error::NotFound { .. })
        ));
    }
}
