//! Database layer for persistence using Diesel ORM.
//!
//! Prices are stored as decimal strings and timestamps as RFC 3339 text;
//! all conversion happens at the row boundary in [`model`].

pub mod model;
pub mod schema;

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Database connection pool type alias.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// One checked-out connection.
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Embedded schema migrations, applied by [`run_migrations`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

diesel::define_sql_function! {
    /// SQLite rowid of the last successful INSERT on this connection.
    fn last_insert_rowid() -> Integer;
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Check a connection out of the pool.
pub fn get_conn(pool: &DbPool) -> Result<DbConn> {
    pool.get().map_err(|e| Error::Connection(e.to_string()))
}

/// Apply any pending embedded migrations.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = get_conn(pool)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Storage(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_pool_with_memory_db() {
        let pool = create_pool(":memory:");
        assert!(pool.is_ok());
    }

    #[test]
    fn migrations_apply_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("migrate.db");
        let pool = create_pool(url.to_str().unwrap()).unwrap();
        assert!(run_migrations(&pool).is_ok());
        // re-running is a no-op
        assert!(run_migrations(&pool).is_ok());
    }
}
