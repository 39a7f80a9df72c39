//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! The collector creates the shared SQLx pool at startup and applies the
//! embedded migrations before accepting scan submissions.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Initialize the `SQLite` connection pool and run migrations. The database
/// file and its parent directory are created when missing.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the directory cannot be created,
/// or the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Apply the embedded migrations to an existing pool.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("src/db/migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Create a migrated in-memory pool. A single connection that never
    /// expires keeps the in-memory database alive for the pool's lifetime.
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should open");
        migrate(&pool).await.expect("migrations should apply");
        pool
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
