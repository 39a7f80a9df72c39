//! Shared collector state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! holds the database pool.

use sqlx::SqlitePool;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the pool is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
