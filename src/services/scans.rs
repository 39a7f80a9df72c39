//! Scan storage: append and list rows of the `scans` table.
//!
//! DESIGN
//! ======
//! Rows are append-only. The receive timestamp is stamped here rather than
//! trusted from the station, so every stored row carries collector time.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use time::macros::format_description;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("workbook encode failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("timestamp format failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// A scan as accepted by `POST /scan`, before it is stamped and stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewScan {
    pub pallet: String,
    pub order_no: String,
    pub phase: String,
    pub part: String,
    #[serde(default = "default_qty")]
    pub qty: i64,
}

fn default_qty() -> i64 {
    1
}

/// Row of the `scans` table. Column order matches the export header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StoredScan {
    pub id: i64,
    pub pallet: Option<String>,
    pub order_no: Option<String>,
    pub phase: Option<String>,
    pub part: Option<String>,
    pub qty: Option<i64>,
    pub timestamp: Option<String>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Insert one scan stamped with the current UTC time. Returns the new row id.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted or the insert fails.
pub async fn record_scan(pool: &SqlitePool, scan: &NewScan) -> Result<i64, StoreError> {
    let timestamp = format_timestamp(OffsetDateTime::now_utc())?;
    record_scan_at(pool, scan, &timestamp).await
}

pub(crate) async fn record_scan_at(pool: &SqlitePool, scan: &NewScan, timestamp: &str) -> Result<i64, StoreError> {
    let result = sqlx::query(
        "INSERT INTO scans (pallet, order_no, phase, part, qty, timestamp) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&scan.pallet)
    .bind(&scan.order_no)
    .bind(&scan.phase)
    .bind(&scan.part)
    .bind(scan.qty)
    .bind(timestamp)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List every stored scan in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_scans(pool: &SqlitePool) -> Result<Vec<StoredScan>, StoreError> {
    let rows = sqlx::query_as::<_, StoredScan>(
        "SELECT id, pallet, order_no, phase, part, qty, timestamp FROM scans ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SS.ffffff` with no offset suffix.
///
/// # Errors
///
/// Returns an error if the instant cannot be rendered.
pub(crate) fn format_timestamp(at: OffsetDateTime) -> Result<String, StoreError> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]");
    Ok(at.format(&format)?)
}

#[cfg(test)]
#[path = "scans_test.rs"]
mod tests;
