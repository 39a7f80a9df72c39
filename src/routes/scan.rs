//! `POST /scan` — accept one part scan from a station.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use tracing::{error, info};

use crate::services::scans::{self, NewScan, StoreError};
use crate::state::AppState;

/// `POST /scan` — store a scan record and acknowledge it.
///
/// Bodies missing a required field are rejected by the `Json` extractor
/// before this handler runs.
pub async fn submit_scan(
    State(state): State<AppState>,
    Json(body): Json<NewScan>,
) -> Result<Json<Value>, StatusCode> {
    let id = scans::record_scan(&state.pool, &body)
        .await
        .map_err(store_error_to_status)?;

    info!(id, pallet = %body.pallet, order_no = %body.order_no, part = %body.part, qty = body.qty, "scan recorded");
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    error!(error = %err, "scan store failed");
    match err {
        StoreError::Database(_) | StoreError::Xlsx(_) | StoreError::Timestamp(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
