//! `GET /export` — download every stored scan as a spreadsheet file.

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use super::scan::store_error_to_status;
use crate::services::export::{self, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};
use crate::state::AppState;

pub async fn export_scans(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let bytes = export::export_scans(&state.pool)
        .await
        .map_err(store_error_to_status)?;

    tracing::info!(bytes = bytes.len(), "scan export rendered");

    let body = axum::body::Body::from(bytes);

    Ok((
        [
            (CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{EXPORT_FILENAME}\"")),
        ],
        body,
    )
        .into_response())
}
