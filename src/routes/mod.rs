//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the collector endpoints under a single Axum router. Any GET that
//! does not match an API route falls through to the static directory, where
//! a deployment ships its scanner page.

pub mod export;
pub mod scan;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes without the static fallback.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/scan", post(scan::submit_scan))
        .route("/export", get(export::export_scans))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full collector router: API routes, static fallback, compression and
/// request tracing.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let static_service = ServeDir::new(static_dir).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(static_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
