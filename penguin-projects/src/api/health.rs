//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Service liveness plus whether the default projects root is reachable
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub projects_root: String,
    pub root_available: bool,
}

/// GET /health
///
/// Always answers `ok`; a missing projects root shows up as
/// `root_available: false` rather than a failed check.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "penguin-projects".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        projects_root: state.projects_root.display().to_string(),
        root_available: state.projects_root.is_dir(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
