//! penguin-projects library - project folder tracker service
//!
//! Scans a projects root for folders named `YYYY-MMDD company location`,
//! reconciles them with the `.inside.yaml` side-car store and serves the
//! result over HTTP.

use axum::Router;
use std::path::PathBuf;

pub mod api;
pub mod config;
pub mod error;
pub mod services;

use services::ProjectService;

/// Application state shared across HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Root scanned when a request does not name one
    pub projects_root: PathBuf,
    pub service: ProjectService,
}

impl AppState {
    /// Create new application state
    pub fn new(projects_root: PathBuf) -> Self {
        Self {
            projects_root,
            service: ProjectService::new(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/api/folders", get(api::list_folders))
        .route("/api/projects", get(api::list_projects))
        .route("/api/projects/save", post(api::save_projects))
        .route("/api/projects/cleanup", post(api::cleanup_projects))
        .route("/api/projects/:id/dates", put(api::update_project_dates))
        .route("/api/time/parse", post(api::parse_time))
        .route("/api/time/formats", get(api::list_time_formats))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
