//! Project list endpoints
//!
//! Every endpoint takes an optional `path` query parameter naming the
//! projects root; the configured root is used when it is absent or empty.
//! Filesystem work runs on the blocking thread pool.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use penguin_common::config::expand_home;
use penguin_common::{parse_timestamp, Instant, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ApiResult;
use crate::services::store_path_for;
use crate::AppState;

/// Query parameters shared by the project endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RootQuery {
    /// Projects root (`~/` is expanded)
    #[serde(default)]
    pub path: Option<String>,
}

impl RootQuery {
    pub(crate) fn root(&self, state: &AppState) -> PathBuf {
        match self.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => expand_home(path),
            _ => state.projects_root.clone(),
        }
    }
}

/// Reconciled project list
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectRecord>,
    pub count: usize,
    /// Sum of the backing entries' sizes in bytes
    pub total_size: u64,
    pub path: String,
}

/// Result of writing the side-car store
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: String,
    pub output_path: String,
    pub count: usize,
}

/// Request body for PUT /api/projects/:id/dates
///
/// Dates accept any format the timestamp parser understands; an empty
/// string clears the date.
#[derive(Debug, Deserialize)]
pub struct UpdateDatesRequest {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Result of a store cleanup
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: String,
    pub yaml_path: String,
    pub projects_before: usize,
    pub projects_after: usize,
    pub removed_count: usize,
}

fn optional_instant(text: &str) -> ApiResult<Option<Instant>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_timestamp(text)?))
}

/// GET /api/projects?path=...
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<RootQuery>,
) -> ApiResult<Json<ProjectListResponse>> {
    let root = query.root(&state);
    let service = state.service.clone();
    let scan_root = root.clone();

    let projects = tokio::task::spawn_blocking(move || service.list(&scan_root)).await??;
    let total_size = projects.iter().map(|p| p.source_entry.size).sum();

    Ok(Json(ProjectListResponse {
        count: projects.len(),
        projects,
        total_size,
        path: root.display().to_string(),
    }))
}

/// POST /api/projects/save?path=...
pub async fn save_projects(
    State(state): State<AppState>,
    Query(query): Query<RootQuery>,
) -> ApiResult<Json<SaveResponse>> {
    let root = query.root(&state);
    let service = state.service.clone();
    let scan_root = root.clone();

    let count = tokio::task::spawn_blocking(move || service.save(&scan_root)).await??;

    Ok(Json(SaveResponse {
        message: format!("Saved {} projects", count),
        output_path: store_path_for(&root).display().to_string(),
        count,
    }))
}

/// PUT /api/projects/:id/dates?path=...
pub async fn update_project_dates(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RootQuery>,
    Json(request): Json<UpdateDatesRequest>,
) -> ApiResult<Json<ProjectRecord>> {
    let start_date = optional_instant(&request.start_date)?;
    let end_date = optional_instant(&request.end_date)?;

    let root = query.root(&state);
    let service = state.service.clone();

    let updated = tokio::task::spawn_blocking(move || {
        service.update_dates(&root, &id, start_date, end_date)
    })
    .await??;

    Ok(Json(updated))
}

/// POST /api/projects/cleanup?path=...
pub async fn cleanup_projects(
    State(state): State<AppState>,
    Query(query): Query<RootQuery>,
) -> ApiResult<Json<CleanupResponse>> {
    let root = query.root(&state);
    let service = state.service.clone();
    let scan_root = root.clone();

    let report = tokio::task::spawn_blocking(move || service.cleanup(&scan_root)).await??;

    Ok(Json(CleanupResponse {
        message: format!("Removed {} invalid records", report.removed),
        yaml_path: store_path_for(&root).display().to_string(),
        projects_before: report.before,
        projects_after: report.after,
        removed_count: report.removed,
    }))
}
