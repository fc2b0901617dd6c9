//! Directory listing endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use penguin_common::FileEntry;
use serde::Serialize;

use super::projects::RootQuery;
use crate::error::ApiResult;
use crate::AppState;

/// Entries of a single directory
#[derive(Debug, Serialize)]
pub struct FolderListResponse {
    pub folders: Vec<FileEntry>,
    pub count: usize,
    pub path: String,
}

/// GET /api/folders?path=...
///
/// Lists every direct child of `path` (the projects root by default),
/// whether or not its name follows the project folder convention.
pub async fn list_folders(
    State(state): State<AppState>,
    Query(query): Query<RootQuery>,
) -> ApiResult<Json<FolderListResponse>> {
    let root = query.root(&state);
    let service = state.service.clone();
    let scan_root = root.clone();

    let folders = tokio::task::spawn_blocking(move || service.folders(&scan_root)).await??;

    Ok(Json(FolderListResponse {
        count: folders.len(),
        folders,
        path: root.display().to_string(),
    }))
}
