//! Project list orchestration
//!
//! Ties the folder scan, discovery, side-car store and reconciliation
//! together. All methods do blocking filesystem I/O; HTTP handlers call them
//! through `tokio::task::spawn_blocking`.

use penguin_common::{is_invalid_record_at, merge_at, time, FileEntry, Instant, ProjectRecord};
use std::path::Path;
use thiserror::Error;

use super::folder_scanner::{FolderScanner, ScanError};
use super::project_discovery::discover_projects;
use super::project_store::{ProjectStore, StoreError};

/// Project service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No record with the requested id
    #[error("Project not found: {0}")]
    NotFound(String),
}

/// Outcome of a store cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub before: usize,
    pub after: usize,
    pub removed: usize,
}

/// Project list service
#[derive(Debug, Clone, Default)]
pub struct ProjectService {
    scanner: FolderScanner,
}

impl ProjectService {
    pub fn new() -> Self {
        Self {
            scanner: FolderScanner::new(),
        }
    }

    /// Raw first-level entries of `root`, projects or not
    pub fn folders(&self, root: &Path) -> Result<Vec<FileEntry>, ServiceError> {
        Ok(self.scanner.scan(root)?)
    }

    /// Scan `root` and build discovered records
    pub fn discover(&self, root: &Path) -> Result<Vec<ProjectRecord>, ServiceError> {
        let entries = self.scanner.scan(root)?;
        Ok(discover_projects(&self.scanner, &entries, time::now()))
    }

    /// Reconciled project list for `root`.
    ///
    /// **Algorithm:**
    /// 1. Scan and discover project folders
    /// 2. Load `<root>/.inside.yaml` (missing file = empty)
    /// 3. Merge, then re-derive every status
    pub fn list(&self, root: &Path) -> Result<Vec<ProjectRecord>, ServiceError> {
        let now = time::now();
        let discovered = self.discover(root)?;
        let persisted = ProjectStore::for_root(root).load()?;

        let mut merged = merge_at(&discovered, &persisted, now);
        for record in &mut merged {
            record.refresh_status(now);
        }

        tracing::debug!(
            root = %root.display(),
            discovered = discovered.len(),
            persisted = persisted.len(),
            merged = merged.len(),
            "Reconciled project list"
        );
        Ok(merged)
    }

    /// Write the reconciled list back to the side-car store; returns the record count
    pub fn save(&self, root: &Path) -> Result<usize, ServiceError> {
        let projects = self.list(root)?;
        ProjectStore::for_root(root).save(&projects)?;
        Ok(projects.len())
    }

    /// Set both dates of one project and persist the reconciled list.
    ///
    /// The record is looked up in the reconciled list, so a project that was
    /// only discovered so far can be dated too.
    pub fn update_dates(
        &self,
        root: &Path,
        id: &str,
        start_date: Option<Instant>,
        end_date: Option<Instant>,
    ) -> Result<ProjectRecord, ServiceError> {
        let mut projects = self.list(root)?;
        let record = projects
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        record.start_date = start_date;
        record.end_date = end_date;
        record.refresh_status(time::now());
        let updated = record.clone();

        ProjectStore::for_root(root).save(&projects)?;
        tracing::info!(id, root = %root.display(), "Updated project dates");
        Ok(updated)
    }

    /// Drop side-car records that fail the data-quality filter.
    ///
    /// The store is rewritten only when something was removed.
    pub fn cleanup(&self, root: &Path) -> Result<CleanupReport, ServiceError> {
        let store = ProjectStore::for_root(root);
        let records = store.load()?;
        let before = records.len();

        let now = time::now();
        let valid: Vec<ProjectRecord> = records
            .into_iter()
            .filter(|record| !is_invalid_record_at(record, now))
            .collect();
        let after = valid.len();

        if after < before {
            store.save(&valid)?;
            tracing::info!(path = %store.path().display(), removed = before - after, "Removed invalid records");
        }

        Ok(CleanupReport {
            before,
            after,
            removed: before - after,
        })
    }
}
