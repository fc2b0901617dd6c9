//! Project record types
//!
//! One canonical [`ProjectRecord`] serves the HTTP responses and the YAML
//! side-car store. Field aliases accept the key spellings written by older
//! side-car files (`companyname`, `startdate`, `folder`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::instant::{serde_text, Instant};
use crate::status::{resolve_status, ProjectStatus};

/// Filesystem snapshot backing a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub path: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,

    #[serde(default, alias = "isdirectory")]
    pub is_directory: bool,

    #[serde(with = "serde_text", default, alias = "modifiedtime")]
    pub modified_time: Option<Instant>,
}

/// Canonical project entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// 5-character stable id (see [`crate::id::derive_id`])
    #[serde(default, alias = "projectid")]
    pub id: String,

    #[serde(default, alias = "companyname")]
    pub company_name: String,

    #[serde(default, alias = "locationname")]
    pub location_name: String,

    /// Display only; recomputed by [`ProjectRecord::refresh_status`]
    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(with = "serde_text", default, alias = "startdate")]
    pub start_date: Option<Instant>,

    #[serde(with = "serde_text", default, alias = "enddate")]
    pub end_date: Option<Instant>,

    /// Free text, only ever set through the side-car store
    #[serde(default)]
    pub description: String,

    /// Insertion-ordered, duplicates allowed
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, alias = "filecount")]
    pub file_count: u64,

    #[serde(default, alias = "subdircount")]
    pub subdir_count: u64,

    #[serde(default, alias = "folder")]
    pub source_entry: FileEntry,
}

impl ProjectRecord {
    /// Re-derive `status` from `start_date` as seen at `now`
    pub fn refresh_status(&mut self, now: DateTime<Utc>) {
        self.status = resolve_status(self.start_date.as_ref(), now);
    }

    /// Modification time of the backing folder
    pub fn modified_time(&self) -> Option<&Instant> {
        self.source_entry.modified_time.as_ref()
    }
}
