//! Project discovery from folder names
//!
//! A project folder is named `<YYYY>-<MMDD> <company> <location>`, for
//! example `2025-0618 豊田築炉 名和工場`. Exactly two whitespace-separated
//! tokens must follow the date block; anything else is not a project folder.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use penguin_common::{
    derive_id, parse_timestamp, project_key, resolve_status, FileEntry, ProjectRecord,
};
use regex::Regex;
use std::path::Path;

use super::folder_scanner::FolderScanner;

static FOLDER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{4})\s+(\S+)\s+(\S+)$")
        .expect("folder name pattern is a valid regex")
});

/// Parts of a project folder name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName<'a> {
    /// `YYYY-MMDD`
    pub date_block: &'a str,
    pub company: &'a str,
    pub location: &'a str,
}

/// Split a folder name into date block, company and location
pub fn parse_folder_name(name: &str) -> Option<FolderName<'_>> {
    let caps = FOLDER_NAME.captures(name)?;
    Some(FolderName {
        date_block: caps.get(1)?.as_str(),
        company: caps.get(2)?.as_str(),
        location: caps.get(3)?.as_str(),
    })
}

/// Build a discovered record from one scanned entry.
///
/// Returns `None` for files, for names outside the folder grammar, and for
/// date blocks that are not calendar dates (`2025-1399`). Description and
/// end date stay empty: only the side-car store carries them.
pub fn record_from_entry(entry: &FileEntry, now: DateTime<Utc>) -> Option<ProjectRecord> {
    if !entry.is_directory {
        return None;
    }

    let folder = parse_folder_name(&entry.name)?;
    let start = match parse_timestamp(folder.date_block) {
        Ok(start) => start,
        Err(e) => {
            tracing::debug!(name = %entry.name, error = %e, "Skipping folder with invalid date");
            return None;
        }
    };

    Some(ProjectRecord {
        id: derive_id(&project_key(&start, folder.company, folder.location)),
        company_name: folder.company.to_string(),
        location_name: folder.location.to_string(),
        status: resolve_status(Some(&start), now),
        start_date: Some(start),
        end_date: None,
        description: String::new(),
        tags: vec![
            folder.company.to_string(),
            folder.location.to_string(),
            start.year().to_string(),
        ],
        file_count: 0,
        subdir_count: 0,
        source_entry: entry.clone(),
    })
}

/// Build discovered records for every project folder among `entries`,
/// filling the informational file and subdirectory counts.
pub fn discover_projects(
    scanner: &FolderScanner,
    entries: &[FileEntry],
    now: DateTime<Utc>,
) -> Vec<ProjectRecord> {
    entries
        .iter()
        .filter_map(|entry| record_from_entry(entry, now))
        .map(|mut record| {
            let (files, subdirs) = scanner.count_children(Path::new(&record.source_entry.path));
            record.file_count = files;
            record.subdir_count = subdirs;
            record
        })
        .collect()
}
