//! Project folder scanner
//!
//! Lists the direct children of a projects root. Nothing below the first
//! level is visited except by [`FolderScanner::count_children`], which
//! reports how many files and subdirectories a single project folder holds.

use penguin_common::time::system_time_to_instant;
use penguin_common::FileEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Folder scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Root directory cannot be read
    #[error("File access error {0}: {1}")]
    FileAccessError(PathBuf, String),
}

/// Scanner over the first level of a projects root
#[derive(Debug, Clone)]
pub struct FolderScanner {
    follow_links: bool,
}

impl Default for FolderScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderScanner {
    /// Create a scanner that follows symlinked project folders
    pub fn new() -> Self {
        Self { follow_links: true }
    }

    /// List the direct children of `root`, sorted by name.
    ///
    /// Entries whose metadata cannot be read are logged and skipped.
    pub fn scan(&self, root: &Path) -> Result<Vec<FileEntry>, ScanError> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }

        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        std::fs::read_dir(root)
            .map_err(|e| ScanError::FileAccessError(root.to_path_buf(), e.to_string()))?;

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            match entry.and_then(|e| to_file_entry(&e)) {
                Ok(file_entry) => entries.push(file_entry),
                Err(e) => {
                    tracing::warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                }
            }
        }

        tracing::debug!(root = %root.display(), count = entries.len(), "Scanned projects root");
        Ok(entries)
    }

    /// Count `(files, subdirectories)` directly inside `dir`.
    ///
    /// Returns `(0, 0)` with a warning when the directory cannot be read.
    pub fn count_children(&self, dir: &Path) -> (u64, u64) {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links);

        let mut files = 0;
        let mut subdirs = 0;
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => subdirs += 1,
                Ok(_) => files += 1,
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "Cannot count folder contents");
                    return (0, 0);
                }
            }
        }
        (files, subdirs)
    }
}

fn to_file_entry(entry: &DirEntry) -> Result<FileEntry, walkdir::Error> {
    let metadata = entry.metadata()?;

    Ok(FileEntry {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: entry.path().to_string_lossy().into_owned(),
        size: metadata.len(),
        is_directory: metadata.is_dir(),
        modified_time: metadata.modified().ok().map(system_time_to_instant),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_first_level_only() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("2025-0114 Acme Factory");
        fs::create_dir(&project).unwrap();
        fs::create_dir(project.join("drawings")).unwrap();
        fs::write(project.join("notes.txt"), b"hello").unwrap();
        fs::write(temp_dir.path().join("readme.md"), b"# projects").unwrap();

        let scanner = FolderScanner::new();
        let entries = scanner.scan(temp_dir.path()).unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["2025-0114 Acme Factory", "readme.md"]);
        assert!(entries[0].is_directory);
        assert!(!entries[1].is_directory);
        assert_eq!(entries[1].size, 10);
        assert!(entries.iter().all(|e| e.modified_time.is_some()));
    }

    #[test]
    fn test_scan_nonexistent_path() {
        let scanner = FolderScanner::new();
        let result = scanner.scan(Path::new("/nonexistent/penguin/path"));
        assert!(matches!(result, Err(ScanError::PathNotFound(_))));
    }

    #[test]
    fn test_scan_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        let result = FolderScanner::new().scan(&file);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_count_children() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("a")).unwrap();
        fs::create_dir(temp_dir.path().join("b")).unwrap();
        fs::create_dir(temp_dir.path().join("a").join("nested")).unwrap();
        fs::write(temp_dir.path().join("one.pdf"), b"1").unwrap();
        fs::write(temp_dir.path().join("two.pdf"), b"2").unwrap();
        fs::write(temp_dir.path().join("three.pdf"), b"3").unwrap();

        let scanner = FolderScanner::new();
        assert_eq!(scanner.count_children(temp_dir.path()), (3, 2));
        assert_eq!(scanner.count_children(&temp_dir.path().join("missing")), (0, 0));
    }
}
