//! YAML side-car store (`.inside.yaml`)
//!
//! The store is a YAML sequence of project records living inside the
//! scanned root. Instants are written in nanosecond RFC 3339 form with an
//! explicit offset, or as an empty string when unset.
//!
//! Writes are plain overwrites: no temp file + rename, no locking. One
//! writer per store path is assumed.

use chrono::{DateTime, Utc};
use penguin_common::ProjectRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the side-car store inside a projects root
pub const STORE_FILE_NAME: &str = ".inside.yaml";

/// Side-car store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed
    #[error("Store I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store content is not a valid record list (includes unparseable timestamps)
    #[error("Store YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Store location for a projects root
pub fn store_path_for(root: &Path) -> PathBuf {
    root.join(STORE_FILE_NAME)
}

/// Serialize records to YAML
pub fn encode(records: &[ProjectRecord]) -> Result<String, StoreError> {
    Ok(serde_yaml::to_string(records)?)
}

/// Deserialize records from YAML, re-deriving each status at `now`.
///
/// Empty or whitespace-only content is an empty list.
pub fn decode_at(text: &str, now: DateTime<Utc>) -> Result<Vec<ProjectRecord>, StoreError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut records: Vec<ProjectRecord> = serde_yaml::from_str(text)?;
    for record in &mut records {
        record.refresh_status(now);
    }
    Ok(records)
}

/// [`decode_at`] against the current clock
pub fn decode(text: &str) -> Result<Vec<ProjectRecord>, StoreError> {
    decode_at(text, penguin_common::time::now())
}

/// Side-car store bound to one file path
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store colocated with a projects root (`<root>/.inside.yaml`)
    pub fn for_root(root: &Path) -> Self {
        Self::new(store_path_for(root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records; a missing file is an empty list.
    pub fn load(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No side-car store yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records = decode(&text)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Loaded side-car store");
        Ok(records)
    }

    /// Overwrite the store with `records`, creating parent directories.
    pub fn save(&self, records: &[ProjectRecord]) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let text = encode(records)?;
        std::fs::write(&self.path, text).map_err(io_error)?;

        tracing::info!(path = %self.path.display(), count = records.len(), "Saved side-car store");
        Ok(())
    }
}
