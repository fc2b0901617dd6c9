//! Filesystem-facing services for the project list

pub mod folder_scanner;
pub mod project_discovery;
pub mod project_service;
pub mod project_store;

pub use folder_scanner::{FolderScanner, ScanError};
pub use project_discovery::{discover_projects, parse_folder_name, record_from_entry};
pub use project_service::{CleanupReport, ProjectService, ServiceError};
pub use project_store::{store_path_for, ProjectStore, StoreError, STORE_FILE_NAME};
