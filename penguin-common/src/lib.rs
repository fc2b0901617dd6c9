//! # Penguin Common Library
//!
//! Domain core shared by the Penguin services:
//! - Instant type and flexible timestamp parsing
//! - Stable 5-character project ids
//! - Data-quality filter for corrupted timestamps
//! - Project status derivation
//! - Reconciliation of discovered and persisted project records
//! - Configuration loading and root folder resolution

pub mod config;
pub mod error;
pub mod id;
pub mod instant;
pub mod merge;
pub mod models;
pub mod quality;
pub mod status;
pub mod time;
pub mod timeparse;

pub use error::{Error, Result};
pub use id::{derive_id, project_key};
pub use instant::Instant;
pub use merge::{merge, merge_at};
pub use models::{FileEntry, ProjectRecord};
pub use quality::{is_invalid_record, is_invalid_record_at, is_invalid_timestamp, FutureTolerance};
pub use status::{resolve_status, ProjectStatus};
pub use timeparse::{parse_timestamp, parse_timestamp_in, parse_timestamp_with_rest, TimestampError};
