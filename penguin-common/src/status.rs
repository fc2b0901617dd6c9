//! Project lifecycle status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::instant::Instant;

/// Fixed project duration used to derive the end of activity
pub const PROJECT_DURATION_MONTHS: u32 = 3;

/// Lifecycle state derived from a project's start date
///
/// Never trusted from storage: records re-derive it on every read. The
/// Japanese labels written by older side-car files are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    #[serde(alias = "不明")]
    Unknown,
    #[serde(alias = "予定")]
    Planned,
    #[serde(alias = "進行中")]
    InProgress,
    #[serde(alias = "完了")]
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Unknown => "unknown",
            ProjectStatus::Planned => "planned",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the status of a project starting at `start` as seen at `now`.
///
/// - no start date, or a year-1 sentinel: `Unknown`
/// - `now` before start: `Planned`
/// - `now` after start + [`PROJECT_DURATION_MONTHS`]: `Completed`
/// - otherwise: `InProgress` (both boundaries inclusive)
pub fn resolve_status(start: Option<&Instant>, now: DateTime<Utc>) -> ProjectStatus {
    let Some(start) = start.filter(|s| !s.is_sentinel()) else {
        return ProjectStatus::Unknown;
    };

    let now = Instant::from_utc(now);
    if now < *start {
        return ProjectStatus::Planned;
    }

    match start.checked_add_months(PROJECT_DURATION_MONTHS) {
        Some(end) if now > end => ProjectStatus::Completed,
        _ => ProjectStatus::InProgress,
    }
}
