//! Timestamp utilities

use chrono::{DateTime, Local, Utc};
use std::time::SystemTime;

use crate::instant::Instant;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a filesystem timestamp to an [`Instant`] displayed in the local offset
pub fn system_time_to_instant(time: SystemTime) -> Instant {
    Instant::from_local(DateTime::<Local>::from(time))
}
