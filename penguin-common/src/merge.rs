//! Reconciliation of discovered and persisted project records
//!
//! Discovered records come fresh from a folder scan; persisted records come
//! from the side-car store and may carry fields the filesystem cannot
//! express (description, end date). [`merge`] combines both into one list
//! keyed by project id without losing store-only data or duplicating ids.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::models::ProjectRecord;
use crate::quality::is_invalid_record_at;

/// Merge against the current clock (see [`merge_at`])
pub fn merge(discovered: &[ProjectRecord], persisted: &[ProjectRecord]) -> Vec<ProjectRecord> {
    merge_at(discovered, persisted, crate::time::now())
}

/// Merge discovered records with persisted records.
///
/// **Algorithm:**
/// 1. Index `persisted` by id (first occurrence wins)
/// 2. For each discovered record, in order:
///    - drop it when invalid, or when its id was already emitted
///    - no persisted counterpart: emit it
///    - invalid persisted counterpart: emit the discovered record
///    - discovered strictly newer (`source_entry.modified_time`): emit it,
///      keeping the persisted description and end date when those are set
///    - otherwise: emit the persisted record unchanged
/// 3. Append the remaining valid persisted records in input order
/// 4. Stable sort by start date, newest first, undated records last
///
/// Pure: no I/O, inputs untouched. Statuses are not refreshed here.
pub fn merge_at(
    discovered: &[ProjectRecord],
    persisted: &[ProjectRecord],
    now: DateTime<Utc>,
) -> Vec<ProjectRecord> {
    let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(persisted.len());
    for (index, record) in persisted.iter().enumerate() {
        lookup.entry(record.id.as_str()).or_insert(index);
    }

    let mut emitted: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(discovered.len() + persisted.len());

    for record in discovered {
        if is_invalid_record_at(record, now) {
            trace!(id = %record.id, name = %record.source_entry.name, "Skipping invalid discovered record");
            continue;
        }
        if !emitted.insert(record.id.as_str()) {
            debug!(id = %record.id, name = %record.source_entry.name, "Skipping duplicate discovered id");
            continue;
        }

        let Some(index) = lookup.remove(record.id.as_str()) else {
            merged.push(record.clone());
            continue;
        };

        let stored = &persisted[index];
        if is_invalid_record_at(stored, now) {
            debug!(id = %record.id, "Replacing invalid persisted record with discovered one");
            merged.push(record.clone());
        } else if record.modified_time() > stored.modified_time() {
            let mut fresh = record.clone();
            if !stored.description.is_empty() {
                fresh.description = stored.description.clone();
            }
            if stored.end_date.is_some() {
                fresh.end_date = stored.end_date;
            }
            merged.push(fresh);
        } else {
            merged.push(stored.clone());
        }
    }

    for record in persisted {
        if emitted.contains(record.id.as_str()) || is_invalid_record_at(record, now) {
            continue;
        }
        emitted.insert(record.id.as_str());
        merged.push(record.clone());
    }

    merged.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    merged
}
