//! Data-quality filter for corrupted timestamps
//!
//! Older side-car files contain timestamps produced by failed parses:
//! year-1 values such as `0001-01-01T09:26:51+09:18`, dates before 2000 and
//! dates far in the future. Records carrying them are excluded from the
//! reconciled project list. Exclusion is silent; callers that need counts
//! compare input and output lengths.

use chrono::{DateTime, Duration, Months, Utc};

use crate::instant::Instant;
use crate::models::ProjectRecord;

/// 2000-01-01T00:00:00Z; anything earlier is treated as corrupted
pub const VALIDITY_FLOOR_UNIX: i64 = 946_684_800;

/// How far into the future a timestamp may lie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureTolerance {
    /// Up to one year ahead (general date fields)
    OneYear,
    /// Up to one day ahead (creation/modification times)
    OneDay,
}

impl FutureTolerance {
    fn horizon(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            FutureTolerance::OneYear => now
                .checked_add_months(Months::new(12))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            FutureTolerance::OneDay => now
                .checked_add_signed(Duration::days(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// Whether a single timestamp is unusable.
///
/// Invalid when absent, in year 1, later than `now` plus `tolerance`, or
/// earlier than 2000-01-01T00:00:00Z.
pub fn is_invalid_timestamp(
    timestamp: Option<&Instant>,
    tolerance: FutureTolerance,
    now: DateTime<Utc>,
) -> bool {
    let Some(timestamp) = timestamp else {
        return true;
    };

    timestamp.is_sentinel()
        || timestamp.to_utc() > tolerance.horizon(now)
        || timestamp.unix_seconds() < VALIDITY_FLOOR_UNIX
}

/// Whether a record must be excluded from the reconciled list, as seen at `now`.
///
/// **Rules:**
/// 1. Empty id: invalid
/// 2. Year-1 modification time with both company and location non-empty:
///    kept (salvageable, the names still identify the project)
/// 3. Otherwise the modification time must pass [`is_invalid_timestamp`]
///    with [`FutureTolerance::OneDay`]
pub fn is_invalid_record_at(record: &ProjectRecord, now: DateTime<Utc>) -> bool {
    if record.id.is_empty() {
        return true;
    }

    let modified = record.source_entry.modified_time.as_ref();
    if let Some(modified) = modified {
        if modified.is_sentinel()
            && !record.company_name.is_empty()
            && !record.location_name.is_empty()
        {
            return false;
        }
    }

    is_invalid_timestamp(modified, FutureTolerance::OneDay, now)
}

/// [`is_invalid_record_at`] against the current clock
pub fn is_invalid_record(record: &ProjectRecord) -> bool {
    is_invalid_record_at(record, crate::time::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileEntry;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn record(modified: Option<&str>, company: &str, location: &str) -> ProjectRecord {
        ProjectRecord {
            id: "WTV7C".to_string(),
            company_name: company.to_string(),
            location_name: location.to_string(),
            source_entry: FileEntry {
                name: "2025-0114 Acme Factory".to_string(),
                is_directory: true,
                modified_time: modified.map(|s| s.parse().unwrap()),
                ..FileEntry::default()
            },
            ..ProjectRecord::default()
        }
    }

    #[test]
    fn test_timestamp_rules() {
        let ts = |s: &str| s.parse::<Instant>().unwrap();
        let one_year = FutureTolerance::OneYear;

        assert!(is_invalid_timestamp(None, one_year, now()));
        assert!(is_invalid_timestamp(Some(&ts("0001-01-01T09:26:51+09:18")), one_year, now()));
        assert!(is_invalid_timestamp(Some(&ts("1999-12-31T23:59:59Z")), one_year, now()));
        assert!(!is_invalid_timestamp(Some(&ts("2000-01-01T00:00:00Z")), one_year, now()));
        assert!(!is_invalid_timestamp(Some(&ts("2026-05-01T00:00:00Z")), one_year, now()));
        assert!(is_invalid_timestamp(Some(&ts("2026-06-02T00:00:00Z")), one_year, now()));
    }

    #[test]
    fn test_one_day_tolerance_is_narrower() {
        let next_week: Instant = "2025-06-08T00:00:00Z".parse().unwrap();
        assert!(!is_invalid_timestamp(Some(&next_week), FutureTolerance::OneYear, now()));
        assert!(is_invalid_timestamp(Some(&next_week), FutureTolerance::OneDay, now()));

        let tomorrow_morning: Instant = "2025-06-02T06:00:00Z".parse().unwrap();
        assert!(!is_invalid_timestamp(Some(&tomorrow_morning), FutureTolerance::OneDay, now()));
    }

    #[test]
    fn test_sentinel_record_without_names_is_invalid() {
        let rec = record(Some("0001-01-01T09:26:51+09:18"), "", "");
        assert!(is_invalid_record_at(&rec, now()));
    }

    #[test]
    fn test_normal_record_is_valid() {
        let rec = record(Some("2024-06-01T00:00:00+09:00"), "", "");
        assert!(!is_invalid_record_at(&rec, now()));
        assert!(!is_invalid_record(&rec));
    }

    #[test]
    fn test_pre_2000_record_is_invalid() {
        let rec = record(Some("1999-01-01T00:00:00Z"), "Acme", "Factory");
        assert!(is_invalid_record_at(&rec, now()));
    }

    #[test]
    fn test_missing_modified_time_is_invalid() {
        let rec = record(None, "Acme", "Factory");
        assert!(is_invalid_record_at(&rec, now()));
    }

    #[test]
    fn test_empty_id_is_invalid() {
        let mut rec = record(Some("2024-06-01T00:00:00+09:00"), "Acme", "Factory");
        rec.id.clear();
        assert!(is_invalid_record_at(&rec, now()));
    }

    /// Known quirk: a year-1 modification time is tolerated when both names
    /// are present, even though the same timestamp alone is invalid.
    #[test]
    fn test_sentinel_record_with_names_is_salvaged() {
        let rec = record(Some("0001-01-01T09:26:51+09:18"), "Acme", "Factory");
        assert!(!is_invalid_record_at(&rec, now()));

        let one_name = record(Some("0001-01-01T09:26:51+09:18"), "Acme", "");
        assert!(is_invalid_record_at(&one_name, now()));
    }
}
