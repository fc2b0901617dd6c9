//! Absolute point in time with a display offset
//!
//! An [`Instant`] wraps `DateTime<FixedOffset>`. Equality, ordering and
//! hashing compare the offset-normalized value, so `2025-01-14T00:00:00+09:00`
//! and `2025-01-13T15:00:00Z` are the same instant. The offset only affects
//! how the value is displayed and which calendar date it falls on.

use chrono::{DateTime, Datelike, FixedOffset, Local, Months, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::timeparse::{parse_timestamp, TimestampError};

/// Point in time with nanosecond precision and a display-only UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<FixedOffset>);

/// Re-express `datetime` in the nearest whole-minute offset.
///
/// RFC 3339 text carries `±HH:MM` only, so historical offsets such as
/// Tokyo's local mean time (+09:18:59) would not survive formatting.
fn whole_minute_offset(datetime: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let seconds = datetime.offset().local_minus_utc();
    if seconds % 60 == 0 {
        return datetime;
    }
    let rounded = (seconds + 30).div_euclid(60) * 60;
    match FixedOffset::east_opt(rounded) {
        Some(offset) => datetime.with_timezone(&offset),
        None => datetime,
    }
}

impl Instant {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(whole_minute_offset(datetime))
    }

    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self(datetime.fixed_offset())
    }

    pub fn from_local(datetime: DateTime<Local>) -> Self {
        Self::new(datetime.fixed_offset())
    }

    /// Current time in the process's local offset
    pub fn now() -> Self {
        Self::from_local(Local::now())
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Same instant displayed in another timezone
    pub fn with_timezone<Tz: TimeZone>(&self, tz: &Tz) -> Self {
        Self::new(self.0.with_timezone(tz).fixed_offset())
    }

    /// Offset in seconds east of UTC
    pub fn offset_seconds(&self) -> i32 {
        self.0.offset().local_minus_utc()
    }

    /// Calendar year in the instant's own offset
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Sub-second component (0..=999_999_999)
    pub fn nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }

    /// Year-1 values come from a parse that failed or never ran upstream.
    pub fn is_sentinel(&self) -> bool {
        self.year() == 1
    }

    /// Add calendar months; the day is clamped to the end of shorter months.
    pub fn checked_add_months(&self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// Canonical text form: nine fractional digits, `Z` for UTC, `±HH:MM` otherwise.
    pub fn to_rfc3339_nano(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    /// Calendar date in the instant's own offset (`YYYY-MM-DD`)
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<DateTime<FixedOffset>> for Instant {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self::new(datetime)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl From<DateTime<Local>> for Instant {
    fn from(datetime: DateTime<Local>) -> Self {
        Self::from_local(datetime)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339_nano())
    }
}

impl FromStr for Instant {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s)
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339_nano())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_timestamp(&text).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<Instant>` fields.
///
/// `None` is written as an empty string. On read, an empty string, `null`
/// or a missing field (with `#[serde(default)]`) become `None`; any other
/// string goes through the flexible timestamp parser.
pub mod serde_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Instant>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(instant) => serializer.serialize_str(&instant.to_rfc3339_nano()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Instant>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        match text.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_timestamp(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
