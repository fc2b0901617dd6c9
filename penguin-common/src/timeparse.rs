//! Flexible date/time string parsing
//!
//! Folder names and hand-edited side-car files carry dates in many shapes:
//! `2025-0618`, `2025/6/18`, `20250618`, full RFC 3339 with nanoseconds, and
//! so on. This module tries a fixed, ordered table of formats and returns the
//! first one that both matches and forms a valid calendar value.
//!
//! **Format classes** (tried in order):
//! 1. Offset-qualified (`Z`, `±HH:MM`, `±HHMM`, `±HH`): parsed with that offset
//! 2. Naive date/time and date-only forms: interpreted in the local timezone
//!    (or the zone passed to the `_in` variants)
//!
//! Each layout is compiled once into a regex by replacing its tokens with
//! digit classes of the expected width, so a date can be located anywhere in
//! a larger string such as `"Acme Corp 2025-01-14 Factory"`.

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::instant::Instant;

/// Timestamp parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// No format matched a valid date/time anywhere in the input
    #[error("unable to parse date/time in the string: {input}")]
    Unparseable { input: String },
}

/// Result of locating a timestamp inside a larger string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// The parsed instant
    pub instant: Instant,
    /// Input with the matched substring removed (both sides trimmed, joined by one space)
    pub rest: String,
    /// Name of the format that matched
    pub format: &'static str,
}

/// One entry of the format table
#[derive(Debug)]
pub struct TimestampFormat {
    /// Short display name
    pub name: &'static str,
    /// Layout in token form (`YYYY`, `MM`, `DD`, `M`, `D`, `hh`, `mm`, `ss`, `fffffffff`, `ZZ`)
    pub layout: &'static str,
    /// Sample input accepted by this format
    pub example: &'static str,
    matcher: Regex,
}

impl TimestampFormat {
    /// Whether the layout carries its own UTC offset
    pub fn is_zoned(&self) -> bool {
        self.layout.contains("ZZ")
    }
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Year,
    Month,
    Day,
    LooseMonth,
    LooseDay,
    Hour,
    Minute,
    Second,
    Fraction,
    Offset,
}

impl Token {
    fn capture(self) -> (&'static str, &'static str) {
        match self {
            Token::Year => ("year", "[0-9]{4}"),
            Token::Month => ("month", "[0-9]{2}"),
            Token::Day => ("day", "[0-9]{2}"),
            Token::LooseMonth => ("month", "[0-9]{1,2}"),
            Token::LooseDay => ("day", "[0-9]{1,2}"),
            Token::Hour => ("hour", "[0-9]{2}"),
            Token::Minute => ("minute", "[0-9]{2}"),
            Token::Second => ("second", "[0-9]{2}"),
            // Any run of digits; normalized to nine afterwards
            Token::Fraction => ("fraction", "[0-9]+"),
            Token::Offset => ("offset", "Z|[+-][0-9]{2}(?::?[0-9]{2})?"),
        }
    }
}

/// Layout tokens, longest first so `MM` wins over `M`.
const LAYOUT_TOKENS: &[(&str, Token)] = &[
    ("fffffffff", Token::Fraction),
    ("YYYY", Token::Year),
    ("MM", Token::Month),
    ("DD", Token::Day),
    ("hh", Token::Hour),
    ("mm", Token::Minute),
    ("ss", Token::Second),
    ("ZZ", Token::Offset),
    ("M", Token::LooseMonth),
    ("D", Token::LooseDay),
];

/// (name, layout, example) in priority order
const FORMAT_TABLE: &[(&str, &str, &str)] = &[
    ("RFC3339Nano", "YYYY-MM-DDThh:mm:ss.fffffffffZZ", "2025-01-14T15:30:45.123456789+09:00"),
    ("RFC3339", "YYYY-MM-DDThh:mm:ssZZ", "2025-01-14T15:30:45+09:00"),
    ("ISO8601 with ns", "YYYY-MM-DDThh:mm:ss.fffffffff", "2025-01-14T15:30:45.123456789"),
    ("ISO8601", "YYYY-MM-DDThh:mm:ss", "2025-01-14T15:30:45"),
    ("DateTime", "YYYY-MM-DD hh:mm:ss", "2025-01-14 15:30:45"),
    ("Special Compact", "YYYY-MMDD", "2025-0114"),
    ("Date", "YYYY-MM-DD", "2025-01-14"),
    ("CompactDate", "YYYYMMDD", "20250114"),
    ("SlashDate", "YYYY/MM/DD", "2025/01/14"),
    ("DotDate", "YYYY.MM.DD", "2025.01.14"),
    ("SlashDate short", "YYYY/M/D", "2025/1/2"),
    ("DotDate short", "YYYY.M.D", "2025.1.2"),
    ("Date short", "YYYY-M-D", "2025-1-2"),
];

static FORMATS: Lazy<Vec<TimestampFormat>> = Lazy::new(|| {
    FORMAT_TABLE
        .iter()
        .map(|&(name, layout, example)| TimestampFormat {
            name,
            layout,
            example,
            matcher: compile_layout(layout),
        })
        .collect()
});

/// Turn a token layout into a regex with one named group per token.
fn compile_layout(layout: &str) -> Regex {
    let mut pattern = String::new();
    let mut rest = layout;

    'scan: while let Some(ch) = rest.chars().next() {
        for &(token, kind) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                let (name, class) = kind.capture();
                pattern.push_str(&format!("(?P<{name}>{class})"));
                rest = tail;
                continue 'scan;
            }
        }
        let mut buf = [0u8; 4];
        pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        rest = &rest[ch.len_utf8()..];
    }

    Regex::new(&pattern).expect("timestamp layouts compile to valid regexes")
}

/// The format table in priority order
pub fn supported_formats() -> &'static [TimestampFormat] {
    &FORMATS
}

/// Parse a date/time string; naive forms use the local timezone.
pub fn parse_timestamp(input: &str) -> Result<Instant, TimestampError> {
    parse_timestamp_in(input, &Local)
}

/// Parse a date/time string; naive forms use `zone`.
pub fn parse_timestamp_in<Tz: TimeZone>(input: &str, zone: &Tz) -> Result<Instant, TimestampError> {
    parse_timestamp_with_rest_in(input, zone).map(|parsed| parsed.instant)
}

/// Locate and parse a date/time inside `input`, returning the remainder too.
///
/// ```
/// use penguin_common::timeparse::parse_timestamp_with_rest;
///
/// let parsed = parse_timestamp_with_rest("Acme 2025-01-14 Factory").unwrap();
/// assert_eq!(parsed.rest, "Acme Factory");
/// assert_eq!(parsed.instant.date_string(), "2025-01-14");
/// ```
pub fn parse_timestamp_with_rest(input: &str) -> Result<ParsedTimestamp, TimestampError> {
    parse_timestamp_with_rest_in(input, &Local)
}

/// [`parse_timestamp_with_rest`] with an explicit zone for naive forms
pub fn parse_timestamp_with_rest_in<Tz: TimeZone>(
    input: &str,
    zone: &Tz,
) -> Result<ParsedTimestamp, TimestampError> {
    for format in supported_formats() {
        // Only the first match of each format is considered; an invalid
        // calendar value there falls through to the next format.
        let Some(caps) = format.matcher.captures(input) else {
            continue;
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };

        match build_instant(&caps, format.is_zoned(), zone) {
            Some(instant) => {
                tracing::trace!(input, format = format.name, "Parsed timestamp");
                return Ok(ParsedTimestamp {
                    instant,
                    rest: join_remainder(&input[..whole.start()], &input[whole.end()..]),
                    format: format.name,
                });
            }
            None => {
                tracing::trace!(input, format = format.name, "Matched text is not a valid date/time");
            }
        }
    }

    Err(TimestampError::Unparseable {
        input: input.to_string(),
    })
}

/// Locate only the nanosecond, offset-qualified form (RFC 3339 with fraction).
pub fn parse_rfc3339_nano(input: &str) -> Result<Instant, TimestampError> {
    let unparseable = || TimestampError::Unparseable {
        input: input.to_string(),
    };
    let format = supported_formats().first().ok_or_else(unparseable)?;
    let caps = format.matcher.captures(input).ok_or_else(unparseable)?;
    build_instant(&caps, true, &Local).ok_or_else(unparseable)
}

/// Pad (with zeros) or truncate a fractional-second digit string to nanoseconds.
///
/// Extra digits beyond the ninth are dropped, never rounded.
pub fn normalize_fraction(digits: &str) -> u32 {
    let mut nanos = 0u32;
    for position in 0..9 {
        let digit = digits
            .as_bytes()
            .get(position)
            .map(|b| u32::from(b.wrapping_sub(b'0')))
            .filter(|d| *d < 10)
            .unwrap_or(0);
        nanos = nanos * 10 + digit;
    }
    nanos
}

fn join_remainder(prefix: &str, suffix: &str) -> String {
    let prefix = prefix.trim();
    let suffix = suffix.trim();
    if !prefix.is_empty() && !suffix.is_empty() {
        format!("{prefix} {suffix}")
    } else {
        format!("{prefix}{suffix}")
    }
}

fn numeric(caps: &Captures<'_>, name: &str) -> Option<u32> {
    match caps.name(name) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}

fn build_instant<Tz: TimeZone>(caps: &Captures<'_>, zoned: bool, zone: &Tz) -> Option<Instant> {
    let year = i32::try_from(numeric(caps, "year")?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, numeric(caps, "month")?, numeric(caps, "day")?)?;
    let nanos = caps
        .name("fraction")
        .map(|m| normalize_fraction(m.as_str()))
        .unwrap_or(0);
    let time = NaiveTime::from_hms_nano_opt(
        numeric(caps, "hour")?,
        numeric(caps, "minute")?,
        numeric(caps, "second")?,
        nanos,
    )?;
    let naive = date.and_time(time);

    if zoned {
        let offset = parse_offset(caps.name("offset")?.as_str())?;
        offset.from_local_datetime(&naive).single().map(Instant::new)
    } else {
        resolve_in_zone(zone, &naive).map(Instant::new)
    }
}

fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, digits) = text.split_at(1);
    let digits = digits.replace(':', "");
    let hours: i32 = digits.get(0..2)?.parse().ok()?;
    let minutes: i32 = match digits.get(2..4) {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    let seconds = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if sign == "-" { -seconds } else { seconds })
}

/// Attach `zone` to a wall-clock value.
///
/// Ambiguous wall times (DST fall-back) take the earlier instant. Wall times
/// inside a DST gap are read with the offset in effect before the gap.
fn resolve_in_zone<Tz: TimeZone>(zone: &Tz, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.fixed_offset()),
        LocalResult::None => {
            let before = zone
                .offset_from_local_datetime(&(*naive - Duration::days(1)))
                .earliest()?
                .fix();
            let utc = *naive - Duration::seconds(i64::from(before.local_minus_utc()));
            Some(zone.from_utc_datetime(&utc).fixed_offset())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn jst_date(y: i32, m: u32, d: u32) -> Instant {
        Instant::new(jst().with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_parse_table_in_fixed_zone() {
        let cases: &[(&str, Instant)] = &[
            (
                "2025-01-14T15:30:45.123456789+09:00",
                Instant::new(
                    jst().with_ymd_and_hms(2025, 1, 14, 15, 30, 45).unwrap()
                        + Duration::nanoseconds(123_456_789),
                ),
            ),
            (
                "2025-01-14T15:30:45+09:00",
                Instant::new(jst().with_ymd_and_hms(2025, 1, 14, 15, 30, 45).unwrap()),
            ),
            ("20250114", jst_date(2025, 1, 14)),
            ("2025-0114", jst_date(2025, 1, 14)),
            ("2025-01-14", jst_date(2025, 1, 14)),
            ("2025/01/14", jst_date(2025, 1, 14)),
            ("2025.01.14", jst_date(2025, 1, 14)),
            (
                "2025-01-14T15:30:45.123456789",
                Instant::new(
                    jst().with_ymd_and_hms(2025, 1, 14, 15, 30, 45).unwrap()
                        + Duration::nanoseconds(123_456_789),
                ),
            ),
            (
                "2025-01-14T15:30:45",
                Instant::new(jst().with_ymd_and_hms(2025, 1, 14, 15, 30, 45).unwrap()),
            ),
            (
                "2025-01-14 15:30:45",
                Instant::new(jst().with_ymd_and_hms(2025, 1, 14, 15, 30, 45).unwrap()),
            ),
            ("2025/1/2", jst_date(2025, 1, 2)),
            ("2025.1.2", jst_date(2025, 1, 2)),
            ("2025-1-2", jst_date(2025, 1, 2)),
        ];

        for (input, expected) in cases {
            let parsed = parse_timestamp_in(input, &jst())
                .unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(&parsed, expected, "input: {input}");
        }
    }

    #[test]
    fn test_rejects_non_dates() {
        for input in ["not a date", "", "2025-13-45", "豊田築炉 名和工場"] {
            let err = parse_timestamp_in(input, &jst()).unwrap_err();
            assert_eq!(
                err,
                TimestampError::Unparseable {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn test_error_message_names_input() {
        let err = parse_timestamp("not a date").unwrap_err();
        assert!(err.to_string().contains("not a date"));
    }

    #[test]
    fn test_explicit_offset_is_preserved() {
        let parsed = parse_timestamp("2023-06-15T12:30:45+09:00").unwrap();
        assert_eq!(parsed.offset_seconds(), 9 * 3600);
        assert_eq!(parsed.to_rfc3339_nano(), "2023-06-15T12:30:45.000000000+09:00");

        let utc = parse_timestamp("2023-06-15T03:30:45Z").unwrap();
        assert_eq!(utc.offset_seconds(), 0);
        assert_eq!(parsed, utc);
    }

    #[test]
    fn test_offset_variants() {
        let colon = parse_timestamp("2023-06-15T12:30:45-05:30").unwrap();
        let compact = parse_timestamp("2023-06-15T12:30:45-0530").unwrap();
        assert_eq!(colon, compact);
        assert_eq!(compact.offset_seconds(), -(5 * 3600 + 30 * 60));

        let hours_only = parse_timestamp("2023-06-15T12:30:45+09").unwrap();
        assert_eq!(hours_only.offset_seconds(), 9 * 3600);
    }

    #[test]
    fn test_unusual_offset_minutes_are_accepted() {
        let parsed = parse_timestamp("0001-01-01T09:26:51+09:18").unwrap();
        assert_eq!(parsed.year(), 1);
        assert_eq!(parsed.offset_seconds(), 9 * 3600 + 18 * 60);
    }

    #[test]
    fn test_same_calendar_date_in_local_zone() {
        let inputs = ["1971-0618", "1971-06-18", "19710618", "1971.6.18", "1971/06/18", "1971/6/18", "1971.06.18"];
        let expected = Instant::from_local(Local.with_ymd_and_hms(1971, 6, 18, 0, 0, 0).unwrap());

        for input in inputs {
            let parsed = parse_timestamp(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(parsed, expected, "input: {input}");
            assert_eq!(parsed.date_string(), "1971-06-18");
        }
    }

    #[test]
    fn test_fraction_normalization() {
        assert_eq!(normalize_fraction("5"), 500_000_000);
        assert_eq!(normalize_fraction("123"), 123_000_000);
        assert_eq!(normalize_fraction("123456789"), 123_456_789);
        // Truncated, not rounded
        assert_eq!(normalize_fraction("1234567899"), 123_456_789);
        assert_eq!(normalize_fraction("9999999999999"), 999_999_999);

        let short = parse_timestamp("2025-01-14T15:30:45.5Z").unwrap();
        assert_eq!(short.nanos(), 500_000_000);
        let long = parse_timestamp("2025-01-14T15:30:45.1234567899Z").unwrap();
        assert_eq!(long.nanos(), 123_456_789);
    }

    #[test]
    fn test_date_with_rest() {
        let cases = [
            ("2025-01-14 豊田築炉 名和工場", "豊田築炉 名和工場"),
            ("豊田築炉 2025-01-14 名和工場", "豊田築炉 名和工場"),
            ("豊田築炉 名和工場 2025-01-14", "豊田築炉 名和工場"),
            ("2025-01-14", ""),
            ("  2025-01-14   豊田築炉   名和工場  ", "豊田築炉   名和工場"),
        ];

        for (input, rest) in cases {
            let parsed = parse_timestamp_with_rest_in(input, &jst()).unwrap();
            assert_eq!(parsed.instant, jst_date(2025, 1, 14), "input: {input}");
            assert_eq!(parsed.rest, rest, "input: {input}");
        }
    }

    #[test]
    fn test_zoned_date_in_text() {
        let parsed =
            parse_timestamp_with_rest_in("Project 2025-01-14T15:30:45+09:00 Description", &jst()).unwrap();
        assert_eq!(
            parsed.instant,
            Instant::new(jst().with_ymd_and_hms(2025, 1, 14, 15, 30, 45).unwrap())
        );
        assert_eq!(parsed.rest, "Project Description");
        assert_eq!(parsed.format, "RFC3339");
    }

    #[test]
    fn test_folder_name_uses_hybrid_format() {
        let parsed = parse_timestamp_with_rest_in("2025-0618 豊田築炉 名和工場", &jst()).unwrap();
        assert_eq!(parsed.format, "Special Compact");
        assert_eq!(parsed.instant.month_day(), (6, 18));
        assert_eq!(parsed.rest, "豊田築炉 名和工場");
    }

    #[test]
    fn test_rfc3339_nano_only() {
        let parsed = parse_rfc3339_nano("Created at 2025-01-14T15:30:45.123456789Z by user").unwrap();
        assert_eq!(parsed.nanos(), 123_456_789);
        assert_eq!(parsed.offset_seconds(), 0);

        assert!(parse_rfc3339_nano("2025-01-14").is_err());
        assert!(parse_rfc3339_nano("not a date").is_err());
    }

    #[test]
    fn test_round_trip_through_canonical_form() {
        let inputs = [
            "2025-01-14T15:30:45.123456789+09:00",
            "2025-01-14T15:30:45.5-03:00",
            "2025-01-14T15:30:45Z",
            "2025-01-14 15:30:45",
            "2025-0114",
            "2025/1/2",
            "20250114",
        ];
        for input in inputs {
            let first = parse_timestamp(input).unwrap();
            let second = parse_timestamp(&first.to_rfc3339_nano()).unwrap();
            assert_eq!(first, second, "input: {input}");
            assert_eq!(first.offset_seconds(), second.offset_seconds());
        }
    }

    #[test]
    fn test_round_trip_in_seconds_offset_zone() {
        let lmt = FixedOffset::east_opt(33539).unwrap();
        for input in ["1880-01-01", "0001-01-01T00:00:00", "2025-01-14 15:30:45"] {
            let first = parse_timestamp_in(input, &lmt).unwrap();
            assert_eq!(first.offset_seconds() % 60, 0, "input: {input}");

            let second = parse_timestamp(&first.to_rfc3339_nano()).unwrap();
            assert_eq!(first, second, "input: {input}");
            assert_eq!(first.offset_seconds(), second.offset_seconds());
        }
    }

    #[test]
    fn test_format_table_order() {
        let formats = supported_formats();
        assert!(formats[0].is_zoned());
        assert!(formats[1].is_zoned());
        assert!(formats[2..].iter().all(|f| !f.is_zoned()));

        for format in formats {
            assert!(format.matcher.is_match(format.example), "{}", format.name);
        }
    }

    #[test]
    fn test_layout_literals_are_escaped() {
        // '.' must not act as a wildcard
        assert!(parse_timestamp_in("2025x01x14", &jst()).is_err());
    }

    impl Instant {
        fn month_day(&self) -> (u32, u32) {
            (self.as_datetime().month(), self.as_datetime().day())
        }
    }
}
