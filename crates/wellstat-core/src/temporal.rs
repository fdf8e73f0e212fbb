//! # Status Dates
//!
//! Status dates arrive as loosely formatted strings. This module turns the
//! forms seen in practice into UTC instants; anything else is treated as
//! absent by the statistics that consume it.
//!
//! Accepted forms, tried in order:
//!
//! | Form                          | Example                      |
//! |-------------------------------|------------------------------|
//! | RFC 3339                      | `2019-05-13T08:30:00-06:00`  |
//! | ISO date-time, no offset      | `2019-05-13T08:30:00.250`    |
//! | Space-separated date-time     | `2019-05-13 08:30:00`        |
//! | ISO calendar date             | `2019-05-13`                 |
//! | Slash-separated calendar date | `2019/05/13`                 |
//!
//! Forms without an offset are read as UTC. [`status_calendar_day`] keeps
//! the offset as written, so `2008-12-31T20:00:00-06:00` is Dec 31 there
//! even though the instant falls on Jan 1 in UTC.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse an ISO-like status date into a UTC instant.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_status_date(raw: &str) -> Option<DateTime<Utc>> {
    parse_with_offset(raw).map(|dt| dt.with_timezone(&Utc))
}

/// Month and day of a status date as written, in its own offset.
///
/// Returns `None` for input [`parse_status_date`] would reject.
pub fn status_calendar_day(raw: &str) -> Option<(u32, u32)> {
    parse_with_offset(raw).map(|dt| (dt.month(), dt.day()))
}

fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc().fixed_offset());
        }
    }

    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|ndt| ndt.and_utc().fixed_offset());
        }
    }

    None
}

/// Render an instant as ISO 8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use proptest::prelude::*;

    #[test]
    fn parses_calendar_date_as_midnight_utc() {
        let dt = parse_status_date("2019-05-13").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 5, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_slash_date() {
        let dt = parse_status_date("2019/05/13").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2019, 5, 13));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_status_date("2019-05-13T20:00:00-06:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 5, 14, 2, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_datetime_variants() {
        let t = parse_status_date("2019-05-13T08:30:00").unwrap();
        assert_eq!(t.hour(), 8);
        let s = parse_status_date("2019-05-13 08:30:00.5").unwrap();
        assert_eq!(s.minute(), 30);
    }

    #[test]
    fn trims_whitespace() {
        assert!(parse_status_date("  2020-01-01 ").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_status_date("").is_none());
        assert!(parse_status_date("   ").is_none());
        assert!(parse_status_date("yesterday").is_none());
        assert!(parse_status_date("2019-13-01").is_none());
        assert!(parse_status_date("2019-02-30").is_none());
    }

    #[test]
    fn format_uses_millis_and_z() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 6, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "1970-01-06T00:00:00.000Z");
    }

    #[test]
    fn calendar_day_keeps_written_offset() {
        assert_eq!(status_calendar_day("2008-12-31T20:00:00-06:00"), Some((12, 31)));
        assert_eq!(parse_status_date("2008-12-31T20:00:00-06:00").map(|d| d.day()), Some(1));
        assert_eq!(status_calendar_day("2019/05/13"), Some((5, 13)));
        assert_eq!(status_calendar_day("soon"), None);
    }

    proptest! {
        /// Rendering then parsing returns the same millisecond instant.
        #[test]
        fn format_then_parse_is_identity(millis in -2_208_988_800_000i64..4_102_444_800_000i64) {
            let dt = DateTime::<Utc>::from_timestamp_millis(millis).unwrap();
            prop_assert_eq!(parse_status_date(&format_timestamp(&dt)), Some(dt));
        }
    }
}
