//! # Calendar Proximity Ranking
//!
//! Ranks records by how close their status date falls to a target
//! month/day, measured around a 365-day cycle so that Dec 31 and Jan 1 are
//! one day apart. The year of each record is ignored.
//!
//! Day-of-year numbers come from a fixed non-leap reference year. Feb 29
//! (on a record or as the target) rolls forward to Mar 1.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use wellstat_core::{status_calendar_day, ValidationError, WellRecord};

/// Non-leap year used for day-of-year numbering.
pub const REFERENCE_YEAR: i32 = 2001;

/// Length of the reference year.
pub const DAYS_PER_YEAR: u32 = 365;

/// 1-indexed day of the reference year for `(month, day)`; Jan 1 → 1.
///
/// Returns `None` when the pair is not a calendar day.
pub fn day_of_year(month: u32, day: u32) -> Option<u32> {
    let (month, day) = if (month, day) == (2, 29) { (3, 1) } else { (month, day) };
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).map(|d| d.ordinal())
}

/// Wrap-around distance between two day-of-year values, in [0, 182].
pub fn circular_diff(a: u32, b: u32) -> u32 {
    let d = a.abs_diff(b) % DAYS_PER_YEAR;
    d.min(DAYS_PER_YEAR - d)
}

/// A validated target month/day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    month: u32,
    day: u32,
    ordinal: u32,
}

impl MonthDay {
    /// Validate a month/day pair.
    pub fn new(month: u32, day: u32) -> Result<Self, ValidationError> {
        let ordinal =
            day_of_year(month, day).ok_or(ValidationError::InvalidMonthDay { month, day })?;
        Ok(Self {
            month,
            day,
            ordinal,
        })
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of month.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Day of the reference year.
    pub fn day_of_year(&self) -> u32 {
        self.ordinal
    }
}

/// A record annotated with its calendar distance from the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    /// The original record, serialized inline.
    #[serde(flatten)]
    pub record: WellRecord,
    /// Circular day distance to the target.
    pub distance_days: u32,
    /// Month of the record's status date.
    pub status_month: u32,
    /// Day of month of the record's status date.
    pub status_day: u32,
}

/// Rank records by circular calendar distance to `target`, closest first.
///
/// The month/day is read in the date's own offset. Records with an absent
/// or unparseable status date are dropped. Ties keep input order. At most `limit` records are returned.
pub fn rank_by_calendar_proximity<I>(
    records: I,
    target: MonthDay,
    limit: usize,
) -> Vec<RankedRecord>
where
    I: IntoIterator<Item = WellRecord>,
{
    let mut ranked: Vec<RankedRecord> = records
        .into_iter()
        .filter_map(|record| {
            let (status_month, status_day) =
                record.status_date.as_deref().and_then(status_calendar_day)?;
            let ordinal = day_of_year(status_month, status_day)?;
            Some(RankedRecord {
                record,
                distance_days: circular_diff(ordinal, target.day_of_year()),
                status_month,
                status_day,
            })
        })
        .collect();

    ranked.sort_by_key(|r| r.distance_days);
    ranked.truncate(limit);
    ranked
}
