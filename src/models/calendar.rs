//! Calendar month buckets and date helpers.
//!
//! # Time Model
//! Schedule dates are naive (zone-less) date-times as exported by the
//! planning tool. Durations are measured on the wall clock and reported
//! in fractional days (seconds / 86 400); there is no working-day
//! calendar applied.
//!
//! A month bucket is the half-open window
//! `[first of month 00:00, first of next month 00:00)`.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{EdmError, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A calendar month, displayed as `YYYY-MM`.
///
/// Internally the first day of the month, so ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket(NaiveDate);

impl MonthBucket {
    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(date - Duration::days(i64::from(date.day0())))
    }

    /// The month containing `at`.
    pub fn of(at: NaiveDateTime) -> Self {
        Self::containing(at.date())
    }

    /// Builds a bucket from year and month (1-12).
    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Midnight on the first day of the month (window start, inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.0.and_time(chrono::NaiveTime::MIN)
    }

    /// The following month, `None` past the calendar range.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// Midnight on the first day of the following month (window end, exclusive).
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.next().map(|m| m.start())
    }

    /// Every month from `first` to `last` inclusive. Empty if `last < first`.
    pub fn range_inclusive(first: Self, last: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut cursor = Some(first);
        while let Some(month) = cursor {
            if month > last {
                break;
            }
            months.push(month);
            cursor = month.next();
        }
        months
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthBucket {
    type Err = EdmError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| EdmError::InvalidDate {
                table: "month".into(),
                field: "bucket".into(),
                value: s.to_string(),
            })
    }
}

// Serialized as "YYYY-MM" so buckets work as JSON map keys.
impl Serialize for MonthBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Converts a duration to fractional days.
pub fn duration_days(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

/// Parses a schedule date cell.
///
/// Empty (or whitespace-only) text is an absent date and yields `Ok(None)`.
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated forms, and a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_date(text: &str) -> std::result::Result<Option<NaiveDateTime>, chrono::ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let mut last_err = None;
    for format in DATE_TIME_FORMATS {
        match NaiveDateTime::parse_from_str(text, format) {
            Ok(parsed) => return Ok(Some(parsed)),
            Err(e) => last_err = Some(e),
        }
    }
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date.and_time(chrono::NaiveTime::MIN))),
        Err(e) => Err(last_err.unwrap_or(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        parse_date(s).unwrap().unwrap()
    }

    #[test]
    fn test_month_bucket_display_and_parse() {
        let m = MonthBucket::of(dt("2024-02-29 17:00"));
        assert_eq!(m.to_string(), "2024-02");
        assert_eq!("2024-02".parse::<MonthBucket>().unwrap(), m);
        assert!("2024-13".parse::<MonthBucket>().is_err());
    }

    #[test]
    fn test_month_window() {
        let m = MonthBucket::from_ym(2024, 12).unwrap();
        assert_eq!(m.start(), dt("2024-12-01"));
        assert_eq!(m.end(), Some(dt("2025-01-01")));
        assert_eq!(m.next().unwrap().to_string(), "2025-01");
    }

    #[test]
    fn test_range_inclusive() {
        let first = MonthBucket::from_ym(2023, 11).unwrap();
        let last = MonthBucket::from_ym(2024, 2).unwrap();
        let months: Vec<String> = MonthBucket::range_inclusive(first, last)
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert!(MonthBucket::range_inclusive(last, first).is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(parse_date("   ").unwrap(), None);
        assert_eq!(dt("2024-01-15 08:00"), dt("2024-01-15T08:00:00"));
        assert_eq!(dt("2024-01-15"), dt("2024-01-15 00:00:00"));
        assert!(parse_date("15/01/2024").is_err());
    }

    #[test]
    fn test_duration_days_fractional() {
        assert!((duration_days(Duration::hours(36)) - 1.5).abs() < 1e-12);
        assert!((duration_days(dt("2024-03-15") - dt("2024-01-15")) - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_serde_as_string() {
        let m = MonthBucket::from_ym(2024, 3).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: MonthBucket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
