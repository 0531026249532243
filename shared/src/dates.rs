//! Calendar arithmetic shared by the booking form, the preview and the
//! owner's availability manager.
//!
//! Dates travel over the wire as ISO `YYYY-MM-DD` strings and are held in
//! memory as [`chrono::NaiveDate`]. Nothing here knows about time zones: "today"
//! is always supplied by the caller.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for every date exchanged with the server
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{input}', expected YYYY-MM-DD")]
pub struct DateParseError {
    pub input: String,
}

/// Parse a `YYYY-MM-DD` string, tolerating surrounding whitespace
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT).map_err(|_| DateParseError {
        input: input.to_string(),
    })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid",
    }
}

/// Format a date for display (e.g., "March 5, 2024")
pub fn format_date_for_display(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// Days in `month` of `year`, or 0 when chrono cannot represent that month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    // The last month chrono can represent has no following 1st
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

/// Whole days from `start` to `end`; negative when `end` precedes `start`.
///
/// Dates carry no time component, so the ceiling of the fractional day
/// difference is always the plain difference.
pub fn exclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Day count that includes both endpoints. A same-day range is one day.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    exclusive_days(start, end) + 1
}

/// The two day-count conventions found on the site.
///
/// Quoting counts both endpoints; the generic day-diff helper does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCountPolicy {
    #[default]
    Inclusive,
    Exclusive,
}

impl DayCountPolicy {
    pub fn count(self, start: NaiveDate, end: NaiveDate) -> i64 {
        match self {
            DayCountPolicy::Inclusive => inclusive_days(start, end),
            DayCountPolicy::Exclusive => exclusive_days(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_iso_date(" 2024-03-05\n").unwrap(), date(2024, 3, 5));

        let err = parse_iso_date("2024-02-30").unwrap_err();
        assert_eq!(err.input, "2024-02-30");
        assert!(parse_iso_date("03/05/2024").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_iso_date(date(2024, 1, 9)), "2024-01-09");
    }

    #[test]
    fn test_format_date_for_display() {
        assert_eq!(format_date_for_display(date(2024, 3, 5)), "March 5, 2024");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_days_in_unrepresentable_month() {
        use chrono::Datelike;
        assert_eq!(days_in_month(2024, 13), 0);
        assert_eq!(days_in_month(999_999, 1), 0);
        assert_eq!(days_in_month(NaiveDate::MAX.year(), 12), 31);
    }

    #[test]
    fn test_same_day_counts() {
        let day = date(2024, 1, 10);
        assert_eq!(inclusive_days(day, day), 1);
        assert_eq!(exclusive_days(day, day), 0);
    }

    #[test]
    fn test_swapped_endpoints_flip_sign_but_inclusive_still_adds_one() {
        let a = date(2024, 1, 10);
        let b = date(2024, 1, 13);
        assert_eq!(exclusive_days(a, b), 3);
        assert_eq!(exclusive_days(b, a), -3);
        assert_eq!(inclusive_days(a, b), 4);
        assert_eq!(inclusive_days(b, a), -2);
    }

    #[test]
    fn test_day_count_policy() {
        let start = date(2024, 2, 28);
        let end = date(2024, 3, 1);
        assert_eq!(DayCountPolicy::Inclusive.count(start, end), 3);
        assert_eq!(DayCountPolicy::Exclusive.count(start, end), 2);
        assert_eq!(DayCountPolicy::default(), DayCountPolicy::Inclusive);
    }
}
