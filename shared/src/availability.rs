use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::dates::{format_iso_date, parse_iso_date};
use crate::AvailabilityResponse;

/// Days an item cannot be rented, as last reported by the server.
///
/// The set is read-only for the lifetime of a page; a block or unblock
/// replaces it wholesale once the server has answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedDates {
    dates: BTreeSet<NaiveDate>,
}

impl BlockedDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from wire strings, skipping any that do not parse
    pub fn from_iso_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dates = BTreeSet::new();
        for value in values {
            match parse_iso_date(value.as_ref()) {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(e) => tracing::warn!("Skipping blocked date from server: {}", e),
            }
        }
        Self { dates }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn to_iso_strings(&self) -> Vec<String> {
        self.iter().map(format_iso_date).collect()
    }

    /// First blocked day in `[start, end]`, walking day by day.
    ///
    /// An inverted range contains no days.
    pub fn first_blocked_in(&self, start: NaiveDate, end: NaiveDate) -> Option<NaiveDate> {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .find(|day| self.contains(*day))
    }
}

impl FromIterator<NaiveDate> for BlockedDates {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl From<AvailabilityResponse> for BlockedDates {
    fn from(response: AvailabilityResponse) -> Self {
        Self::from_iso_strings(response.blocked_dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_iso_strings_skips_garbage() {
        let blocked = BlockedDates::from_iso_strings(["2024-03-05", "not-a-date", "2024-03-01", "2024-03-05"]);
        assert_eq!(blocked.len(), 2);
        assert!(blocked.contains(date(2024, 3, 1)));
        assert!(blocked.contains(date(2024, 3, 5)));
        assert_eq!(blocked.to_iso_strings(), vec!["2024-03-01", "2024-03-05"]);
    }

    #[test]
    fn test_from_response_payload() {
        let response: AvailabilityResponse =
            serde_json::from_str(r#"{"blocked_dates": ["2024-01-15", "2024-01-16"]}"#).unwrap();
        let blocked = BlockedDates::from(response);
        assert!(blocked.contains(date(2024, 1, 15)));
        assert!(!blocked.contains(date(2024, 1, 17)));
    }

    #[test]
    fn test_missing_field_means_nothing_blocked() {
        let response: AvailabilityResponse = serde_json::from_str("{}").unwrap();
        assert!(BlockedDates::from(response).is_empty());
    }

    #[test]
    fn test_first_blocked_in_is_inclusive() {
        let blocked: BlockedDates = [date(2024, 3, 5), date(2024, 3, 9)].into_iter().collect();

        assert_eq!(blocked.first_blocked_in(date(2024, 3, 1), date(2024, 3, 4)), None);
        assert_eq!(blocked.first_blocked_in(date(2024, 3, 1), date(2024, 3, 5)), Some(date(2024, 3, 5)));
        assert_eq!(blocked.first_blocked_in(date(2024, 3, 5), date(2024, 3, 5)), Some(date(2024, 3, 5)));
        assert_eq!(blocked.first_blocked_in(date(2024, 3, 6), date(2024, 3, 31)), Some(date(2024, 3, 9)));
        assert_eq!(blocked.first_blocked_in(date(2024, 3, 10), date(2024, 3, 1)), None);
    }
}
