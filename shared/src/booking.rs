//! Rental date-range selection, validation and quoting.
//!
//! The booking form holds one [`RangeSelection`] that moves through
//! `Idle -> StartSelected -> RangeSelected` as the renter picks dates. Every
//! complete selection is validated against the item's [`BlockedDates`] and
//! priced as a [`RentalQuote`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::availability::BlockedDates;
use crate::dates::DayCountPolicy;

/// A validated, blocked-free rental period with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Please select both a start and an end date.")]
    MissingDates,
    #[error("End date must be after start date.")]
    EndBeforeStart,
    #[error("Your selected dates include an unavailable day ({date}). Please choose different dates.")]
    RangeIncludesBlocked { date: NaiveDate },
}

/// Check a candidate range against ordering and the blocked set
pub fn validate_dates(
    start: NaiveDate,
    end: NaiveDate,
    blocked: &BlockedDates,
) -> Result<DateRange, DateRangeError> {
    if end < start {
        return Err(DateRangeError::EndBeforeStart);
    }
    if let Some(date) = blocked.first_blocked_in(start, end) {
        return Err(DateRangeError::RangeIncludesBlocked { date });
    }
    Ok(DateRange { start, end })
}

/// Whether a day can be picked in a date picker.
///
/// Past days and blocked days are never selectable; `min` additionally
/// bounds the end picker by the chosen start.
pub fn is_selectable(
    date: NaiveDate,
    today: NaiveDate,
    blocked: &BlockedDates,
    min: Option<NaiveDate>,
) -> bool {
    date >= today && !blocked.contains(date) && min.map_or(true, |min| date >= min)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSelection {
    #[default]
    Idle,
    StartSelected { start: NaiveDate },
    RangeSelected { start: NaiveDate, end: NaiveDate },
}

impl RangeSelection {
    /// Choose a start date. A previously chosen end that now precedes the
    /// start is dropped.
    pub fn select_start(self, start: NaiveDate) -> Self {
        match self {
            RangeSelection::RangeSelected { end, .. } if end >= start => {
                RangeSelection::RangeSelected { start, end }
            }
            _ => RangeSelection::StartSelected { start },
        }
    }

    /// Choose an end date. Ignored until a start exists.
    pub fn select_end(self, end: NaiveDate) -> Self {
        match self.start() {
            Some(start) => RangeSelection::RangeSelected { start, end },
            None => self,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            RangeSelection::Idle => None,
            RangeSelection::StartSelected { start } | RangeSelection::RangeSelected { start, .. } => {
                Some(start)
            }
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            RangeSelection::RangeSelected { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Earliest day the end picker may offer
    pub fn end_min_bound(&self) -> Option<NaiveDate> {
        self.start()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, RangeSelection::RangeSelected { .. })
    }

    pub fn validate(&self, blocked: &BlockedDates) -> Result<DateRange, DateRangeError> {
        match *self {
            RangeSelection::RangeSelected { start, end } => validate_dates(start, end, blocked),
            _ => Err(DateRangeError::MissingDates),
        }
    }
}

/// Price of a proposed rental. Derived on every change, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalQuote {
    pub days: u32,
    pub total: f64,
}

impl RentalQuote {
    /// Quote counting both endpoints, the convention the booking form uses
    pub fn new(start: NaiveDate, end: NaiveDate, daily_rate: f64) -> Self {
        Self::with_policy(start, end, daily_rate, DayCountPolicy::Inclusive)
    }

    pub fn with_policy(start: NaiveDate, end: NaiveDate, daily_rate: f64, policy: DayCountPolicy) -> Self {
        let days = u32::try_from(policy.count(start, end).max(0)).unwrap_or(u32::MAX);
        Self {
            days,
            total: f64::from(days) * daily_rate,
        }
    }

    pub fn days_label(&self) -> String {
        format!("{} day{}", self.days, if self.days == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn blocked(dates: &[NaiveDate]) -> BlockedDates {
        dates.iter().copied().collect()
    }

    #[test]
    fn test_valid_ranges_pass() {
        let set = blocked(&[date(2024, 3, 10)]);
        let pairs = [
            (date(2024, 3, 1), date(2024, 3, 1)),
            (date(2024, 3, 1), date(2024, 3, 9)),
            (date(2024, 3, 11), date(2024, 4, 2)),
            (date(2023, 12, 30), date(2024, 1, 2)),
        ];
        for (start, end) in pairs {
            assert_eq!(validate_dates(start, end, &set), Ok(DateRange { start, end }));
        }
    }

    #[test]
    fn test_end_before_start() {
        let set = BlockedDates::new();
        assert_eq!(
            validate_dates(date(2024, 3, 5), date(2024, 3, 4), &set),
            Err(DateRangeError::EndBeforeStart)
        );
        // ordering is reported ahead of blocked days
        let set = blocked(&[date(2024, 3, 4)]);
        assert_eq!(
            validate_dates(date(2024, 3, 5), date(2024, 3, 4), &set),
            Err(DateRangeError::EndBeforeStart)
        );
    }

    #[test]
    fn test_range_including_blocked_day() {
        let set = blocked(&[date(2024, 3, 5)]);
        for (start, end) in [
            (date(2024, 3, 1), date(2024, 3, 10)),
            (date(2024, 3, 5), date(2024, 3, 5)),
            (date(2024, 3, 5), date(2024, 3, 6)),
            (date(2024, 3, 4), date(2024, 3, 5)),
        ] {
            assert_eq!(
                validate_dates(start, end, &set),
                Err(DateRangeError::RangeIncludesBlocked { date: date(2024, 3, 5) })
            );
        }
    }

    #[test]
    fn test_quote_for_three_days() {
        let quote = RentalQuote::new(date(2024, 3, 1), date(2024, 3, 3), 100.0);
        assert_eq!(quote.days, 3);
        assert_eq!(quote.total, 300.0);
        assert_eq!(quote.days_label(), "3 days");
    }

    #[test]
    fn test_same_day_quote_is_one_day() {
        let quote = RentalQuote::new(date(2024, 1, 10), date(2024, 1, 10), 45.5);
        assert_eq!(quote.days, 1);
        assert_eq!(quote.total, 45.5);
        assert_eq!(quote.days_label(), "1 day");
    }

    #[test]
    fn test_inverted_quote_clamps_to_zero() {
        let quote = RentalQuote::new(date(2024, 1, 10), date(2024, 1, 1), 100.0);
        assert_eq!(quote.days, 0);
        assert_eq!(quote.total, 0.0);
        assert_eq!(quote.days_label(), "0 days");
    }

    #[test]
    fn test_exclusive_quote_policy() {
        let quote = RentalQuote::with_policy(date(2024, 3, 1), date(2024, 3, 3), 100.0, DayCountPolicy::Exclusive);
        assert_eq!(quote.days, 2);
        assert_eq!(quote.total, 200.0);
    }

    #[test]
    fn test_selection_walks_through_states() {
        let idle = RangeSelection::default();
        assert_eq!(idle.start(), None);
        assert_eq!(idle.end_min_bound(), None);

        let started = idle.select_start(date(2024, 3, 1));
        assert_eq!(started, RangeSelection::StartSelected { start: date(2024, 3, 1) });
        assert_eq!(started.end_min_bound(), Some(date(2024, 3, 1)));
        assert!(!started.is_complete());

        let ranged = started.select_end(date(2024, 3, 3));
        assert_eq!(
            ranged,
            RangeSelection::RangeSelected { start: date(2024, 3, 1), end: date(2024, 3, 3) }
        );
        assert!(ranged.is_complete());
    }

    #[test]
    fn test_end_ignored_without_start() {
        let idle = RangeSelection::Idle;
        assert_eq!(idle.select_end(date(2024, 3, 3)), RangeSelection::Idle);
    }

    #[test]
    fn test_moving_start_past_end_clears_end() {
        let ranged = RangeSelection::RangeSelected { start: date(2024, 3, 1), end: date(2024, 3, 3) };

        let kept = ranged.select_start(date(2024, 3, 2));
        assert_eq!(kept.end(), Some(date(2024, 3, 3)));

        let cleared = ranged.select_start(date(2024, 3, 4));
        assert_eq!(cleared, RangeSelection::StartSelected { start: date(2024, 3, 4) });
        assert_eq!(cleared.end(), None);
    }

    #[test]
    fn test_selection_validate() {
        let set = blocked(&[date(2024, 3, 2)]);
        assert_eq!(RangeSelection::Idle.validate(&set), Err(DateRangeError::MissingDates));
        assert_eq!(
            RangeSelection::StartSelected { start: date(2024, 3, 1) }.validate(&set),
            Err(DateRangeError::MissingDates)
        );
        assert_eq!(
            RangeSelection::RangeSelected { start: date(2024, 3, 1), end: date(2024, 3, 3) }.validate(&set),
            Err(DateRangeError::RangeIncludesBlocked { date: date(2024, 3, 2) })
        );
    }

    #[test]
    fn test_is_selectable() {
        let today = date(2024, 1, 10);
        let set = blocked(&[date(2024, 1, 15)]);

        assert!(is_selectable(today, today, &set, None));
        assert!(!is_selectable(date(2024, 1, 9), today, &set, None));
        assert!(!is_selectable(date(2024, 1, 15), today, &set, None));
        assert!(is_selectable(date(2024, 1, 20), today, &set, None));
        assert!(!is_selectable(date(2024, 1, 11), today, &set, Some(date(2024, 1, 12))));
        assert!(is_selectable(date(2024, 1, 12), today, &set, Some(date(2024, 1, 12))));
    }
}
