//! Month grid model behind the availability preview and the date pickers.

use chrono::{Datelike, NaiveDate};

use crate::availability::BlockedDates;
use crate::dates::{days_in_month, month_name};

/// A calendar month chrono can represent, with `month` in `1..=12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month named by the `month`/`year` query parameters, falling back to
    /// the month containing `today` for anything missing or malformed.
    pub fn from_query(month: Option<&str>, year: Option<&str>, today: NaiveDate) -> Self {
        let fallback = Self::containing(today);
        let month = month.and_then(|m| m.trim().parse::<u32>().ok());
        let year = year.and_then(|y| y.trim().parse::<i32>().ok());
        match (month, year) {
            (Some(month), Some(year)) => Self::new(year, month).unwrap_or(fallback),
            (Some(month), None) => Self::new(fallback.year, month).unwrap_or(fallback),
            (None, Some(year)) => Self::new(year, fallback.month).unwrap_or(fallback),
            (None, None) => fallback,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before, or `self` at the earliest representable month
    pub fn previous(self) -> Self {
        let target = if self.month == 1 {
            self.year.checked_sub(1).map(|year| (year, 12))
        } else {
            Some((self.year, self.month - 1))
        };
        target.and_then(|(year, month)| Self::new(year, month)).unwrap_or(self)
    }

    /// The month after, or `self` at the latest representable month
    pub fn next(self) -> Self {
        let target = if self.month == 12 {
            self.year.checked_add(1).map(|year| (year, 1))
        } else {
            Some((self.year, self.month + 1))
        };
        target.and_then(|(year, month)| Self::new(year, month)).unwrap_or(self)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Weekday of the 1st (0 = Sunday, 1 = Monday, etc.)
    pub fn first_weekday(&self) -> u32 {
        self.day(1)
            .map(|first| first.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Header text, e.g. "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// Availability class of a single day cell; exactly one applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Today,
    Unavailable,
    Available,
}

impl DayStatus {
    pub fn classify(date: NaiveDate, today: NaiveDate, blocked: &BlockedDates) -> Self {
        if date == today {
            DayStatus::Today
        } else if date < today || blocked.contains(date) {
            DayStatus::Unavailable
        } else {
            DayStatus::Available
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DayStatus::Today => "today",
            DayStatus::Unavailable => "unavailable",
            DayStatus::Available => "available",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the 1st so weeks start on Sunday
    Blank,
    Day { date: NaiveDate, status: DayStatus },
}

impl CalendarCell {
    pub fn css_class(&self) -> String {
        match self {
            CalendarCell::Blank => "calendar-day empty".to_string(),
            CalendarCell::Day { status, .. } => format!("calendar-day {}", status.css_class()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Cell for a day of the month, if it exists
    pub fn day(&self, day: u32) -> Option<&CalendarCell> {
        let leading = self.cursor.first_weekday() as usize;
        let index = leading + usize::try_from(day).ok()?.checked_sub(1)?;
        self.cells.get(index).filter(|cell| matches!(cell, CalendarCell::Day { .. }))
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Lay out one month: blank cells up to the first weekday, then one
/// classified cell per day.
pub fn render_month(cursor: MonthCursor, blocked: &BlockedDates, today: NaiveDate) -> MonthGrid {
    let leading = cursor.first_weekday();
    let days = cursor.days_in_month();

    let mut cells = Vec::with_capacity((leading + days) as usize);
    cells.extend((0..leading).map(|_| CalendarCell::Blank));
    cells.extend((1..=days).filter_map(|day| cursor.day(day)).map(|date| CalendarCell::Day {
        date,
        status: DayStatus::classify(date, today, blocked),
    }));

    tracing::debug!(
        "Rendered {} with {} leading blanks and {} days",
        cursor.title(),
        leading,
        days
    );
    MonthGrid { cursor, cells }
}
