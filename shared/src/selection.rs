use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::dates::format_iso_date;

/// Dates the owner has ticked in the availability manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    dates: BTreeSet<NaiveDate>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            dates: BTreeSet::from([date]),
        }
    }

    /// Flip a date in or out of the selection; returns whether it is now selected
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.dates.remove(&date) {
            false
        } else {
            self.dates.insert(date);
            true
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Selected dates in ascending ISO form, as the server expects them
    pub fn iso_dates(&self) -> Vec<String> {
        self.dates.iter().copied().map(format_iso_date).collect()
    }
}
