use chrono::{Datelike, Local, NaiveDate};

use crate::store::JournalStore;

/// One calendar month of the history view.
///
/// The view only ever shows the current local month; there is no navigation
/// to past or future months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    /// The current local month
    pub fn current() -> Self {
        let now = Local::now().date_naive();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        // Last day of this month is the day before the first of the next
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// The date of the given day-of-month (1-based)
    pub fn date_for_day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Canonical zero-padded `YYYY-MM-DD` string for the given day
    pub fn format_day(&self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, day)
    }

    /// Days of this month (1-based) that have at least one journal entry
    pub fn marked_days(&self, store: &JournalStore) -> Vec<u32> {
        (1..=self.days_in_month())
            .filter(|&day| {
                self.date_for_day(day)
                    .map(|date| store.has_any_on_date(date))
                    .unwrap_or(false)
            })
            .collect()
    }
}
