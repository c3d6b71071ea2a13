//! Simulation calendar.
//!
//! The planner runs one step per calendar day, January 1 through December 31
//! of a single year.  Days are plain [`NaiveDate`]s; there is no time-of-day
//! component anywhere in the model.

use chrono::{Datelike, NaiveDate};

use crate::{CoreError, CoreResult};

/// First and last month (inclusive) of the monsoon season.
pub const MONSOON_MONTHS: std::ops::RangeInclusive<u32> = 6..=9;

/// `true` for dates in June through September.
#[inline]
pub fn is_monsoon(date: NaiveDate) -> bool {
    MONSOON_MONTHS.contains(&date.month())
}

/// One calendar year of simulation days.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimYear {
    year:  i32,
    first: NaiveDate,
    last:  NaiveDate,
}

impl SimYear {
    /// Build the calendar for `year`.
    ///
    /// # Errors
    /// [`CoreError::Config`] if the year is outside chrono's supported range.
    pub fn new(year: i32) -> CoreResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        match (first, last) {
            (Some(first), Some(last)) => Ok(Self { year, first, last }),
            _ => Err(CoreError::Config(format!("simulation year {year} is out of range"))),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Number of days in the year (365 or 366).
    pub fn len(&self) -> usize {
        (self.last - self.first).num_days() as usize + 1
    }

    /// Always `false`; a calendar year is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    /// Zero-based day-of-year index, or `None` outside the year.
    #[inline]
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        self.contains(date)
            .then(|| (date - self.first).num_days() as usize)
    }

    /// Every day of the year in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }
}
