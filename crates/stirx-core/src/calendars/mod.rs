//! Business day calendars.
//!
//! Calendars are plain read-only values handed to whoever needs them (the
//! futures generator uses one to roll back from delivery to the last trading
//! day). There is no process-wide calendar registry.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::StirResult;
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Moves a date by a number of business days.
    ///
    /// Positive values move forward, negative values move backward; zero
    /// returns the date unchanged even if it is a holiday.
    fn add_business_days(&self, date: Date, days: i32) -> StirResult<Date> {
        let step = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        let mut result = date;

        while remaining > 0 {
            result = result.add_days(step)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Ok(result)
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> StirResult<Date> {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1)?;
        }
        Ok(result)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekends plus an explicit list of holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a set of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Number of listed holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// True if no holidays are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
