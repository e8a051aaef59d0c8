//! Actual/365 day count conventions: Fixed and Leap.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::{is_leap_year, Date};

/// Actual/365 Fixed: actual days over a 365-day year, leap years ignored.
///
/// Default basis for measuring time to expiry in the convexity adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Leap: the basis is 366 when Feb 29 falls in `(start, end]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Leap;

impl Act365Leap {
    fn contains_feb_29(start: Date, end: Date) -> bool {
        if start >= end {
            return false;
        }
        (start.year()..=end.year())
            .filter(|&year| is_leap_year(year))
            .filter_map(|year| Date::from_ymd(year, 2, 29).ok())
            .any(|feb_29| feb_29 > start && feb_29 <= end)
    }
}

impl DayCount for Act365Leap {
    fn name(&self) -> &'static str {
        "ACT/365L"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let basis = if Self::contains_feb_29(start, end) {
            366
        } else {
            365
        };
        Decimal::from(self.day_count(start, end)) / Decimal::from(basis)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
