//! Date type for futures scheduling.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use super::{Tenor, TenorUnit};
use crate::error::{StirError, StirResult};

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate`. Every constructor validates its input, so
/// a `Date` is always a real Gregorian date, and every arithmetic operation is
/// checked against the representable range.
///
/// # Example
///
/// ```rust
/// use stirx_core::types::Date;
///
/// let date = Date::from_ymd(2020, 5, 5).unwrap();
/// let later = date.add_months(1).unwrap();
/// assert_eq!(later.to_string(), "2020-06-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

/// Serial day zero, matching the spreadsheet convention (1900-01-01 = 2).
const SERIAL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(date) => date,
    None => panic!("serial epoch is a valid date"),
};

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `StirError::InvalidArgument` for an out-of-range month or day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> StirResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| {
                StirError::invalid_argument(format!("{year}-{month:02}-{day:02} is not a valid date"))
            })
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> StirResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| StirError::invalid_argument(format!("cannot parse date '{s}', use YYYY-MM-DD")))
    }

    /// Creates a date from its serial day number.
    pub fn from_serial(serial: i64) -> StirResult<Self> {
        Date(SERIAL_EPOCH).add_days(serial)
    }

    /// Returns the serial day number (days since 1899-12-30).
    #[must_use]
    pub fn serial(&self) -> i64 {
        (self.0 - SERIAL_EPOCH).num_days()
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Returns the first day of the month.
    #[must_use]
    pub fn start_of_month(&self) -> Self {
        Date(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Adds a (possibly negative) number of calendar days.
    ///
    /// # Errors
    ///
    /// Returns `StirError::DateArithmetic` if the result leaves chrono's range.
    pub fn add_days(&self, days: i64) -> StirResult<Self> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| StirError::date_arithmetic(format!("{self} {days:+} days")))
    }

    /// Adds a (possibly negative) number of months.
    ///
    /// A day that does not exist in the target month is clamped to the last
    /// day of that month (Jan 31 + 1M = Feb 28).
    pub fn add_months(&self, months: i32) -> StirResult<Self> {
        let step = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(step)
        } else {
            self.0.checked_sub_months(step)
        };
        shifted
            .map(Date)
            .ok_or_else(|| StirError::date_arithmetic(format!("{self} {months:+} months")))
    }

    /// Adds a (possibly negative) number of years, clamping Feb 29.
    pub fn add_years(&self, years: i32) -> StirResult<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| StirError::date_arithmetic(format!("{self} {years:+} years")))?;
        self.add_months(months)
    }

    /// Advances the date by a tenor.
    pub fn add_tenor(&self, tenor: Tenor) -> StirResult<Self> {
        let count = i64::from(tenor.count());
        match tenor.unit() {
            TenorUnit::Day => self.add_days(count),
            TenorUnit::Week => self.add_days(count * 7),
            TenorUnit::Month => self.add_months(to_i32(count)?),
            TenorUnit::Year => self.add_years(to_i32(count)?),
        }
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

fn to_i32(count: i64) -> StirResult<i32> {
    i32::try_from(count).map_err(|_| StirError::date_arithmetic(format!("tenor count {count} too large")))
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = StirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Days in `month` of `year`; `month` must be 1-12.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2020, 5, 5).unwrap();
        assert_eq!(date.year(), 2020);
        assert_eq!(date.month(), 5);
        assert_eq!(date.day(), 5);
        assert_eq!(date.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_invalid_date() {
        let err = Date::from_ymd(2021, 2, 29).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(Date::from_ymd(2020, 13, 1).is_err());
        assert!(Date::from_ymd(2020, 4, 31).is_err());
        assert!(Date::from_ymd(2020, 2, 29).is_ok());
    }

    #[test]
    fn test_serial_round_trip_anchors() {
        // Spreadsheet anchors: 1900-01-01 = 2, 2020-05-05 = 43956
        assert_eq!(Date::from_ymd(1900, 1, 1).unwrap().serial(), 2);
        assert_eq!(Date::from_ymd(2020, 5, 5).unwrap().serial(), 43956);
        assert_eq!(
            Date::from_serial(43956).unwrap(),
            Date::from_ymd(2020, 5, 5).unwrap()
        );
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let date = Date::from_ymd(2021, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2021, 2, 28).unwrap());
        assert_eq!(date.add_months(-2).unwrap(), Date::from_ymd(2020, 11, 30).unwrap());

        let leap = Date::from_ymd(2020, 2, 29).unwrap();
        assert_eq!(leap.add_years(1).unwrap(), Date::from_ymd(2021, 2, 28).unwrap());
    }

    #[test]
    fn test_add_tenor() {
        let start = Date::from_ymd(2020, 6, 17).unwrap();
        assert_eq!(
            start.add_tenor(Tenor::months(3).unwrap()).unwrap(),
            Date::from_ymd(2020, 9, 17).unwrap()
        );
        assert_eq!(
            start.add_tenor(Tenor::weeks(2).unwrap()).unwrap(),
            Date::from_ymd(2020, 7, 1).unwrap()
        );
        assert_eq!(
            start.add_tenor(Tenor::years(1).unwrap()).unwrap(),
            Date::from_ymd(2021, 6, 17).unwrap()
        );
    }

    #[test]
    fn test_overflow_is_date_arithmetic_error() {
        let max = Date::from(NaiveDate::MAX);
        let err = max.add_days(1).unwrap_err();
        assert!(matches!(err, StirError::DateArithmetic { .. }));
        assert!(max.add_months(1).is_err());

        let min = Date::from(NaiveDate::MIN);
        assert!(min.add_days(-1).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(Date::from_ymd(2020, 2, 1).unwrap().days_in_month(), 29);
        assert_eq!(Date::from_ymd(2100, 2, 1).unwrap().days_in_month(), 28);
        assert_eq!(Date::from_ymd(2020, 9, 16).unwrap().days_in_month(), 30);
        assert_eq!(Date::from_ymd(2020, 12, 16).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2020-09-16".parse().unwrap();
        assert_eq!(date.to_string(), "2020-09-16");
        assert!(Date::parse("16/09/2020").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_sub_dates() {
        let d1 = Date::from_ymd(2020, 6, 17).unwrap();
        let d2 = Date::from_ymd(2020, 9, 16).unwrap();
        assert_eq!(d2 - d1, 91);
        assert_eq!(d1.days_between(&d2), 91);
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(2020, 6, 17).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2020-06-17\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
