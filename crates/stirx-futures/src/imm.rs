//! IMM date locator.
//!
//! IMM dates are the third Wednesday of March, June, September and December,
//! the standard settlement dates for short-term interest-rate futures.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use stirx_core::{Date, StirError, StirResult};

/// A month of the quarterly IMM cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImmMonth {
    /// March (exchange code H).
    March,
    /// June (exchange code M).
    June,
    /// September (exchange code U).
    September,
    /// December (exchange code Z).
    December,
}

impl ImmMonth {
    /// The cycle in calendar order.
    pub const ALL: [ImmMonth; 4] = [
        ImmMonth::March,
        ImmMonth::June,
        ImmMonth::September,
        ImmMonth::December,
    ];

    /// Calendar month number (3, 6, 9 or 12).
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            ImmMonth::March => 3,
            ImmMonth::June => 6,
            ImmMonth::September => 9,
            ImmMonth::December => 12,
        }
    }

    /// The following month of the cycle; December wraps to March.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            ImmMonth::March => ImmMonth::June,
            ImmMonth::June => ImmMonth::September,
            ImmMonth::September => ImmMonth::December,
            ImmMonth::December => ImmMonth::March,
        }
    }

    /// Futures month code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            ImmMonth::March => 'H',
            ImmMonth::June => 'M',
            ImmMonth::September => 'U',
            ImmMonth::December => 'Z',
        }
    }

    /// The IMM month that closes the quarter containing calendar `month`.
    ///
    /// `month` is clamped into 1-12.
    #[must_use]
    pub const fn quarter_of(month: u32) -> Self {
        match month {
            0..=3 => ImmMonth::March,
            4..=6 => ImmMonth::June,
            7..=9 => ImmMonth::September,
            _ => ImmMonth::December,
        }
    }
}

impl TryFrom<u32> for ImmMonth {
    type Error = StirError;

    fn try_from(month: u32) -> Result<Self, Self::Error> {
        match month {
            3 => Ok(ImmMonth::March),
            6 => Ok(ImmMonth::June),
            9 => Ok(ImmMonth::September),
            12 => Ok(ImmMonth::December),
            _ => Err(StirError::invalid_argument(format!(
                "IMM month must be one of 3, 6, 9, 12, got {month}"
            ))),
        }
    }
}

impl fmt::Display for ImmMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImmMonth::March => "Mar",
            ImmMonth::June => "Jun",
            ImmMonth::September => "Sep",
            ImmMonth::December => "Dec",
        };
        write!(f, "{name}")
    }
}

/// Whether a reference date that is itself an IMM date counts as "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImmBoundary {
    /// The reference date is returned when it is the IMM date.
    #[default]
    Inclusive,
    /// A contract settling on the reference date has expired; the next one
    /// is returned.
    Exclusive,
}

impl ImmBoundary {
    fn has_passed(self, candidate: Date, reference: Date) -> bool {
        match self {
            ImmBoundary::Inclusive => candidate < reference,
            ImmBoundary::Exclusive => candidate <= reference,
        }
    }
}

/// The third Wednesday of `month` in `year`.
///
/// Scans forward from the 1st and stops at the third Wednesday, which always
/// falls on day 15-21.
pub fn third_wednesday(year: i32, month: u32) -> StirResult<Date> {
    let mut day = Date::from_ymd(year, month, 1)?;
    let mut wednesdays = 0;

    loop {
        if day.weekday() == Weekday::Wed {
            wednesdays += 1;
            if wednesdays == 3 {
                return Ok(day);
            }
        }
        day = day.add_days(1)?;
    }
}

fn third_wednesday_in_year_after(year: i32, month: ImmMonth) -> StirResult<Date> {
    let next_year = year
        .checked_add(1)
        .ok_or_else(|| StirError::date_arithmetic(format!("no year after {year}")))?;
    third_wednesday(next_year, month.number())
        .map_err(|_| StirError::date_arithmetic(format!("{month} {next_year} is out of range")))
}

/// Next IMM date in `month` on or after `reference`.
///
/// Looks at `month` in the reference year first and moves to the following
/// year when that date has already passed under `boundary`.
///
/// # Example
///
/// ```rust
/// use stirx_core::Date;
/// use stirx_futures::imm::{next_imm_date, ImmBoundary, ImmMonth};
///
/// let reference = Date::from_ymd(2020, 5, 5).unwrap();
/// let june = next_imm_date(reference, ImmMonth::June, ImmBoundary::Inclusive).unwrap();
/// assert_eq!(june, Date::from_ymd(2020, 6, 17).unwrap());
/// ```
pub fn next_imm_date(reference: Date, month: ImmMonth, boundary: ImmBoundary) -> StirResult<Date> {
    let candidate = third_wednesday(reference.year(), month.number())?;
    if boundary.has_passed(candidate, reference) {
        third_wednesday_in_year_after(reference.year(), month)
    } else {
        Ok(candidate)
    }
}

/// Nearest IMM date across the whole quarterly cycle.
pub fn next_quarterly_imm_date(reference: Date, boundary: ImmBoundary) -> StirResult<Date> {
    let month = ImmMonth::quarter_of(reference.month());
    let candidate = third_wednesday(reference.year(), month.number())?;
    if !boundary.has_passed(candidate, reference) {
        return Ok(candidate);
    }

    let following = month.next();
    if following == ImmMonth::March {
        third_wednesday_in_year_after(reference.year(), following)
    } else {
        third_wednesday(reference.year(), following.number())
    }
}

/// Returns true if `date` is the third Wednesday of an IMM month.
#[must_use]
pub fn is_imm_date(date: Date) -> bool {
    ImmMonth::try_from(date.month()).is_ok()
        && date.weekday() == Weekday::Wed
        && (15..=21).contains(&date.day())
}

/// Exchange code for an IMM date, e.g. `"M0"` for June 2020.
///
/// Returns `None` for dates that are not IMM dates.
#[must_use]
pub fn imm_code(date: Date) -> Option<String> {
    if !is_imm_date(date) {
        return None;
    }
    let month = ImmMonth::try_from(date.month()).ok()?;
    Some(format!("{}{}", month.code(), date.year().rem_euclid(10)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_third_wednesday() {
        // June 2020 starts on a Monday
        assert_eq!(third_wednesday(2020, 6).unwrap(), date(2020, 6, 17));
        // September 2020 starts on a Tuesday
        assert_eq!(third_wednesday(2020, 9).unwrap(), date(2020, 9, 16));
        // July 2020 starts on a Wednesday: 1, 8, 15
        assert_eq!(third_wednesday(2020, 7).unwrap(), date(2020, 7, 15));
        // March 2021 starts on a Monday
        assert_eq!(third_wednesday(2021, 3).unwrap(), date(2021, 3, 17));
        // December 2021 starts on a Wednesday
        assert_eq!(third_wednesday(2021, 12).unwrap(), date(2021, 12, 15));
    }

    #[test]
    fn test_third_wednesday_never_fourth() {
        // October 2025 starts on a Wednesday: the third is the 15th, not the 22nd
        assert_eq!(third_wednesday(2025, 10).unwrap(), date(2025, 10, 15));
        // March 2023 starts on a Wednesday too
        assert_eq!(third_wednesday(2023, 3).unwrap(), date(2023, 3, 15));
    }

    #[test]
    fn test_next_imm_date_same_year() {
        let reference = date(2020, 5, 5);
        assert_eq!(
            next_imm_date(reference, ImmMonth::June, ImmBoundary::Inclusive).unwrap(),
            date(2020, 6, 17)
        );
        assert_eq!(
            next_imm_date(reference, ImmMonth::December, ImmBoundary::Inclusive).unwrap(),
            date(2020, 12, 16)
        );
    }

    #[test]
    fn test_next_imm_date_rolls_to_next_year() {
        let reference = date(2020, 5, 5);
        assert_eq!(
            next_imm_date(reference, ImmMonth::March, ImmBoundary::Inclusive).unwrap(),
            date(2021, 3, 17)
        );
    }

    #[test]
    fn test_boundary_policy_on_imm_date() {
        let imm = date(2020, 6, 17);
        assert_eq!(
            next_imm_date(imm, ImmMonth::June, ImmBoundary::Inclusive).unwrap(),
            imm
        );
        assert_eq!(
            next_imm_date(imm, ImmMonth::June, ImmBoundary::Exclusive).unwrap(),
            date(2021, 6, 16)
        );
        assert_eq!(
            next_quarterly_imm_date(imm, ImmBoundary::Inclusive).unwrap(),
            imm
        );
        assert_eq!(
            next_quarterly_imm_date(imm, ImmBoundary::Exclusive).unwrap(),
            date(2020, 9, 16)
        );
    }

    #[test]
    fn test_next_quarterly_after_imm_in_same_month() {
        // Past the June IMM date but still in June
        assert_eq!(
            next_quarterly_imm_date(date(2020, 6, 18), ImmBoundary::Inclusive).unwrap(),
            date(2020, 9, 16)
        );
        // Past the December IMM date wraps into March of next year
        assert_eq!(
            next_quarterly_imm_date(date(2020, 12, 20), ImmBoundary::Inclusive).unwrap(),
            date(2021, 3, 17)
        );
    }

    #[test]
    fn test_imm_month_conversions() {
        assert_eq!(ImmMonth::try_from(9).unwrap(), ImmMonth::September);
        let err = ImmMonth::try_from(5).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(ImmMonth::December.next(), ImmMonth::March);
        assert_eq!(ImmMonth::quarter_of(11), ImmMonth::December);
        assert_eq!(ImmMonth::quarter_of(1), ImmMonth::March);
    }

    #[test]
    fn test_is_imm_date_and_code() {
        assert!(is_imm_date(date(2020, 6, 17)));
        assert!(!is_imm_date(date(2020, 6, 24)));
        assert!(!is_imm_date(date(2020, 7, 15)));
        assert_eq!(imm_code(date(2020, 6, 17)), Some("M0".to_string()));
        assert_eq!(imm_code(date(2021, 3, 17)), Some("H1".to_string()));
        assert_eq!(imm_code(date(2020, 6, 18)), None);
    }

    #[test]
    fn test_results_are_wednesdays() {
        let mut reference = date(2019, 1, 1);
        for _ in 0..400 {
            let imm = next_quarterly_imm_date(reference, ImmBoundary::Inclusive).unwrap();
            assert!(is_imm_date(imm), "{imm} from {reference}");
            assert!(imm >= reference);
            reference = reference.add_days(3).unwrap();
        }
    }
}
