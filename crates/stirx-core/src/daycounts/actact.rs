//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA.
///
/// Days falling in leap years count 1/366, the rest 1/365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    fn forward_fraction(start: Date, end: Date) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            let Ok(next_year) = Date::from_ymd(current.year() + 1, 1, 1) else {
                break;
            };
            total += Decimal::from(current.days_between(&next_year))
                / Decimal::from(current.days_in_year());
            current = next_year;
        }

        total + Decimal::from(current.days_between(&end)) / Decimal::from(current.days_in_year())
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start <= end {
            Self::forward_fraction(start, end)
        } else {
            -Self::forward_fraction(end, start)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_actact_isda_within_one_year() {
        let yf = ActActIsda.year_fraction(date(2020, 6, 17), date(2020, 9, 16));
        assert_eq!(yf, dec!(91) / dec!(366));
    }

    #[test]
    fn test_actact_isda_across_year_end() {
        // 2020-12-16 to 2021-03-17: 16 days in 2020, 75 days in 2021
        let yf = ActActIsda.year_fraction(date(2020, 12, 16), date(2021, 3, 17));
        assert_eq!(yf, dec!(16) / dec!(366) + dec!(75) / dec!(365));
    }

    #[test]
    fn test_actact_isda_antisymmetric() {
        let a = date(2019, 12, 18);
        let b = date(2020, 3, 18);
        assert_eq!(ActActIsda.year_fraction(b, a), -ActActIsda.year_fraction(a, b));
    }
}
