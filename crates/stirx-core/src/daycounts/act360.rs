//! Actual/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360: actual days over a 360-day year.
///
/// The accrual basis of USD and EUR money-market rates, and therefore of the
/// FRAs derived from short-term interest-rate futures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_act360_futures_quarter() {
        // Dec 2020 IMM to Mar 2021 IMM
        let start = Date::from_ymd(2020, 12, 16).unwrap();
        let end = Date::from_ymd(2021, 3, 17).unwrap();

        assert_eq!(Act360.day_count(start, end), 91);
        assert_eq!(Act360.year_fraction(start, end), dec!(91) / dec!(360));
    }

    #[test]
    fn test_act360_full_year_exceeds_one() {
        let start = Date::from_ymd(2020, 1, 1).unwrap();
        let end = Date::from_ymd(2021, 1, 1).unwrap();

        assert_eq!(Act360.day_count(start, end), 366);
        assert!(Act360.year_fraction(start, end) > Decimal::ONE);
    }

    #[test]
    fn test_act360_reversed_is_negative() {
        let start = Date::from_ymd(2020, 6, 17).unwrap();
        let end = Date::from_ymd(2020, 6, 3).unwrap();

        assert_eq!(Act360.day_count(start, end), -14);
        assert_eq!(Act360.year_fraction(start, end), dec!(-14) / dec!(360));
    }
}
