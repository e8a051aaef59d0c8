//! 30/360 day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.day() == date.days_in_month()
}

fn thirty360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    360 * years + 30 * months + (d2 - d1)
}

/// 30/360 US (bond basis), with the February month-end rules.
///
/// 1. D1 on the last day of February becomes 30
/// 2. D1 = 31 becomes 30
/// 3. D2 on the last day of February becomes 30 if rule 1 applied
/// 4. D2 = 31 becomes 30 if D1 is now 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let start_feb_eom = is_last_day_of_february(start);
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if start_feb_eom || d1 == 31 {
            d1 = 30;
        }
        if (start_feb_eom && is_last_day_of_february(end)) || (d2 == 31 && d1 == 30) {
            d2 = 30;
        }

        thirty360_days(start, end, d1, d2)
    }
}

/// 30E/360 (Eurobond basis): any 31st becomes the 30th.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        thirty360_days(start, end, d1, d2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_thirty360_us_imm_quarter() {
        assert_eq!(Thirty360US.day_count(date(2020, 6, 17), date(2020, 9, 16)), 89);
    }

    #[test]
    fn test_thirty360_us_feb_month_end() {
        // Feb 29 -> Mar 31: D1 = 30, D2 = 30
        assert_eq!(Thirty360US.day_count(date(2020, 2, 29), date(2020, 3, 31)), 30);
        // Feb 28 (non-leap EOM) -> Feb 29 next leap year
        assert_eq!(Thirty360US.day_count(date(2019, 2, 28), date(2020, 2, 29)), 360);
    }

    #[test]
    fn test_thirty360_us_31st_end_only_when_start_30() {
        assert_eq!(Thirty360US.day_count(date(2020, 1, 15), date(2020, 3, 31)), 76);
        assert_eq!(Thirty360US.day_count(date(2020, 1, 30), date(2020, 3, 31)), 60);
    }

    #[test]
    fn test_thirty360_e_caps_both_ends() {
        assert_eq!(Thirty360E.day_count(date(2020, 1, 15), date(2020, 3, 31)), 75);
        assert_eq!(Thirty360E.day_count(date(2020, 2, 29), date(2020, 3, 31)), 31);
    }
}
