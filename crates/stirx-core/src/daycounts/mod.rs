//! Day count conventions.
//!
//! A day count convention turns the interval between two dates into a
//! fraction of a year. Futures conversion uses two of them: one to measure
//! time to expiry for the convexity adjustment (ACT/365F by default) and one
//! to accrue the resulting FRA (ACT/360 for money-market rates).
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`Act365Leap`]: Actual/365 Leap - 366 basis when the period holds Feb 29
//! - [`ActActIsda`]: Actual/Actual ISDA - split by calendar year
//! - [`Thirty360US`]: 30/360 US (bond basis)
//! - [`Thirty360E`]: 30E/360 (Eurobond basis)
//!
//! # Usage
//!
//! ```rust
//! use stirx_core::daycounts::{DayCount, Act360};
//! use stirx_core::types::Date;
//!
//! let start = Date::from_ymd(2020, 6, 17).unwrap();
//! let end = Date::from_ymd(2020, 9, 16).unwrap();
//! assert_eq!(Act360.day_count(start, end), 91);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::{Act365Fixed, Act365Leap};
pub use actact::ActActIsda;
pub use thirty360::{Thirty360E, Thirty360US};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StirError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe so that a convention can be shared
/// across a parallel conversion batch.
pub trait DayCount: Send + Sync {
    /// Market name of the convention, e.g. "ACT/360".
    fn name(&self) -> &'static str;

    /// Year fraction from `start` to `end`. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count from `start` to `end` under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime selector for the supported conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/360.
    Act360,
    /// Actual/365 Fixed.
    Act365Fixed,
    /// Actual/365 Leap.
    Act365Leap,
    /// Actual/Actual ISDA.
    ActActIsda,
    /// 30/360 US.
    Thirty360US,
    /// 30E/360.
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Act365Leap => Box::new(Act365Leap),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::Thirty360US => Box::new(Thirty360US),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Year fraction under this convention without boxing.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
            DayCountConvention::Act365Leap => Act365Leap.year_fraction(start, end),
            DayCountConvention::ActActIsda => ActActIsda.year_fraction(start, end),
            DayCountConvention::Thirty360US => Thirty360US.year_fraction(start, end),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Act365Leap => "ACT/365L",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Act365Leap,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = StirError;

    /// Accepts market names ("ACT/360"), enum names ("Act360") and common
    /// aliases ("ACTUAL/365"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365FIXED" | "ACT365" => {
                Ok(DayCountConvention::Act365Fixed)
            }

            "ACT/365L" | "ACT/365 LEAP" | "ACT365LEAP" => Ok(DayCountConvention::Act365Leap),

            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTACTISDA" => {
                Ok(DayCountConvention::ActActIsda)
            }

            "30/360" | "30/360 US" | "30U/360" | "BOND" | "THIRTY360US" => {
                Ok(DayCountConvention::Thirty360US)
            }

            "30E/360" | "EUROBOND" | "THIRTY360E" => Ok(DayCountConvention::Thirty360E),

            _ => Err(StirError::invalid_argument(format!(
                "unknown day count convention '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = StirError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(convention: DayCountConvention) -> Self {
        convention.name().to_string()
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
    fn test_imm_quarter_under_each_convention() {
        // June 2020 IMM to September 2020 IMM: 91 actual days
        let start = date(2020, 6, 17);
        let end = date(2020, 9, 16);

        assert_eq!(
            DayCountConvention::Act360.year_fraction(start, end),
            dec!(91) / dec!(360)
        );
        assert_eq!(
            DayCountConvention::Act365Fixed.year_fraction(start, end),
            dec!(91) / dec!(365)
        );
        assert_eq!(
            DayCountConvention::Thirty360US.year_fraction(start, end),
            dec!(89) / dec!(360)
        );
    }

    #[test]
    fn test_enum_matches_boxed_impl() {
        let start = date(2019, 12, 18);
        let end = date(2021, 3, 17);
        for convention in DayCountConvention::all() {
            assert_eq!(
                convention.year_fraction(start, end),
                convention.to_day_count().year_fraction(start, end),
                "{convention}"
            );
            assert_eq!(convention.to_day_count().name(), convention.name());
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(
            "actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "ACT/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "bond".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360US
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let err = "ACT/364".parse::<DayCountConvention>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("unknown"));
    }

    #[test]
    fn test_name_round_trip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    #[test]
    fn test_serde_uses_market_name() {
        let json = serde_json::to_string(&DayCountConvention::Act365Fixed).unwrap();
        assert_eq!(json, "\"ACT/365F\"");
        let parsed: DayCountConvention = serde_json::from_str("\"ACT/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act360);
    }
}
