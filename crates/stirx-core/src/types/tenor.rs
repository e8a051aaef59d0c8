//! Tenor: a count of calendar units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{StirError, StirResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days.
    Day,
    /// Weeks of seven calendar days.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TenorUnit {
    /// Single-letter market abbreviation.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Week => 'W',
            TenorUnit::Month => 'M',
            TenorUnit::Year => 'Y',
        }
    }
}

/// A strictly positive duration such as 3M or 1Y.
///
/// Tenor strings are parsed once at the boundary (`"3M".parse::<Tenor>()`);
/// everything downstream works with this tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    count: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// The standard three-month futures tenor.
    pub const THREE_MONTHS: Self = Self {
        count: 3,
        unit: TenorUnit::Month,
    };

    /// Creates a tenor.
    ///
    /// # Errors
    ///
    /// Returns `StirError::InvalidArgument` if `count` is zero.
    pub fn new(count: u32, unit: TenorUnit) -> StirResult<Self> {
        if count == 0 {
            return Err(StirError::invalid_argument(format!(
                "tenor must be positive, got 0{}",
                unit.code()
            )));
        }
        Ok(Self { count, unit })
    }

    /// Tenor of `count` days.
    pub fn days(count: u32) -> StirResult<Self> {
        Self::new(count, TenorUnit::Day)
    }

    /// Tenor of `count` weeks.
    pub fn weeks(count: u32) -> StirResult<Self> {
        Self::new(count, TenorUnit::Week)
    }

    /// Tenor of `count` months.
    pub fn months(count: u32) -> StirResult<Self> {
        Self::new(count, TenorUnit::Month)
    }

    /// Tenor of `count` years.
    pub fn years(count: u32) -> StirResult<Self> {
        Self::new(count, TenorUnit::Year)
    }

    /// Number of units.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The unit.
    #[must_use]
    pub const fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Length in whole months, for month and year tenors.
    #[must_use]
    pub const fn total_months(&self) -> Option<u32> {
        match self.unit {
            TenorUnit::Month => Some(self.count),
            TenorUnit::Year => self.count.checked_mul(12),
            TenorUnit::Day | TenorUnit::Week => None,
        }
    }
}

impl Default for Tenor {
    fn default() -> Self {
        Self::THREE_MONTHS
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = StirError;

    /// Parses `"3M"`, `"1y"`, `"2W"`, `"30D"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || StirError::invalid_argument(format!("cannot parse tenor '{s}'"));

        let unit_char = s.chars().last().ok_or_else(invalid)?;
        let unit = match unit_char.to_ascii_uppercase() {
            'D' => TenorUnit::Day,
            'W' => TenorUnit::Week,
            'M' => TenorUnit::Month,
            'Y' => TenorUnit::Year,
            _ => return Err(invalid()),
        };
        let count: u32 = s[..s.len() - unit_char.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;

        Self::new(count, unit)
    }
}

impl TryFrom<String> for Tenor {
    type Error = StirError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tenor() {
        assert_eq!("3M".parse::<Tenor>().unwrap(), Tenor::THREE_MONTHS);
        assert_eq!("1y".parse::<Tenor>().unwrap(), Tenor::years(1).unwrap());
        assert_eq!(" 2W ".parse::<Tenor>().unwrap(), Tenor::weeks(2).unwrap());
        assert_eq!("30D".parse::<Tenor>().unwrap(), Tenor::days(30).unwrap());
    }

    #[test]
    fn test_zero_tenor_rejected() {
        assert!(Tenor::months(0).unwrap_err().is_invalid_argument());
        assert!("0M".parse::<Tenor>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_malformed_tenor_rejected() {
        for bad in ["", "M", "3", "3Q", "-3M", "three months"] {
            assert!(bad.parse::<Tenor>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Tenor::THREE_MONTHS.to_string(), "3M");
        assert_eq!(Tenor::years(2).unwrap().to_string(), "2Y");
    }

    #[test]
    fn test_total_months() {
        assert_eq!(Tenor::THREE_MONTHS.total_months(), Some(3));
        assert_eq!(Tenor::years(2).unwrap().total_months(), Some(24));
        assert_eq!(Tenor::weeks(2).unwrap().total_months(), None);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Tenor::THREE_MONTHS).unwrap();
        assert_eq!(json, "\"3M\"");
        let parsed: Tenor = serde_json::from_str("\"6M\"").unwrap();
        assert_eq!(parsed, Tenor::months(6).unwrap());
        assert!(serde_json::from_str::<Tenor>("\"0M\"").is_err());
    }
}
