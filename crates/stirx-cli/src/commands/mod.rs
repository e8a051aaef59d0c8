//! CLI command implementations.

pub mod convert;
pub mod imm;
pub mod series;

pub use convert::ConvertArgs;
pub use imm::ImmArgs;
pub use series::SeriesArgs;

use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use stirx_config::FuturesConfig;
use stirx_core::{Date, Tenor};

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a tenor such as `3M`.
pub fn parse_tenor(s: &str) -> CliResult<Tenor> {
    s.parse().map_err(|_| CliError::InvalidTenor(s.to_string()))
}

/// Parses a decimal argument.
pub fn parse_decimal(field: &'static str, s: &str) -> CliResult<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| CliError::InvalidNumber {
        field,
        value: s.to_string(),
    })
}

/// Loads the configuration file if given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<FuturesConfig> {
    match path {
        Some(path) => Ok(FuturesConfig::from_file(path)?),
        None => Ok(FuturesConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsers() {
        assert_eq!(
            parse_date("2020-05-05").unwrap(),
            Date::from_ymd(2020, 5, 5).unwrap()
        );
        assert!(matches!(parse_date("05/05/2020"), Err(CliError::InvalidDate(_))));
        assert_eq!(parse_tenor("6m").unwrap(), Tenor::months(6).unwrap());
        assert!(matches!(parse_tenor("0M"), Err(CliError::InvalidTenor(_))));
        assert_eq!(parse_decimal("rate", " 0.02 ").unwrap(), Decimal::new(2, 2));
        assert!(parse_decimal("rate", "two").is_err());
    }
}
