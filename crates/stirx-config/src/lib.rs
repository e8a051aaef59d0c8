//! STIRX Configuration Layer
//!
//! Settings for futures strip generation and FRA conversion, loadable from
//! TOML or JSON and validated before use.
//!
//! # Example
//!
//! ```rust
//! use stirx_config::{FuturesConfig, Validate};
//! use stirx_core::Date;
//!
//! let config = FuturesConfig::from_toml_str(r#"
//!     tenor = "3M"
//!     calendar = "US"
//!     holidays = ["2023-06-19"]
//! "#).unwrap();
//! assert!(config.is_valid());
//!
//! let strip = config
//!     .generator()
//!     .unwrap()
//!     .generate(Date::from_ymd(2023, 5, 1).unwrap(), 4, config.tenor)
//!     .unwrap();
//! assert_eq!(strip[0].last_trading_date(), Date::from_ymd(2023, 6, 16).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod futures;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use futures::FuturesConfig;
