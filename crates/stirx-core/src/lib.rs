//! # STIRX Core
//!
//! Calendar primitives shared by the STIRX futures toolkit.
//!
//! - **Types**: [`Date`] and [`Tenor`], with checked calendar arithmetic
//! - **Day Count Conventions**: year fractions under named conventions
//! - **Business Day Calendars**: injected, read-only holiday calendars
//!
//! ## Example
//!
//! ```rust
//! use stirx_core::prelude::*;
//!
//! let date = Date::from_ymd(2020, 6, 17).unwrap();
//! let tenor: Tenor = "3M".parse().unwrap();
//! let end = date.add_tenor(tenor).unwrap();
//! assert_eq!(end, Date::from_ymd(2020, 9, 17).unwrap());
//!
//! let tau = DayCountConvention::Act360.to_day_count().year_fraction(date, end);
//! assert!(tau > rust_decimal::Decimal::ZERO);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{StirError, StirResult};
    pub use crate::types::{Date, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{StirError, StirResult};
pub use types::{Date, Tenor, TenorUnit};
