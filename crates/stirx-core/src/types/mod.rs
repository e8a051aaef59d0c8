//! Domain types for futures scheduling.
//!
//! - [`Date`]: validated calendar date with checked arithmetic
//! - [`Tenor`]: positive duration in days, weeks, months or years

mod date;
mod tenor;

pub use date::Date;
pub use tenor::{Tenor, TenorUnit};

pub(crate) use date::is_leap_year;
