//! # STIRX Futures
//!
//! IMM futures strips and their conversion into forward rate agreements.
//!
//! - **IMM dates**: third Wednesday of March, June, September and December
//! - **Strips**: chained contracts starting on consecutive IMM dates
//! - **Convexity**: futures rate to FRA rate under linear or Hull-White models
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use stirx_futures::prelude::*;
//!
//! let valuation = Date::from_ymd(2020, 5, 5).unwrap();
//! let strip = generate_series(valuation, 4, Tenor::THREE_MONTHS).unwrap();
//!
//! let fra = to_forward_rate_agreement(&strip[0], dec!(0.020), dec!(0)).unwrap();
//! assert_eq!(fra.forward_rate(), dec!(0.020));
//! assert_eq!(fra.end_date(), strip[1].start_date());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]

pub mod batch;
pub mod contract;
pub mod convexity;
pub mod fra;
pub mod generator;
pub mod imm;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{convert_series, convert_series_parallel};
    pub use crate::contract::{FuturesContract, DEFAULT_CONTRACT_SIZE};
    pub use crate::convexity::{
        price_from_rate, rate_from_price, to_forward_rate_agreement, ConvexityEngine,
        ConvexityModel,
    };
    pub use crate::fra::ForwardRateAgreement;
    pub use crate::generator::{generate_series, EndDateRule, SeriesGenerator};
    pub use crate::imm::{
        imm_code, is_imm_date, next_imm_date, next_quarterly_imm_date, third_wednesday,
        ImmBoundary, ImmMonth,
    };
    pub use stirx_core::prelude::*;
}

pub use contract::FuturesContract;
pub use convexity::{to_forward_rate_agreement, ConvexityEngine, ConvexityModel};
pub use fra::ForwardRateAgreement;
pub use generator::{generate_series, SeriesGenerator};
pub use imm::{next_imm_date, ImmBoundary, ImmMonth};
