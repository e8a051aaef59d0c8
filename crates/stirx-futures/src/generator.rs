//! Futures strip generator.
//!
//! Starting from a valuation date, walks the quarterly IMM cycle and emits
//! one contract per IMM date. Each contract starts on the IMM date strictly
//! after the previous contract's start, so no date appears twice.

use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use stirx_core::calendars::{Calendar, WeekendCalendar};
use stirx_core::{Date, StirError, StirResult, Tenor};

use crate::contract::{FuturesContract, DEFAULT_CONTRACT_SIZE};
use crate::imm::{next_quarterly_imm_date, third_wednesday, ImmBoundary, ImmMonth};

/// How a contract's end date is derived from its start date and tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndDateRule {
    /// When start + tenor lands in an IMM month (March, June, September,
    /// December) the end moves to that month's third Wednesday, so quarterly
    /// strips chain end-to-start: 2020-06-17 + 3M ends 2020-09-16 rather than
    /// the plain 2020-09-17. Any other landing month keeps start + tenor, and
    /// day and week tenors always add calendar days.
    #[default]
    ImmAligned,
    /// Plain calendar arithmetic: start + tenor for every tenor.
    Unadjusted,
}

/// Generates chained futures strips.
///
/// # Example
///
/// ```rust
/// use stirx_core::{Date, Tenor};
/// use stirx_futures::generator::SeriesGenerator;
///
/// let valuation = Date::from_ymd(2020, 5, 5).unwrap();
/// let strip = SeriesGenerator::new()
///     .generate(valuation, 4, Tenor::THREE_MONTHS)
///     .unwrap();
///
/// assert_eq!(strip.len(), 4);
/// assert_eq!(strip[0].start_date(), Date::from_ymd(2020, 6, 17).unwrap());
/// assert_eq!(strip[0].end_date(), strip[1].start_date());
/// ```
#[derive(Clone)]
pub struct SeriesGenerator {
    boundary: ImmBoundary,
    end_date_rule: EndDateRule,
    last_trading_lag: u32,
    contract_size: Decimal,
    calendar: Arc<dyn Calendar>,
}

impl SeriesGenerator {
    /// Business days between the last trading date and delivery.
    pub const DEFAULT_LAST_TRADING_LAG: u32 = 2;

    /// Creates a generator with market defaults: a contract delivering on the
    /// valuation date has expired, IMM-aligned end dates, a two business day
    /// last-trading lag, 1,000,000 notional and a weekend-only calendar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boundary: ImmBoundary::Exclusive,
            end_date_rule: EndDateRule::ImmAligned,
            last_trading_lag: Self::DEFAULT_LAST_TRADING_LAG,
            contract_size: DEFAULT_CONTRACT_SIZE,
            calendar: Arc::new(WeekendCalendar),
        }
    }

    /// Sets the boundary policy applied at the valuation date.
    #[must_use]
    pub fn with_boundary(mut self, boundary: ImmBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets the end date rule.
    #[must_use]
    pub fn with_end_date_rule(mut self, rule: EndDateRule) -> Self {
        self.end_date_rule = rule;
        self
    }

    /// Sets the last-trading lag in business days.
    #[must_use]
    pub fn with_last_trading_lag(mut self, days: u32) -> Self {
        self.last_trading_lag = days;
        self
    }

    /// Sets the notional of every generated contract.
    #[must_use]
    pub fn with_contract_size(mut self, contract_size: Decimal) -> Self {
        self.contract_size = contract_size;
        self
    }

    /// Sets the calendar used for the last trading date.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Boundary policy at the valuation date.
    #[must_use]
    pub fn boundary(&self) -> ImmBoundary {
        self.boundary
    }

    /// End date rule.
    #[must_use]
    pub fn end_date_rule(&self) -> EndDateRule {
        self.end_date_rule
    }

    /// End of the interest period starting at `start`.
    pub fn end_date(&self, start: Date, tenor: Tenor) -> StirResult<Date> {
        let shifted = start.add_tenor(tenor)?;
        let lands_on_imm_month = ImmMonth::try_from(shifted.month()).is_ok();
        match (self.end_date_rule, tenor.total_months()) {
            (EndDateRule::ImmAligned, Some(_)) if lands_on_imm_month => {
                third_wednesday(shifted.year(), shifted.month())
            }
            _ => Ok(shifted),
        }
    }

    /// Generates `count` contracts for `valuation`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `count` is zero or the contract size is not
    /// positive; `DateArithmetic` if the strip runs off the calendar.
    pub fn generate(
        &self,
        valuation: Date,
        count: u32,
        tenor: Tenor,
    ) -> StirResult<Vec<FuturesContract>> {
        if count == 0 {
            return Err(StirError::invalid_argument(
                "contract count must be positive, got 0",
            ));
        }
        let lag = i32::try_from(self.last_trading_lag).map_err(|_| {
            StirError::invalid_argument(format!(
                "last trading lag {} is out of range",
                self.last_trading_lag
            ))
        })?;

        let mut contracts = Vec::with_capacity(count as usize);
        let mut start = next_quarterly_imm_date(valuation, self.boundary)?;

        for sequence_number in 1..=count {
            let end = self.end_date(start, tenor)?;
            let last_trading = self.calendar.add_business_days(start, -lag)?;

            let contract = FuturesContract::new(sequence_number, valuation, start, end, tenor)?
                .with_last_trading_date(last_trading)?
                .with_contract_size(self.contract_size)?;
            contracts.push(contract);

            if sequence_number < count {
                start = next_quarterly_imm_date(start, ImmBoundary::Exclusive)?;
            }
        }

        debug!(
            valuation = %valuation,
            count,
            tenor = %tenor,
            first = %contracts[0].start_date(),
            calendar = self.calendar.name(),
            "generated futures strip"
        );

        Ok(contracts)
    }
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SeriesGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesGenerator")
            .field("boundary", &self.boundary)
            .field("end_date_rule", &self.end_date_rule)
            .field("last_trading_lag", &self.last_trading_lag)
            .field("contract_size", &self.contract_size)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

/// Generates a strip with [`SeriesGenerator::new`] defaults.
pub fn generate_series(
    valuation: Date,
    count: u32,
    tenor: Tenor,
) -> StirResult<Vec<FuturesContract>> {
    SeriesGenerator::new().generate(valuation, count, tenor)
}
