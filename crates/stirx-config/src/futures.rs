//! Futures strip configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use stirx_core::calendars::{Calendar, HolidayCalendar, WeekendCalendar};
use stirx_core::daycounts::DayCountConvention;
use stirx_core::{Date, Tenor};
use stirx_futures::contract::DEFAULT_CONTRACT_SIZE;
use stirx_futures::generator::{EndDateRule, SeriesGenerator};
use stirx_futures::{ConvexityEngine, ConvexityModel, FuturesContract, ImmBoundary};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// FUTURES CONFIGURATION
// =============================================================================

/// Settings for strip generation and FRA conversion.
///
/// Every field has a market default, so an empty TOML or JSON document is a
/// valid configuration.
///
/// ```toml
/// tenor = "3M"
/// boundary = "exclusive"
/// last_trading_lag = 2
/// calendar = "US"
/// holidays = ["2023-06-19"]
///
/// [convexity]
/// model = "hull_white"
/// volatility = 0.01
/// mean_reversion = 0.03
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuturesConfig {
    /// Description of this configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Interest period of each contract.
    pub tenor: Tenor,

    /// Whether a valuation date on an IMM date includes that contract.
    pub boundary: ImmBoundary,

    /// How end dates are derived from start dates.
    pub end_date_rule: EndDateRule,

    /// Basis for time to expiry and tenor length in the adjustment.
    pub time_basis: DayCountConvention,

    /// Accrual convention of the resulting FRAs.
    pub accrual_basis: DayCountConvention,

    /// Business days from last trading to delivery.
    pub last_trading_lag: u32,

    /// Contract notional.
    pub contract_size: Decimal,

    /// Calendar name, used when `holidays` is non-empty.
    pub calendar: String,

    /// Holidays for the last-trading calculation; weekends are always closed.
    pub holidays: Vec<Date>,

    /// Convexity model applied during conversion.
    pub convexity: ConvexityModel,
}

impl Default for FuturesConfig {
    fn default() -> Self {
        Self {
            description: None,
            tenor: Tenor::THREE_MONTHS,
            boundary: ImmBoundary::Exclusive,
            end_date_rule: EndDateRule::ImmAligned,
            time_basis: DayCountConvention::Act365Fixed,
            accrual_basis: DayCountConvention::Act360,
            last_trading_lag: SeriesGenerator::DEFAULT_LAST_TRADING_LAG,
            contract_size: DEFAULT_CONTRACT_SIZE,
            calendar: "Weekend Only".to_string(),
            holidays: Vec::new(),
            convexity: ConvexityModel::default(),
        }
    }
}

impl FuturesConfig {
    /// Creates a configuration with market defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder method to set description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the tenor.
    pub fn with_tenor(mut self, tenor: Tenor) -> Self {
        self.tenor = tenor;
        self
    }

    /// Builder method to set the boundary policy.
    pub fn with_boundary(mut self, boundary: ImmBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Builder method to set the end date rule.
    pub fn with_end_date_rule(mut self, rule: EndDateRule) -> Self {
        self.end_date_rule = rule;
        self
    }

    /// Builder method to set the time basis.
    pub fn with_time_basis(mut self, basis: DayCountConvention) -> Self {
        self.time_basis = basis;
        self
    }

    /// Builder method to set the accrual basis.
    pub fn with_accrual_basis(mut self, basis: DayCountConvention) -> Self {
        self.accrual_basis = basis;
        self
    }

    /// Builder method to set the last-trading lag.
    pub fn with_last_trading_lag(mut self, days: u32) -> Self {
        self.last_trading_lag = days;
        self
    }

    /// Builder method to set the contract size.
    pub fn with_contract_size(mut self, contract_size: Decimal) -> Self {
        self.contract_size = contract_size;
        self
    }

    /// Builder method to set a named holiday calendar.
    pub fn with_holidays(
        mut self,
        calendar: impl Into<String>,
        holidays: impl IntoIterator<Item = Date>,
    ) -> Self {
        self.calendar = calendar.into();
        self.holidays = holidays.into_iter().collect();
        self
    }

    /// Builder method to set the convexity model.
    pub fn with_convexity(mut self, model: ConvexityModel) -> Self {
        self.convexity = model;
        self
    }

    /// The calendar described by `calendar` and `holidays`.
    pub fn build_calendar(&self) -> Arc<dyn Calendar> {
        if self.holidays.is_empty() {
            Arc::new(WeekendCalendar)
        } else {
            Arc::new(HolidayCalendar::new(
                self.calendar.clone(),
                self.holidays.iter().copied(),
            ))
        }
    }

    /// Builds a strip generator from this configuration.
    pub fn generator(&self) -> ConfigResult<SeriesGenerator> {
        self.validate_or_error()?;
        Ok(SeriesGenerator::new()
            .with_boundary(self.boundary)
            .with_end_date_rule(self.end_date_rule)
            .with_last_trading_lag(self.last_trading_lag)
            .with_contract_size(self.contract_size)
            .with_calendar(self.build_calendar()))
    }

    /// Generates `count` contracts of the configured tenor for `valuation`.
    ///
    /// Strip errors such as a zero count surface as [`ConfigError::Core`].
    pub fn generate(&self, valuation: Date, count: u32) -> ConfigResult<Vec<FuturesContract>> {
        Ok(self.generator()?.generate(valuation, count, self.tenor)?)
    }

    /// Builds a conversion engine from this configuration.
    pub fn engine(&self) -> ConvexityEngine {
        ConvexityEngine::new()
            .with_time_basis(self.time_basis)
            .with_accrual_basis(self.accrual_basis)
    }
}

impl Validate for FuturesConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.contract_size <= Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "contract_size",
                format!("Contract size must be positive, got {}", self.contract_size),
                "positive",
            ));
        }

        if self.last_trading_lag > 10 {
            errors.push(ValidationError::with_rule(
                "last_trading_lag",
                format!(
                    "Last trading lag {} exceeds maximum of 10",
                    self.last_trading_lag
                ),
                "max_last_trading_lag",
            ));
        }

        if !self.holidays.is_empty() && self.calendar.trim().is_empty() {
            errors.push(ValidationError::new(
                "calendar",
                "A calendar with holidays needs a name",
            ));
        }

        if let Err(err) = self.convexity.validate() {
            errors.push(ValidationError::with_rule(
                "convexity",
                err.to_string(),
                "non_negative",
            ));
        }

        errors
    }
}
