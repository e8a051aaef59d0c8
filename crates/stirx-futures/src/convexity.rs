//! Futures-to-forward convexity adjustment.
//!
//! Futures are margined daily while FRAs settle once, so the futures rate
//! sits above the equivalent forward rate:
//!
//! ```text
//! Forward Rate = Futures Rate - Convexity Adjustment
//! ```
//!
//! The adjustment is never negative for a non-negative model input and is
//! exactly zero when the model input is zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use stirx_core::daycounts::DayCountConvention;
use stirx_core::{StirError, StirResult};

use crate::contract::FuturesContract;
use crate::fra::ForwardRateAgreement;

/// Below this mean reversion the Hull-White bias is evaluated in its Ho-Lee
/// limit to avoid cancellation in `(1 - e^{-a t}) / a`.
const MIN_MEAN_REVERSION: f64 = 1e-10;

/// How the convexity adjustment is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ConvexityModel {
    /// `convexity * time_to_start * tenor_years`.
    Linear {
        /// Volatility-scale parameter; 0 disables the adjustment.
        convexity: Decimal,
    },
    /// Hull-White one-factor futures/forward bias.
    HullWhite {
        /// Short-rate normal volatility (0.01 = 100bp).
        volatility: f64,
        /// Mean reversion speed `a`.
        mean_reversion: f64,
    },
    /// A caller-supplied adjustment in rate units.
    Explicit {
        /// Amount subtracted from the futures rate.
        adjustment: Decimal,
    },
}

impl ConvexityModel {
    /// Linear model with the given convexity.
    #[must_use]
    pub fn linear(convexity: Decimal) -> Self {
        Self::Linear { convexity }
    }

    /// Hull-White model.
    #[must_use]
    pub fn hull_white(volatility: f64, mean_reversion: f64) -> Self {
        Self::HullWhite {
            volatility,
            mean_reversion,
        }
    }

    /// Rejects inputs that would make the adjustment negative or undefined.
    pub fn validate(&self) -> StirResult<()> {
        match *self {
            Self::Linear { convexity } if convexity < Decimal::ZERO => Err(
                StirError::invalid_argument(format!("convexity must be non-negative, got {convexity}")),
            ),
            Self::HullWhite { volatility, .. } if !(volatility >= 0.0 && volatility.is_finite()) => {
                Err(StirError::invalid_argument(format!(
                    "volatility must be finite and non-negative, got {volatility}"
                )))
            }
            Self::HullWhite { mean_reversion, .. }
                if !(mean_reversion >= 0.0 && mean_reversion.is_finite()) =>
            {
                Err(StirError::invalid_argument(format!(
                    "mean reversion must be finite and non-negative, got {mean_reversion}"
                )))
            }
            Self::Explicit { adjustment } if adjustment < Decimal::ZERO => Err(
                StirError::invalid_argument(format!("adjustment must be non-negative, got {adjustment}")),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for ConvexityModel {
    fn default() -> Self {
        Self::linear(Decimal::ZERO)
    }
}

/// Converts futures contracts into FRAs.
///
/// `time_basis` measures time from valuation for the adjustment (ACT/365F by
/// default); `accrual_basis` is the convention stamped on the FRA (ACT/360
/// by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvexityEngine {
    time_basis: DayCountConvention,
    accrual_basis: DayCountConvention,
}

impl Default for ConvexityEngine {
    fn default() -> Self {
        Self {
            time_basis: DayCountConvention::Act365Fixed,
            accrual_basis: DayCountConvention::Act360,
        }
    }
}

impl ConvexityEngine {
    /// Creates an engine with ACT/365F time and ACT/360 accrual.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the basis for time to expiry and tenor length.
    #[must_use]
    pub fn with_time_basis(mut self, basis: DayCountConvention) -> Self {
        self.time_basis = basis;
        self
    }

    /// Overrides the FRA accrual convention.
    #[must_use]
    pub fn with_accrual_basis(mut self, basis: DayCountConvention) -> Self {
        self.accrual_basis = basis;
        self
    }

    /// Basis for time to expiry and tenor length.
    #[must_use]
    pub fn time_basis(&self) -> DayCountConvention {
        self.time_basis
    }

    /// FRA accrual convention.
    #[must_use]
    pub fn accrual_basis(&self) -> DayCountConvention {
        self.accrual_basis
    }

    /// Convexity adjustment for `contract` under `model`.
    pub fn adjustment(&self, contract: &FuturesContract, model: &ConvexityModel) -> StirResult<Decimal> {
        model.validate()?;

        match *model {
            ConvexityModel::Linear { convexity } => {
                if convexity.is_zero() {
                    return Ok(Decimal::ZERO);
                }
                let time_to_start = contract.time_to_start(self.time_basis);
                let tenor_years = contract.tenor_years(self.time_basis);
                convexity
                    .checked_mul(time_to_start)
                    .and_then(|scaled| scaled.checked_mul(tenor_years))
                    .ok_or_else(|| {
                        StirError::invalid_argument(format!(
                            "convexity {convexity} overflows the adjustment"
                        ))
                    })
            }
            ConvexityModel::HullWhite {
                volatility,
                mean_reversion,
            } => self.hull_white_adjustment(contract, volatility, mean_reversion),
            ConvexityModel::Explicit { adjustment } => Ok(adjustment),
        }
    }

    fn hull_white_adjustment(
        &self,
        contract: &FuturesContract,
        volatility: f64,
        mean_reversion: f64,
    ) -> StirResult<Decimal> {
        if volatility == 0.0 {
            return Ok(Decimal::ZERO);
        }

        let valuation = contract.valuation_date();
        // A contract past its last trading day has a fixed rate: t1 = 0
        let t1 = year_fraction_f64(self.time_basis, valuation, contract.last_trading_date())?.max(0.0);
        let t2 = year_fraction_f64(self.time_basis, valuation, contract.end_date())?;

        let a = mean_reversion;
        let variance = volatility * volatility;
        let bias = if a < MIN_MEAN_REVERSION {
            variance * t1 * t2 / 2.0
        } else {
            let b = |s: f64, t: f64| (1.0 - (-a * (t - s)).exp()) / a;
            let b12 = b(t1, t2);
            let b01 = b(0.0, t1);
            b12 / (t2 - t1) * (b12 * (1.0 - (-2.0 * a * t1).exp()) + 2.0 * a * b01 * b01) * variance
                / (4.0 * a)
        };

        Decimal::from_f64_retain(bias.max(0.0)).ok_or_else(|| {
            StirError::invalid_argument(format!("Hull-White adjustment is not representable: {bias}"))
        })
    }

    /// Forward rate implied by a futures rate.
    pub fn forward_rate(
        &self,
        contract: &FuturesContract,
        futures_rate: Decimal,
        model: &ConvexityModel,
    ) -> StirResult<Decimal> {
        let adjustment = self.adjustment(contract, model)?;
        subtract_adjustment(futures_rate, adjustment)
    }

    /// Futures rate consistent with a FRA rate; inverse of [`Self::forward_rate`].
    pub fn futures_rate_from_fra(
        &self,
        contract: &FuturesContract,
        fra_rate: Decimal,
        model: &ConvexityModel,
    ) -> StirResult<Decimal> {
        let adjustment = self.adjustment(contract, model)?;
        fra_rate.checked_add(adjustment).ok_or_else(|| {
            StirError::invalid_argument(format!(
                "FRA rate {fra_rate} plus adjustment {adjustment} overflows"
            ))
        })
    }

    /// Builds the FRA equivalent to `contract` quoted at `futures_rate`.
    pub fn to_fra(
        &self,
        contract: &FuturesContract,
        futures_rate: Decimal,
        model: &ConvexityModel,
    ) -> StirResult<ForwardRateAgreement> {
        let adjustment = self.adjustment(contract, model)?;
        let forward_rate = subtract_adjustment(futures_rate, adjustment)?;

        trace!(
            contract = contract.sequence_number(),
            %futures_rate,
            %adjustment,
            %forward_rate,
            "futures converted to FRA"
        );

        Ok(ForwardRateAgreement::new(
            contract.start_date(),
            contract.end_date(),
            forward_rate,
            self.accrual_basis,
        )?
        .with_notional(contract.contract_size()))
    }

    /// Builds the FRA with the linear model.
    pub fn to_forward_rate_agreement(
        &self,
        contract: &FuturesContract,
        futures_rate: Decimal,
        convexity: Decimal,
    ) -> StirResult<ForwardRateAgreement> {
        self.to_fra(contract, futures_rate, &ConvexityModel::linear(convexity))
    }
}

fn subtract_adjustment(futures_rate: Decimal, adjustment: Decimal) -> StirResult<Decimal> {
    futures_rate.checked_sub(adjustment).ok_or_else(|| {
        StirError::invalid_argument(format!(
            "futures rate {futures_rate} less adjustment {adjustment} overflows"
        ))
    })
}

fn year_fraction_f64(
    basis: DayCountConvention,
    start: stirx_core::Date,
    end: stirx_core::Date,
) -> StirResult<f64> {
    basis
        .year_fraction(start, end)
        .to_f64()
        .ok_or_else(|| StirError::invalid_argument(format!("year fraction {start} -> {end} overflows f64")))
}

/// Converts `contract` quoted at `futures_rate` into a FRA using the linear
/// adjustment, ACT/365F time and ACT/360 accrual.
///
/// # Example
///
/// ```rust
/// use rust_decimal_macros::dec;
/// use stirx_core::{Date, Tenor};
/// use stirx_futures::{generate_series, to_forward_rate_agreement};
///
/// let strip = generate_series(Date::from_ymd(2020, 5, 5).unwrap(), 1, Tenor::THREE_MONTHS).unwrap();
/// let fra = to_forward_rate_agreement(&strip[0], dec!(0.02), dec!(0)).unwrap();
/// assert_eq!(fra.forward_rate(), dec!(0.02));
/// assert_eq!(fra.start_date(), strip[0].start_date());
/// ```
pub fn to_forward_rate_agreement(
    contract: &FuturesContract,
    futures_rate: Decimal,
    convexity: Decimal,
) -> StirResult<ForwardRateAgreement> {
    ConvexityEngine::default().to_forward_rate_agreement(contract, futures_rate, convexity)
}

/// Rate implied by a futures price: `(100 - price) / 100`.
#[must_use]
pub fn rate_from_price(price: Decimal) -> Decimal {
    (Decimal::ONE_HUNDRED - price) / Decimal::ONE_HUNDRED
}

/// Futures price for a rate: `100 - 100 * rate`.
#[must_use]
pub fn price_from_rate(rate: Decimal) -> Decimal {
    Decimal::ONE_HUNDRED - rate * Decimal::ONE_HUNDRED
}
