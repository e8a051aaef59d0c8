//! Forward rate agreement record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use stirx_core::daycounts::DayCountConvention;
use stirx_core::{Date, StirError, StirResult};

/// A forward rate agreement over `[start_date, end_date]`.
///
/// Built by the convexity engine from a futures contract; the dates are the
/// contract's, unchanged. By default the holder receives fixed, the same side
/// as a long futures position. Deserialization is checked by
/// [`ForwardRateAgreement::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FraRecord", into = "FraRecord")]
pub struct ForwardRateAgreement {
    start_date: Date,
    end_date: Date,
    forward_rate: Decimal,
    day_count: DayCountConvention,
    notional: Decimal,
    pay_fixed: bool,
}

impl ForwardRateAgreement {
    /// Creates a FRA with unit notional, receiving fixed.
    pub fn new(
        start_date: Date,
        end_date: Date,
        forward_rate: Decimal,
        day_count: DayCountConvention,
    ) -> StirResult<Self> {
        if end_date <= start_date {
            return Err(StirError::invalid_argument(format!(
                "FRA period {start_date} -> {end_date} is empty"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            forward_rate,
            day_count,
            notional: Decimal::ONE,
            pay_fixed: false,
        })
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: Decimal) -> Self {
        self.notional = notional;
        self
    }

    /// Sets which side of the fixed rate the holder is on.
    #[must_use]
    pub fn with_pay_fixed(mut self, pay_fixed: bool) -> Self {
        self.pay_fixed = pay_fixed;
        self
    }

    /// Start of the forward period.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// End of the forward period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Contracted forward rate as a decimal (0.02 = 2%).
    #[must_use]
    pub fn forward_rate(&self) -> Decimal {
        self.forward_rate
    }

    /// Accrual convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Notional.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// True if the holder pays the fixed rate.
    #[must_use]
    pub fn pay_fixed(&self) -> bool {
        self.pay_fixed
    }

    /// Accrual fraction of the forward period.
    #[must_use]
    pub fn year_fraction(&self) -> Decimal {
        self.day_count.year_fraction(self.start_date, self.end_date)
    }

    /// Discount factor from end to start implied by the forward rate,
    /// `1 / (1 + r * tau)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the rate is so negative that `1 + r * tau <= 0`.
    pub fn forward_discount_factor(&self) -> StirResult<Decimal> {
        let growth = self
            .forward_rate
            .checked_mul(self.year_fraction())
            .and_then(|accrual| accrual.checked_add(Decimal::ONE))
            .ok_or_else(|| overflow("forward rate", self.forward_rate))?;
        if growth <= Decimal::ZERO {
            return Err(StirError::invalid_argument(format!(
                "forward rate {} gives a non-positive growth factor",
                self.forward_rate
            )));
        }
        Ok(Decimal::ONE / growth)
    }

    /// Amount paid at the start date once the period's rate has fixed.
    ///
    /// Positive values are received by the holder. The settlement is the
    /// accrual difference discounted back over the period at the fixing rate.
    pub fn settlement_amount(&self, fixing_rate: Decimal) -> StirResult<Decimal> {
        let tau = self.year_fraction();
        let discount = fixing_rate
            .checked_mul(tau)
            .and_then(|accrual| accrual.checked_add(Decimal::ONE))
            .ok_or_else(|| overflow("fixing rate", fixing_rate))?;
        if discount <= Decimal::ZERO {
            return Err(StirError::invalid_argument(format!(
                "fixing rate {fixing_rate} gives a non-positive discount factor"
            )));
        }
        let receive_floating = fixing_rate
            .checked_sub(self.forward_rate)
            .and_then(|spread| spread.checked_mul(self.notional))
            .and_then(|amount| amount.checked_mul(tau))
            .and_then(|amount| amount.checked_div(discount))
            .ok_or_else(|| overflow("settlement amount at fixing", fixing_rate))?;
        Ok(if self.pay_fixed {
            receive_floating
        } else {
            -receive_floating
        })
    }
}

fn overflow(what: &str, value: Decimal) -> StirError {
    StirError::invalid_argument(format!("{what} {value} overflows the accrual"))
}

/// Serialized form of a [`ForwardRateAgreement`].
#[derive(Serialize, Deserialize)]
struct FraRecord {
    start_date: Date,
    end_date: Date,
    forward_rate: Decimal,
    day_count: DayCountConvention,
    notional: Decimal,
    pay_fixed: bool,
}

impl TryFrom<FraRecord> for ForwardRateAgreement {
    type Error = StirError;

    fn try_from(record: FraRecord) -> StirResult<Self> {
        Ok(Self::new(
            record.start_date,
            record.end_date,
            record.forward_rate,
            record.day_count,
        )?
        .with_notional(record.notional)
        .with_pay_fixed(record.pay_fixed))
    }
}

impl From<ForwardRateAgreement> for FraRecord {
    fn from(fra: ForwardRateAgreement) -> Self {
        Self {
            start_date: fra.start_date,
            end_date: fra.end_date,
            forward_rate: fra.forward_rate,
            day_count: fra.day_count,
            notional: fra.notional,
            pay_fixed: fra.pay_fixed,
        }
    }
}

impl fmt::Display for ForwardRateAgreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FRA {} -> {} @ {:.4}% {}",
            self.start_date,
            self.end_date,
            self.forward_rate * Decimal::ONE_HUNDRED,
            self.day_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fra(rate: Decimal) -> ForwardRateAgreement {
        ForwardRateAgreement::new(
            Date::from_ymd(2020, 6, 17).unwrap(),
            Date::from_ymd(2020, 9, 16).unwrap(),
            rate,
            DayCountConvention::Act360,
        )
        .unwrap()
    }

    #[test]
    fn test_year_fraction_and_discount() {
        let fra = fra(dec!(0.02));
        assert_eq!(fra.year_fraction(), dec!(91) / dec!(360));
        let df = fra.forward_discount_factor().unwrap();
        let tau = dec!(91) / dec!(360);
        assert_eq!(df, Decimal::ONE / (Decimal::ONE + dec!(0.02) * tau));
        assert!(df < Decimal::ONE);
    }

    #[test]
    fn test_settlement_sign_follows_side() {
        let receive_fixed = fra(dec!(0.02)).with_notional(dec!(1000000));
        let pay_fixed = receive_fixed.clone().with_pay_fixed(true);

        // Rates fixed above the contract rate: fixed receiver loses
        assert!(receive_fixed.settlement_amount(dec!(0.03)).unwrap() < Decimal::ZERO);
        assert!(pay_fixed.settlement_amount(dec!(0.03)).unwrap() > Decimal::ZERO);
        assert_eq!(pay_fixed.settlement_amount(dec!(0.02)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_rates_are_errors() {
        // Two-year period: MAX x tau exceeds the representable range
        let long = ForwardRateAgreement::new(
            Date::from_ymd(2020, 6, 17).unwrap(),
            Date::from_ymd(2022, 6, 17).unwrap(),
            Decimal::MAX,
            DayCountConvention::Act360,
        )
        .unwrap();
        assert!(long.forward_discount_factor().unwrap_err().is_invalid_argument());

        let huge_notional = fra(dec!(0.02)).with_notional(Decimal::MAX);
        assert!(huge_notional.settlement_amount(dec!(5)).is_err());
        assert!(huge_notional.settlement_amount(dec!(0.02)).is_ok());
    }

    #[test]
    fn test_empty_period_rejected() {
        let d = Date::from_ymd(2020, 6, 17).unwrap();
        let err = ForwardRateAgreement::new(d, d, dec!(0.02), DayCountConvention::Act360)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_deserialize_checks_period() {
        let fra = fra(dec!(0.02)).with_notional(dec!(1000000)).with_pay_fixed(true);
        let valid = serde_json::to_value(&fra).unwrap();
        let parsed: ForwardRateAgreement = serde_json::from_value(valid.clone()).unwrap();
        assert_eq!(parsed, fra);

        let mut reversed = valid.clone();
        reversed["start_date"] = valid["end_date"].clone();
        reversed["end_date"] = valid["start_date"].clone();
        let err = serde_json::from_value::<ForwardRateAgreement>(reversed).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            fra(dec!(0.02)).to_string(),
            "FRA 2020-06-17 -> 2020-09-16 @ 2.0000% ACT/360"
        );
    }
}
