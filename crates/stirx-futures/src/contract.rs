//! Futures contract record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use stirx_core::daycounts::DayCountConvention;
use stirx_core::{Date, StirError, StirResult, Tenor, TenorUnit};

use crate::imm::imm_code;

/// Default notional of a short-term interest-rate future.
pub const DEFAULT_CONTRACT_SIZE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// One contract of a futures strip.
///
/// The interest period runs from `start_date` (the IMM delivery date) to
/// `end_date`. `valuation_date` is the as-of date the contract was generated
/// for; time to expiry is measured from it. Immutable once built.
///
/// Deserialization goes through [`FuturesContract::new`] and the `with_*`
/// setters, so a document can only produce a contract the constructors accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContractRecord", into = "ContractRecord")]
pub struct FuturesContract {
    sequence_number: u32,
    valuation_date: Date,
    start_date: Date,
    end_date: Date,
    last_trading_date: Date,
    tenor: Tenor,
    contract_size: Decimal,
}

impl FuturesContract {
    /// Creates a contract.
    ///
    /// The last trading date defaults to the start date and the size to
    /// [`DEFAULT_CONTRACT_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns `StirError::InvalidArgument` if the sequence number is zero,
    /// the start date precedes the valuation date, or the period is empty.
    pub fn new(
        sequence_number: u32,
        valuation_date: Date,
        start_date: Date,
        end_date: Date,
        tenor: Tenor,
    ) -> StirResult<Self> {
        if sequence_number == 0 {
            return Err(StirError::invalid_argument(
                "contract sequence numbers start at 1",
            ));
        }
        if start_date < valuation_date {
            return Err(StirError::invalid_argument(format!(
                "contract starts {start_date}, before valuation date {valuation_date}"
            )));
        }
        if end_date <= start_date {
            return Err(StirError::invalid_argument(format!(
                "contract period {start_date} -> {end_date} is empty"
            )));
        }

        Ok(Self {
            sequence_number,
            valuation_date,
            start_date,
            end_date,
            last_trading_date: start_date,
            tenor,
            contract_size: DEFAULT_CONTRACT_SIZE,
        })
    }

    /// Sets the last trading date; it may not fall after the start date.
    pub fn with_last_trading_date(mut self, last_trading_date: Date) -> StirResult<Self> {
        if last_trading_date > self.start_date {
            return Err(StirError::invalid_argument(format!(
                "last trading date {last_trading_date} is after delivery {}",
                self.start_date
            )));
        }
        self.last_trading_date = last_trading_date;
        Ok(self)
    }

    /// Sets the contract notional; it must be positive.
    pub fn with_contract_size(mut self, contract_size: Decimal) -> StirResult<Self> {
        if contract_size <= Decimal::ZERO {
            return Err(StirError::invalid_argument(format!(
                "contract size must be positive, got {contract_size}"
            )));
        }
        self.contract_size = contract_size;
        Ok(self)
    }

    /// Position in the strip, starting at 1.
    #[must_use]
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// As-of date the contract was generated for.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Delivery date and start of the interest period.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// End of the interest period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Last day the contract trades.
    #[must_use]
    pub fn last_trading_date(&self) -> Date {
        self.last_trading_date
    }

    /// Length of the interest period.
    #[must_use]
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }

    /// Notional.
    #[must_use]
    pub fn contract_size(&self) -> Decimal {
        self.contract_size
    }

    /// Exchange code of the delivery month, e.g. "M0".
    #[must_use]
    pub fn code(&self) -> Option<String> {
        imm_code(self.start_date)
    }

    /// Year fraction from the valuation date to the start date.
    #[must_use]
    pub fn time_to_start(&self, basis: DayCountConvention) -> Decimal {
        basis.year_fraction(self.valuation_date, self.start_date)
    }

    /// Year fraction of the interest period.
    #[must_use]
    pub fn tenor_years(&self, basis: DayCountConvention) -> Decimal {
        basis.year_fraction(self.start_date, self.end_date)
    }

    /// Value of a one basis point move in the quoted rate.
    ///
    /// Uses the nominal period length (3M = 0.25): a 3M contract on
    /// 1,000,000 moves 25 per basis point.
    #[must_use]
    pub fn basis_point_value(&self) -> Decimal {
        let count = Decimal::from(self.tenor.count());
        let nominal_years = match self.tenor.unit() {
            TenorUnit::Day => count / Decimal::from(360),
            TenorUnit::Week => count * Decimal::from(7) / Decimal::from(360),
            TenorUnit::Month => count / Decimal::from(12),
            TenorUnit::Year => count,
        };
        self.contract_size * nominal_years * Decimal::new(1, 4)
    }

    /// True once `as_of` is after the last trading date.
    #[must_use]
    pub fn is_expired(&self, as_of: Date) -> bool {
        as_of > self.last_trading_date
    }
}

/// Serialized form of a [`FuturesContract`].
#[derive(Serialize, Deserialize)]
struct ContractRecord {
    sequence_number: u32,
    valuation_date: Date,
    start_date: Date,
    end_date: Date,
    last_trading_date: Date,
    tenor: Tenor,
    contract_size: Decimal,
}

impl TryFrom<ContractRecord> for FuturesContract {
    type Error = StirError;

    fn try_from(record: ContractRecord) -> StirResult<Self> {
        Self::new(
            record.sequence_number,
            record.valuation_date,
            record.start_date,
            record.end_date,
            record.tenor,
        )?
        .with_last_trading_date(record.last_trading_date)?
        .with_contract_size(record.contract_size)
    }
}

impl From<FuturesContract> for ContractRecord {
    fn from(contract: FuturesContract) -> Self {
        Self {
            sequence_number: contract.sequence_number,
            valuation_date: contract.valuation_date,
            start_date: contract.start_date,
            end_date: contract.end_date,
            last_trading_date: contract.last_trading_date,
            tenor: contract.tenor,
            contract_size: contract.contract_size,
        }
    }
}

impl fmt::Display for FuturesContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Future #{} [{}] {} -> {} ({})",
            self.sequence_number,
            self.code().unwrap_or_else(|| "--".to_string()),
            self.start_date,
            self.end_date,
            self.tenor
        )
    }
}
