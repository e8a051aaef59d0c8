//! Whole-strip conversion.
//!
//! Every contract is converted independently, so the strip can be spread
//! across the rayon pool. Results are always ordered by sequence number.

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use stirx_core::{StirError, StirResult};

use crate::contract::FuturesContract;
use crate::convexity::{ConvexityEngine, ConvexityModel};
use crate::fra::ForwardRateAgreement;

fn check_lengths(contracts: &[FuturesContract], futures_rates: &[Decimal]) -> StirResult<()> {
    if contracts.len() != futures_rates.len() {
        return Err(StirError::invalid_argument(format!(
            "{} contracts but {} futures rates",
            contracts.len(),
            futures_rates.len()
        )));
    }
    Ok(())
}

fn ordered_pairs<'a>(
    contracts: &'a [FuturesContract],
    futures_rates: &'a [Decimal],
) -> Vec<(&'a FuturesContract, Decimal)> {
    let mut pairs: Vec<_> = contracts.iter().zip(futures_rates.iter().copied()).collect();
    pairs.sort_by_key(|(contract, _)| contract.sequence_number());
    pairs
}

/// Converts a strip sequentially, pairing `contracts[i]` with
/// `futures_rates[i]`.
///
/// # Errors
///
/// `InvalidArgument` if the slices differ in length or any conversion fails.
pub fn convert_series(
    engine: &ConvexityEngine,
    contracts: &[FuturesContract],
    futures_rates: &[Decimal],
    model: &ConvexityModel,
) -> StirResult<Vec<ForwardRateAgreement>> {
    check_lengths(contracts, futures_rates)?;

    let fras = ordered_pairs(contracts, futures_rates)
        .into_iter()
        .map(|(contract, rate)| engine.to_fra(contract, rate, model))
        .collect::<StirResult<Vec<_>>>()?;

    debug!(count = fras.len(), "converted strip");
    Ok(fras)
}

/// Parallel form of [`convert_series`]; same output and errors.
pub fn convert_series_parallel(
    engine: &ConvexityEngine,
    contracts: &[FuturesContract],
    futures_rates: &[Decimal],
    model: &ConvexityModel,
) -> StirResult<Vec<ForwardRateAgreement>> {
    check_lengths(contracts, futures_rates)?;

    let fras = ordered_pairs(contracts, futures_rates)
        .into_par_iter()
        .map(|(contract, rate)| engine.to_fra(contract, rate, model))
        .collect::<StirResult<Vec<_>>>()?;

    debug!(count = fras.len(), parallel = true, "converted strip");
    Ok(fras)
}
