//! Convert command implementation.
//!
//! Generates a strip and converts each contract's quote into a
//! convexity-adjusted FRA.

use anyhow::{bail, Result};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::debug;

use stirx_core::daycounts::DayCountConvention;
use stirx_core::Date;
use stirx_futures::batch::{convert_series, convert_series_parallel};
use stirx_futures::convexity::rate_from_price;
use stirx_futures::{ConvexityModel, ForwardRateAgreement, FuturesContract};

use crate::cli::OutputFormat;
use crate::commands::{load_config, parse_date, parse_decimal, parse_tenor};
use crate::error::CliError;
use crate::output::{print_header, print_output, MinimalRow};

/// Displayed precision of rates.
const RATE_DP: u32 = 10;

/// Arguments for the convert command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Valuation date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Number of contracts
    #[arg(short = 'n', long)]
    pub count: u32,

    /// Contract tenor, e.g. 3M. Overrides the configuration file.
    #[arg(short, long)]
    pub tenor: Option<String>,

    /// Futures rates as decimals (0.02 = 2%); one value applies to every contract
    #[arg(short, long, value_delimiter = ',', group = "quote", required_unless_present = "price")]
    pub rate: Vec<String>,

    /// Futures prices (98.00 = 2%); one value applies to every contract
    #[arg(short, long, value_delimiter = ',', group = "quote")]
    pub price: Vec<String>,

    /// Linear convexity parameter
    #[arg(short = 'k', long, conflicts_with_all = ["hw_vol", "hw_mean_reversion"])]
    pub convexity: Option<String>,

    /// Hull-White short-rate volatility
    #[arg(long, requires = "hw_mean_reversion")]
    pub hw_vol: Option<f64>,

    /// Hull-White mean reversion
    #[arg(long, requires = "hw_vol")]
    pub hw_mean_reversion: Option<f64>,

    /// Convert contracts on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Configuration file (.toml or .json)
    #[arg(short, long, env = "STIRX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// One converted contract.
#[derive(Debug, Serialize, Tabled)]
pub struct FraRow {
    #[tabled(rename = "#")]
    pub sequence: u32,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Start")]
    pub start_date: Date,
    #[tabled(rename = "End")]
    pub end_date: Date,
    #[tabled(rename = "Futures Rate")]
    pub futures_rate: Decimal,
    #[tabled(rename = "Adjustment")]
    pub adjustment: Decimal,
    #[tabled(rename = "FRA Rate")]
    pub forward_rate: Decimal,
    #[tabled(rename = "Basis")]
    pub day_count: DayCountConvention,
}

impl FraRow {
    fn new(contract: &FuturesContract, futures_rate: Decimal, fra: &ForwardRateAgreement) -> Self {
        Self {
            sequence: contract.sequence_number(),
            code: contract.code().unwrap_or_default(),
            start_date: fra.start_date(),
            end_date: fra.end_date(),
            futures_rate,
            adjustment: (futures_rate - fra.forward_rate()).round_dp(RATE_DP),
            forward_rate: fra.forward_rate().round_dp(RATE_DP),
            day_count: fra.day_count(),
        }
    }
}

impl MinimalRow for FraRow {
    fn minimal(&self) -> String {
        self.forward_rate.to_string()
    }
}

fn futures_rates(args: &ConvertArgs, count: usize) -> Result<Vec<Decimal>> {
    let rates = if args.price.is_empty() {
        args.rate
            .iter()
            .map(|r| parse_decimal("rate", r))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        args.price
            .iter()
            .map(|p| {
                let price = parse_decimal("price", p)?;
                if price <= Decimal::ZERO || price >= Decimal::from(200) {
                    return Err(CliError::InvalidPrice(p.clone()));
                }
                Ok(rate_from_price(price))
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    match rates.as_slice() {
        [] => bail!("a futures rate or price is required"),
        [single] => Ok(vec![*single; count]),
        _ => Ok(rates),
    }
}

fn convexity_model(args: &ConvertArgs, configured: ConvexityModel) -> Result<ConvexityModel> {
    if let Some(ref convexity) = args.convexity {
        return Ok(ConvexityModel::linear(parse_decimal("convexity", convexity)?));
    }
    if let (Some(volatility), Some(mean_reversion)) = (args.hw_vol, args.hw_mean_reversion) {
        return Ok(ConvexityModel::hull_white(volatility, mean_reversion));
    }
    Ok(configured)
}

/// Execute the convert command.
pub fn execute(args: ConvertArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let valuation = parse_date(&args.date)?;
    let mut config = load_config(args.config.as_deref())?;
    if let Some(tenor) = args.tenor.as_deref() {
        config = config.with_tenor(parse_tenor(tenor)?);
    }
    let tenor = config.tenor;
    let model = convexity_model(&args, config.convexity)?;
    debug!(?model, parallel = args.parallel, "convexity model selected");

    let contracts = config.generate(valuation, args.count)?;
    let rates = futures_rates(&args, contracts.len())?;
    let engine = config.engine();

    let fras = if args.parallel {
        convert_series_parallel(&engine, &contracts, &rates, &model)?
    } else {
        convert_series(&engine, &contracts, &rates, &model)?
    };

    let rows: Vec<FraRow> = contracts
        .iter()
        .zip(&rates)
        .zip(&fras)
        .map(|((contract, rate), fra)| FraRow::new(contract, *rate, fra))
        .collect();

    print_header(
        &format!("{} x {tenor} futures to FRA from {valuation}", args.count),
        format,
        quiet,
    );
    print_output(&rows, format)
}
