//! Series command implementation.
//!
//! Generates a chained strip of futures contracts.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use stirx_core::{Date, Tenor};
use stirx_futures::FuturesContract;

use crate::cli::OutputFormat;
use crate::commands::{load_config, parse_date, parse_tenor};
use crate::output::{print_header, print_output, MinimalRow};

/// Arguments for the series command.
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Valuation date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Number of contracts
    #[arg(short = 'n', long)]
    pub count: u32,

    /// Contract tenor, e.g. 3M. Overrides the configuration file.
    #[arg(short, long)]
    pub tenor: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(short, long, env = "STIRX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// One generated contract.
#[derive(Debug, Serialize, Tabled)]
pub struct ContractRow {
    #[tabled(rename = "#")]
    pub sequence: u32,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Start")]
    pub start_date: Date,
    #[tabled(rename = "End")]
    pub end_date: Date,
    #[tabled(rename = "Last Trade")]
    pub last_trading_date: Date,
    #[tabled(rename = "Tenor")]
    pub tenor: Tenor,
    #[tabled(rename = "BPV")]
    pub basis_point_value: Decimal,
}

impl From<&FuturesContract> for ContractRow {
    fn from(contract: &FuturesContract) -> Self {
        Self {
            sequence: contract.sequence_number(),
            code: contract.code().unwrap_or_default(),
            start_date: contract.start_date(),
            end_date: contract.end_date(),
            last_trading_date: contract.last_trading_date(),
            tenor: contract.tenor(),
            basis_point_value: contract.basis_point_value(),
        }
    }
}

impl MinimalRow for ContractRow {
    fn minimal(&self) -> String {
        format!("{} {}", self.start_date, self.end_date)
    }
}

/// Execute the series command.
pub fn execute(args: SeriesArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let valuation = parse_date(&args.date)?;
    let mut config = load_config(args.config.as_deref())?;
    if let Some(tenor) = args.tenor.as_deref() {
        config = config.with_tenor(parse_tenor(tenor)?);
    }
    let tenor = config.tenor;

    let contracts = config.generate(valuation, args.count)?;
    let rows: Vec<ContractRow> = contracts.iter().map(ContractRow::from).collect();

    print_header(
        &format!("{} x {tenor} futures from {valuation}", args.count),
        format,
        quiet,
    );
    print_output(&rows, format)
}
