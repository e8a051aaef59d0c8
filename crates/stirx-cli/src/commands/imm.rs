//! IMM command implementation.
//!
//! Finds the next IMM date in a given month or across the quarterly cycle.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use stirx_core::Date;
use stirx_futures::imm::{imm_code, next_imm_date, next_quarterly_imm_date, ImmBoundary, ImmMonth};

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::output::{print_header, print_output, MinimalRow};

/// Arguments for the imm command.
#[derive(Args, Debug)]
pub struct ImmArgs {
    /// Reference date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// IMM month (3, 6, 9 or 12). Defaults to the whole quarterly cycle.
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Skip the reference date when it is itself an IMM date
    #[arg(short, long)]
    pub exclusive: bool,

    /// Number of successive IMM dates to list
    #[arg(short, long, default_value = "1")]
    pub count: u32,
}

/// One IMM date.
#[derive(Debug, Serialize, Tabled)]
pub struct ImmRow {
    #[tabled(rename = "#")]
    pub index: u32,
    #[tabled(rename = "IMM Date")]
    pub imm_date: Date,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Serial")]
    pub serial: i64,
}

impl MinimalRow for ImmRow {
    fn minimal(&self) -> String {
        self.imm_date.to_string()
    }
}

/// Execute the imm command.
pub fn execute(args: ImmArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let reference = parse_date(&args.date)?;
    let boundary = if args.exclusive {
        ImmBoundary::Exclusive
    } else {
        ImmBoundary::Inclusive
    };
    let month = args.month.map(ImmMonth::try_from).transpose()?;

    let mut rows = Vec::with_capacity(args.count as usize);
    let mut next = match month {
        Some(month) => next_imm_date(reference, month, boundary)?,
        None => next_quarterly_imm_date(reference, boundary)?,
    };

    for index in 1..=args.count {
        rows.push(ImmRow {
            index,
            imm_date: next,
            code: imm_code(next).unwrap_or_default(),
            serial: next.serial(),
        });
        if index < args.count {
            next = match month {
                Some(month) => next_imm_date(next, month, ImmBoundary::Exclusive)?,
                None => next_quarterly_imm_date(next, ImmBoundary::Exclusive)?,
            };
        }
    }

    let title = match month {
        Some(month) => format!("{month} IMM dates from {reference}"),
        None => format!("IMM dates from {reference}"),
    };
    print_header(&title, format, quiet);
    print_output(&rows, format)
}
