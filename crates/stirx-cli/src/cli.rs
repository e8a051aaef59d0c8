//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConvertArgs, ImmArgs, SeriesArgs};

/// STIRX - IMM futures strips and convexity-adjusted FRAs
#[derive(Parser)]
#[command(name = "stirx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log library activity to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Find the next IMM date
    Imm(ImmArgs),

    /// Generate a strip of futures contracts
    Series(SeriesArgs),

    /// Convert a futures strip into FRAs
    Convert(ConvertArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one value per line)
    Minimal,
}
