//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// A row that can be reduced to a single value for `--format minimal`.
pub trait MinimalRow {
    /// The row's headline value.
    fn minimal(&self) -> String;
}

/// Formats and prints rows based on the specified format.
pub fn print_output<T>(data: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled + MinimalRow,
{
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints one headline value per row.
fn print_minimal<T: MinimalRow>(data: &[T]) -> anyhow::Result<()> {
    for item in data {
        println!("{}", item.minimal());
    }
    Ok(())
}

/// Prints a header for a section; table output only, and never when quiet.
pub fn print_header(title: &str, format: OutputFormat, quiet: bool) {
    if format == OutputFormat::Table && !quiet {
        println!("\n{}", title.bold().underline());
    }
}
