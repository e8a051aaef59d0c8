//! STIRX CLI - IMM futures strips and futures-to-FRA conversion.
//!
//! # Usage
//!
//! ```bash
//! # Next IMM date after a reference date
//! stirx imm --date 2020-05-05
//!
//! # Twelve 3M contracts
//! stirx series --date 2020-05-05 --count 12
//!
//! # Convert a strip quoted at 2% with a linear convexity of 0.01
//! stirx convert --date 2020-05-05 --count 8 --rate 0.02 --convexity 0.01
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,stirx=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Imm(args) => commands::imm::execute(args, format, quiet)?,
        Commands::Series(args) => commands::series::execute(args, format, quiet)?,
        Commands::Convert(args) => commands::convert::execute(args, format, quiet)?,
    }

    Ok(())
}
