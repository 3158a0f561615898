//! Bankdate CLI - business-day calendar arithmetic from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Semi-annual schedule rolled Modified Following
//! bankdate schedule 2027-03-15 --start 2024-11-20 --step 6m --rolling ModifiedFollowing
//!
//! # Roll a date onto a business day
//! bankdate roll 2021-05-31 --holiday 2021-05-31
//!
//! # Period arithmetic and date differences
//! bankdate add 2021-01-31 1m
//! bankdate diff 2021-03-10 2021-01-15
//!
//! # Next IMM dates
//! bankdate imm 2021-01-05 --count 4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("bankdate=debug,bankdate_core=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, format)?,
        Commands::Count(args) => commands::count::execute(args, format)?,
        Commands::Roll(args) => commands::roll::execute(args, format)?,
        Commands::Add(args) => commands::add::execute(args, format)?,
        Commands::Diff(args) => commands::diff::execute(args, format)?,
        Commands::Imm(args) => commands::imm::execute(args, format)?,
    }

    Ok(())
}
