//! Add command implementation.
//!
//! Applies a chain of periods to a date, left to right.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_period};
use crate::output::{print_header, print_output};

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Start date (YYYY-MM-DD)
    pub date: String,

    /// Periods to add in order, e.g. 1y -3m 2d
    #[arg(required = true, allow_hyphen_values = true)]
    pub periods: Vec<String>,
}

/// One step of the chain.
#[derive(Debug, Serialize, Tabled)]
pub struct AddRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Weekday")]
    pub weekday: String,
    #[tabled(rename = "Added")]
    pub period: String,
}

/// Execute the add command.
pub fn execute(args: AddArgs, format: OutputFormat) -> Result<()> {
    let mut date = parse_date(&args.date)?;
    let mut rows = vec![AddRow {
        date: date.to_string(),
        weekday: date.weekday_name().to_string(),
        period: String::new(),
    }];

    for literal in &args.periods {
        let period = parse_period(literal)?;
        date = date.add_period(period)?;
        rows.push(AddRow {
            date: date.to_string(),
            weekday: date.weekday_name().to_string(),
            period: period.to_string(),
        });
    }

    match format {
        OutputFormat::Minimal => {
            println!("{date}");
            Ok(())
        }
        OutputFormat::Table => {
            print_header("Period Arithmetic");
            print_output(&rows, format)
        }
        _ => print_output(&rows, format),
    }
}
