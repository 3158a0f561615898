//! Diff command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::output::{print_metrics, KeyValue};

/// Arguments for the diff command.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// From date (YYYY-MM-DD)
    pub from: String,

    /// To date (YYYY-MM-DD)
    pub to: String,
}

/// Execute the diff command.
pub fn execute(args: DiffArgs, format: OutputFormat) -> Result<()> {
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;

    let rows = vec![
        KeyValue::new("Days", from.nbr_of_days(&to)),
        KeyValue::new("Months", from.nbr_of_months(&to)),
        KeyValue::new("Years", from.nbr_of_years(&to)),
    ];
    print_metrics(&format!("{from} to {to}"), &rows, "Days", format)
}
