//! IMM command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::parse_date_or_today;
use crate::output::{print_header, print_output};

/// Arguments for the imm command.
#[derive(Args, Debug)]
pub struct ImmArgs {
    /// Reference date (YYYY-MM-DD). Defaults to today.
    pub date: Option<String>,

    /// Walk backward to previous IMM dates
    #[arg(short, long)]
    pub previous: bool,

    /// Number of IMM dates to list
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

/// One IMM date.
#[derive(Debug, Serialize, Tabled)]
pub struct ImmRow {
    #[tabled(rename = "IMM Date")]
    pub date: String,
    #[tabled(rename = "Days Away")]
    pub days_away: i64,
}

/// Execute the imm command.
pub fn execute(args: ImmArgs, format: OutputFormat) -> Result<()> {
    let reference = parse_date_or_today(args.date.as_deref())?;

    let mut rows = Vec::with_capacity(args.count);
    let mut current = reference;
    for _ in 0..args.count {
        current = current.next_imm_date(!args.previous)?;
        rows.push(ImmRow {
            date: current.to_string(),
            days_away: reference.nbr_of_days(&current),
        });
    }

    if format == OutputFormat::Table {
        let direction = if args.previous { "Previous" } else { "Next" };
        print_header(&format!("{direction} IMM dates from {reference}"));
    }
    print_output(&rows, format)
}
