//! Count command implementation.

use anyhow::Result;
use bankdate_core::schedule::{period_count, ScheduleEnd};
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_date_or_today, parse_period};
use crate::output::{print_metrics, KeyValue};

/// Arguments for the count command.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// End date (YYYY-MM-DD)
    pub end: String,

    /// Start date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub start: Option<String>,

    /// Period to count, e.g. 6m (default: 1y)
    #[arg(long, default_value = "1y", allow_hyphen_values = true)]
    pub step: String,
}

/// Execute the count command.
pub fn execute(args: CountArgs, format: OutputFormat) -> Result<()> {
    let end = parse_date(&args.end)?;
    let start = parse_date_or_today(args.start.as_deref())?;
    let step = parse_period(&args.step)?;

    let count = period_count(ScheduleEnd::Date(end), Some(start), step)?;

    let rows = vec![
        KeyValue::new("Start", start),
        KeyValue::new("End", end),
        KeyValue::new("Step", step.abs()),
        KeyValue::new("Periods", count),
    ];
    print_metrics("Period Count", &rows, "Periods", format)
}
