//! Roll command implementation.
//!
//! Moves a date onto a business day under one or all rolling conventions.

use anyhow::Result;
use bankdate_core::calendars::{Calendar, RollingConvention};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, HolidayArgs};
use crate::output::{print_header, print_output};

/// Arguments for the roll command.
#[derive(Args, Debug)]
pub struct RollArgs {
    /// Date to roll (YYYY-MM-DD)
    pub date: String,

    /// Rolling convention. Without it every convention is shown.
    #[arg(short, long)]
    pub rolling: Option<String>,

    #[command(flatten)]
    pub holidays: HolidayArgs,
}

/// Result of rolling under one convention.
#[derive(Debug, Serialize, Tabled)]
pub struct RollRow {
    #[tabled(rename = "Adjusted")]
    pub adjusted: String,
    #[tabled(rename = "Weekday")]
    pub weekday: String,
    #[tabled(rename = "Convention")]
    pub convention: String,
    #[tabled(rename = "Shift (days)")]
    pub shift: i64,
}

/// Execute the roll command.
pub fn execute(args: RollArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let holidays = args.holidays.load(&[])?;

    let conventions = match &args.rolling {
        Some(name) => vec![name.parse::<RollingConvention>()?],
        None => RollingConvention::ALL.to_vec(),
    };

    let mut rows = Vec::with_capacity(conventions.len());
    for convention in conventions {
        let adjusted = holidays.adjust(date, convention)?;
        rows.push(RollRow {
            adjusted: adjusted.to_string(),
            weekday: adjusted.weekday_name().to_string(),
            convention: convention.to_string(),
            shift: date.nbr_of_days(&adjusted),
        });
    }

    if format == OutputFormat::Table {
        let status = if holidays.is_business_day(date) {
            "business day"
        } else {
            "not a business day"
        };
        print_header(&format!("{} ({}, {})", date, date.weekday_name(), status));
    }
    print_output(&rows, format)
}
