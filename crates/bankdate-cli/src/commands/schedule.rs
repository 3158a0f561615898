//! Schedule command implementation.
//!
//! Generates business-day-adjusted dates stepping back from an end date to
//! a start date.

use std::path::PathBuf;

use anyhow::Result;
use bankdate_core::calendars::RollingConvention;
use bankdate_core::schedule::{ScheduleEnd, ScheduleSpec};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_period, HolidayArgs};
use crate::config::ScheduleFile;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_output};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// End date (YYYY-MM-DD), or a number of steps after the start date
    #[arg(allow_negative_numbers = true)]
    pub end: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub start: Option<String>,

    /// Step between dates, e.g. 6m, 1y, 2w (default: 1y)
    #[arg(long, allow_hyphen_values = true)]
    pub step: Option<String>,

    /// Rolling convention: Actual, Following, Previous, ModifiedFollowing, ModifiedPrevious
    #[arg(short, long)]
    pub rolling: Option<String>,

    /// Leave the start date out of the schedule
    #[arg(long)]
    pub drop_start: bool,

    /// Schedule request file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub holidays: HolidayArgs,
}

/// One schedule row.
#[derive(Debug, Serialize, Tabled)]
pub struct ScheduleRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Weekday")]
    pub weekday: String,
    #[tabled(rename = "Days From Start")]
    pub days_from_start: i64,
}

/// Parses the positional end argument.
fn parse_end(s: &str) -> CliResult<ScheduleEnd> {
    match s.trim().parse::<i32>() {
        Ok(periods) => Ok(ScheduleEnd::Periods(periods)),
        Err(_) => parse_date(s).map(ScheduleEnd::Date),
    }
}

/// Combines the request file (if any) with command-line overrides.
fn build_spec(args: &ScheduleArgs) -> CliResult<(ScheduleSpec, Vec<String>)> {
    let (base, file_holidays) = match &args.config {
        Some(path) => {
            let file = ScheduleFile::load(path)?;
            (Some(file.schedule), file.holidays)
        }
        None => (None, Vec::new()),
    };

    let mut spec = match (&args.end, base) {
        (Some(end), Some(base)) => ScheduleSpec {
            end: parse_end(end)?,
            ..base
        },
        (Some(end), None) => ScheduleSpec::new(parse_end(end)?),
        (None, Some(base)) => base,
        (None, None) => return Err(CliError::MissingArgument("END or --config".to_string())),
    };

    if let Some(start) = &args.start {
        spec = spec.with_start(parse_date(start)?);
    }
    if let Some(step) = &args.step {
        spec = spec.with_step(parse_period(step)?);
    }
    if let Some(rolling) = &args.rolling {
        spec = spec.with_rolling(rolling.parse::<RollingConvention>()?);
    }
    if args.drop_start {
        spec = spec.with_keep_start_date(false);
    }

    Ok((spec, file_holidays))
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, format: OutputFormat) -> Result<()> {
    let (spec, file_holidays) = build_spec(&args)?;
    let holidays = args.holidays.load(&file_holidays)?;

    let dates = spec.dates(&holidays)?;
    tracing::info!(
        end = %spec.end,
        step = %spec.step,
        rolling = %spec.rolling,
        count = dates.len(),
        "Schedule generated"
    );

    let first = dates.first().copied();
    let rows: Vec<ScheduleRow> = dates
        .iter()
        .map(|date| ScheduleRow {
            date: date.to_string(),
            weekday: date.weekday_name().to_string(),
            days_from_start: first.map_or(0, |f| f.nbr_of_days(date)),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!(
            "Schedule ({} every {}, {})",
            spec.end,
            spec.step.abs(),
            spec.rolling
        ));
    }
    print_output(&rows, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankdate_core::types::{BankDate, Period};

    fn args(end: Option<&str>) -> ScheduleArgs {
        ScheduleArgs {
            end: end.map(ToString::to_string),
            start: None,
            step: None,
            rolling: None,
            drop_start: false,
            config: None,
            holidays: HolidayArgs::default(),
        }
    }

    #[test]
    fn test_parse_end() {
        assert_eq!(parse_end("3").unwrap(), ScheduleEnd::Periods(3));
        assert_eq!(parse_end("-2").unwrap(), ScheduleEnd::Periods(-2));
        assert_eq!(
            parse_end("2025-01-31").unwrap(),
            ScheduleEnd::Date(BankDate::parse("2025-01-31").unwrap())
        );
        assert!(matches!(parse_end("soon"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_build_spec_overrides() {
        let mut a = args(Some("4"));
        a.start = Some("2021-01-15".to_string());
        a.step = Some("3m".to_string());
        a.rolling = Some("following".to_string());
        a.drop_start = true;
        let (spec, holidays) = build_spec(&a).unwrap();
        assert_eq!(spec.end, ScheduleEnd::Periods(4));
        assert_eq!(spec.start, Some(BankDate::parse("2021-01-15").unwrap()));
        assert_eq!(spec.step, Period::months(3));
        assert_eq!(spec.rolling, RollingConvention::Following);
        assert!(!spec.keep_start_date);
        assert!(holidays.is_empty());
    }

    #[test]
    fn test_build_spec_requires_end() {
        assert!(matches!(
            build_spec(&args(None)),
            Err(CliError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_build_spec_rejects_bad_step() {
        let mut a = args(Some("2"));
        a.step = Some("6 months".to_string());
        assert!(matches!(build_spec(&a), Err(CliError::InvalidPeriod(_))));
    }
}
