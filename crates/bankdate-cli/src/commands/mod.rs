//! CLI command implementations.

pub mod add;
pub mod count;
pub mod diff;
pub mod imm;
pub mod roll;
pub mod schedule;

// Re-export submodules for convenience
pub use add::AddArgs;
pub use count::CountArgs;
pub use diff::DiffArgs;
pub use imm::ImmArgs;
pub use roll::RollArgs;
pub use schedule::ScheduleArgs;

use std::path::PathBuf;

use bankdate_core::calendars::HolidayList;
use bankdate_core::types::{BankDate, Period};
use clap::Args;

use crate::config::read_holiday_file;
use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<BankDate> {
    BankDate::parse(s.trim()).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
pub fn parse_date_or_today(s: Option<&str>) -> CliResult<BankDate> {
    s.map_or_else(|| Ok(BankDate::today()), parse_date)
}

/// Parses a period literal such as `6m`.
pub fn parse_period(s: &str) -> CliResult<Period> {
    Period::parse(s.trim()).ok_or_else(|| CliError::InvalidPeriod(s.to_string()))
}

/// Holiday options shared by the commands that roll dates.
#[derive(Args, Debug, Default)]
pub struct HolidayArgs {
    /// Holiday date (YYYY-MM-DD); repeat or separate with commas
    #[arg(long = "holiday", value_delimiter = ',')]
    pub holidays: Vec<String>,

    /// File with one holiday date per line
    #[arg(long)]
    pub holidays_file: Option<PathBuf>,
}

impl HolidayArgs {
    /// Builds the holiday list from inline dates, the file, and `extra`.
    pub fn load(&self, extra: &[String]) -> CliResult<HolidayList> {
        let mut literals: Vec<String> = extra.to_vec();
        literals.extend(self.holidays.iter().cloned());
        if let Some(path) = &self.holidays_file {
            literals.extend(read_holiday_file(path)?);
        }
        let holidays = HolidayList::parse(&literals)?;
        tracing::debug!(count = holidays.len(), "Loaded holidays");
        Ok(holidays)
    }
}
