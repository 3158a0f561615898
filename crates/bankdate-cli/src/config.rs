//! Schedule request files.
//!
//! A request file holds a schedule specification and the holidays to roll
//! against. TOML and JSON are accepted, chosen by file extension:
//!
//! ```toml
//! holidays = ["2025-12-25", "2025-12-26"]
//!
//! [schedule]
//! end = "2027-03-15"      # or a number of steps, e.g. end = 6
//! start = "2024-11-20"
//! step = "6m"
//! keep_start_date = true
//! rolling = "ModifiedFollowing"
//! ```

use std::path::Path;

use bankdate_core::calendars::HolidayList;
use bankdate_core::schedule::ScheduleSpec;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Contents of a schedule request file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleFile {
    /// The schedule to generate
    pub schedule: ScheduleSpec,
    /// Holiday dates (YYYY-MM-DD)
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl ScheduleFile {
    /// Loads a request file, TOML unless the extension is `.json`.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let file = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        };
        file.map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parses the listed holidays.
    pub fn holiday_list(&self) -> CliResult<HolidayList> {
        Ok(HolidayList::parse(&self.holidays)?)
    }
}

/// Reads a holiday file with one date per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_holiday_file(path: &Path) -> CliResult<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}
