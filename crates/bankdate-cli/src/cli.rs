//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AddArgs, CountArgs, DiffArgs, ImmArgs, RollArgs, ScheduleArgs};

/// Bankdate - business-day-aware date arithmetic and schedules
#[derive(Parser)]
#[command(name = "bankdate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a business-day-adjusted date schedule
    Schedule(ScheduleArgs),

    /// Count whole periods between two dates
    Count(CountArgs),

    /// Roll a date onto a business day
    Roll(RollArgs),

    /// Add periods (e.g. 6m, -2d, 1y) to a date
    Add(AddArgs),

    /// Days, months and years between two dates
    Diff(DiffArgs),

    /// Next or previous IMM dates
    Imm(ImmArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (bare values, one per line)
    Minimal,
}
