//! Business day rolling conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::{CalendarError, CalendarResult};
use crate::types::BankDate;

/// Maximum number of candidate dates inspected by a business-day scan.
pub const MAX_ROLL_ATTEMPTS: u32 = 30;

/// Rolling conventions.
///
/// These conventions specify how to move a date that falls on a
/// non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollingConvention {
    /// No adjustment - use the date as-is even if not a business day.
    #[default]
    Actual,

    /// Move to the following business day.
    Following,

    /// Move to the preceding business day.
    Previous,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPrevious,
}

impl RollingConvention {
    /// All conventions, in declaration order.
    pub const ALL: [RollingConvention; 5] = [
        RollingConvention::Actual,
        RollingConvention::Following,
        RollingConvention::Previous,
        RollingConvention::ModifiedFollowing,
        RollingConvention::ModifiedPrevious,
    ];

    /// Canonical name, as accepted by `FromStr`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RollingConvention::Actual => "Actual",
            RollingConvention::Following => "Following",
            RollingConvention::Previous => "Previous",
            RollingConvention::ModifiedFollowing => "ModifiedFollowing",
            RollingConvention::ModifiedPrevious => "ModifiedPrevious",
        }
    }
}

impl fmt::Display for RollingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RollingConvention {
    type Err = CalendarError;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so
    /// `"modified-following"` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| CalendarError::unknown_convention(s))
    }
}

/// Direction of a business-day scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollDirection {
    /// Towards later dates.
    Forward,
    /// Towards earlier dates.
    Backward,
}

impl RollDirection {
    /// Day step of one scan move.
    #[must_use]
    pub fn step(&self) -> i64 {
        match self {
            RollDirection::Forward => 1,
            RollDirection::Backward => -1,
        }
    }
}

impl TryFrom<i64> for RollDirection {
    type Error = CalendarError;

    fn try_from(step: i64) -> Result<Self, Self::Error> {
        match step {
            1 => Ok(RollDirection::Forward),
            -1 => Ok(RollDirection::Backward),
            _ => Err(CalendarError::InvalidRollDirection { step }),
        }
    }
}

/// Returns the first business day at or after (before) `date`.
///
/// At most [`MAX_ROLL_ATTEMPTS`] candidates are inspected, `date` itself
/// included.
///
/// # Errors
///
/// Returns `CalendarError::NoBusinessDayFound` when every candidate is a
/// weekend day or a holiday.
pub fn find_next_business_day<C: Calendar + ?Sized>(
    date: BankDate,
    direction: RollDirection,
    calendar: &C,
) -> CalendarResult<BankDate> {
    let mut candidate = date;
    for attempt in 0..MAX_ROLL_ATTEMPTS {
        if calendar.is_business_day(candidate) {
            return Ok(candidate);
        }
        tracing::trace!(%candidate, attempt, "Skipping non-business day");
        candidate = candidate.add_days(direction.step())?;
    }
    Err(CalendarError::NoBusinessDayFound {
        date: date.to_string(),
        attempts: MAX_ROLL_ATTEMPTS,
    })
}

/// Adjusts a date according to the given rolling convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: BankDate,
    convention: RollingConvention,
    calendar: &C,
) -> CalendarResult<BankDate> {
    let adjusted = match convention {
        RollingConvention::Actual => date,

        RollingConvention::Following => following(date, calendar)?,

        RollingConvention::Previous => previous(date, calendar)?,

        RollingConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar)?;
            if adjusted.month() == date.month() {
                adjusted
            } else {
                previous(date, calendar)?
            }
        }

        RollingConvention::ModifiedPrevious => {
            let adjusted = previous(date, calendar)?;
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)?
            }
        }
    };

    if adjusted != date {
        tracing::debug!(%date, %adjusted, %convention, "Rolled to business day");
    }
    Ok(adjusted)
}

fn following<C: Calendar + ?Sized>(date: BankDate, calendar: &C) -> CalendarResult<BankDate> {
    find_next_business_day(date, RollDirection::Forward, calendar)
}

fn previous<C: Calendar + ?Sized>(date: BankDate, calendar: &C) -> CalendarResult<BankDate> {
    find_next_business_day(date, RollDirection::Backward, calendar)
}
