//! Business day calendars and rolling conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait deciding which days are business days
//! - [`HolidayList`], a caller-supplied set of holidays on top of weekends
//! - [`RollingConvention`] and [`adjust`] for moving dates onto business days

use std::collections::HashSet;

mod conventions;

pub use conventions::{
    adjust, find_next_business_day, RollDirection, RollingConvention, MAX_ROLL_ATTEMPTS,
};

use crate::error::CalendarResult;
use crate::types::BankDate;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: BankDate) -> bool;

    /// Returns true if the date is not a business day.
    fn is_holiday(&self, date: BankDate) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the first business day at or after (before) `date`.
    fn find_next_business_day(
        &self,
        date: BankDate,
        direction: RollDirection,
    ) -> CalendarResult<BankDate> {
        conventions::find_next_business_day(date, direction, self)
    }

    /// Adjusts a date according to the given rolling convention.
    fn adjust(&self, date: BankDate, convention: RollingConvention) -> CalendarResult<BankDate> {
        conventions::adjust(date, convention, self)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn is_business_day(&self, date: BankDate) -> bool {
        !date.is_weekend()
    }
}

/// Holidays supplied for a single computation.
///
/// A date is a business day when it is Monday to Friday and not listed.
/// The list is only read by the engine; order and duplicates in the input
/// are irrelevant.
///
/// # Example
///
/// ```rust
/// use bankdate_core::calendars::{Calendar, HolidayList};
/// use bankdate_core::types::BankDate;
///
/// let holidays = HolidayList::parse(["2021-05-31", "2021-12-24"]).unwrap();
/// assert!(!holidays.is_business_day(BankDate::parse("2021-05-31").unwrap()));
/// assert!(holidays.is_business_day(BankDate::parse("2021-06-01").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayList {
    dates: HashSet<BankDate>,
}

impl HolidayList {
    /// Creates an empty holiday list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a holiday list from dates.
    pub fn from_dates(dates: impl IntoIterator<Item = BankDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Creates a holiday list from `YYYY-MM-DD` literals.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidDateLiteral` for the first literal that
    /// is not a valid date.
    pub fn parse<I, S>(literals: I) -> CalendarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dates = literals
            .into_iter()
            .map(|s| BankDate::parse(s.as_ref().trim()))
            .collect::<CalendarResult<HashSet<_>>>()?;
        Ok(Self { dates })
    }

    /// Returns true if the date is listed.
    #[must_use]
    pub fn contains(&self, date: &BankDate) -> bool {
        self.dates.contains(date)
    }

    /// Number of distinct listed dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no dates are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Listed dates in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<BankDate> {
        let mut dates: Vec<_> = self.dates.iter().copied().collect();
        dates.sort_unstable();
        dates
    }
}

impl Calendar for HolidayList {
    fn is_business_day(&self, date: BankDate) -> bool {
        !date.is_weekend() && !self.contains(&date)
    }
}

impl FromIterator<BankDate> for HolidayList {
    fn from_iter<T: IntoIterator<Item = BankDate>>(iter: T) -> Self {
        Self::from_dates(iter)
    }
}
