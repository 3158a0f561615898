//! Signed, unit-typed time periods.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CalendarError, CalendarResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days.
    Day,
    /// Weeks of seven days.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TimeUnit {
    /// Returns the single-letter suffix used in period literals.
    #[must_use]
    pub fn suffix(&self) -> char {
        match self {
            TimeUnit::Day => 'd',
            TimeUnit::Week => 'w',
            TimeUnit::Month => 'm',
            TimeUnit::Year => 'y',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'd' => Some(TimeUnit::Day),
            'w' => Some(TimeUnit::Week),
            'm' => Some(TimeUnit::Month),
            'y' => Some(TimeUnit::Year),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// A relative time offset: a signed count of days, weeks, months or years.
///
/// Periods are immutable; every operation returns a new value. Text that is
/// not a period literal parses to `None` rather than to a zero-like value,
/// so "no offset" has to be handled explicitly by the caller.
///
/// Periods of different units are never ordered against each other, which
/// is why there is no `PartialOrd` implementation: use [`Period::compare`].
///
/// # Example
///
/// ```rust
/// use bankdate_core::types::{Period, TimeUnit};
///
/// let p = Period::parse("-3m").unwrap();
/// assert_eq!(p.count(), -3);
/// assert_eq!(p.unit(), TimeUnit::Month);
/// assert_eq!(p.negate().to_string(), "3m");
/// assert!(Period::parse("3x").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    count: i32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a period from a count and a unit.
    #[must_use]
    pub const fn new(count: i32, unit: TimeUnit) -> Self {
        Self { count, unit }
    }

    /// `count` days.
    #[must_use]
    pub const fn days(count: i32) -> Self {
        Self::new(count, TimeUnit::Day)
    }

    /// `count` weeks.
    #[must_use]
    pub const fn weeks(count: i32) -> Self {
        Self::new(count, TimeUnit::Week)
    }

    /// `count` months.
    #[must_use]
    pub const fn months(count: i32) -> Self {
        Self::new(count, TimeUnit::Month)
    }

    /// `count` years.
    #[must_use]
    pub const fn years(count: i32) -> Self {
        Self::new(count, TimeUnit::Year)
    }

    /// Parses a literal of the form `-?<digits><d|w|m|y>`.
    ///
    /// Returns `None` for anything else, including counts that do not fit
    /// in an `i32`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let unit = TimeUnit::from_suffix(chars.next_back()?)?;
        let number = chars.as_str();
        let digits = number.strip_prefix('-').unwrap_or(number);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        number.parse().ok().map(|count| Self::new(count, unit))
    }

    /// Returns the signed count.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns a copy with the count replaced.
    ///
    /// This is the only way to change a count after construction.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidPeriodValue` if `value` does not fit
    /// the period's integer count.
    pub fn with_count(&self, value: i64) -> CalendarResult<Self> {
        let count = i32::try_from(value).map_err(|_| {
            CalendarError::invalid_period_value(value, "count must be a 32-bit integer")
        })?;
        Ok(Self::new(count, self.unit))
    }

    /// Returns true if the count is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.count == 0
    }

    /// Flips the sign of the count.
    ///
    /// Count arithmetic saturates at the `i32` bounds, so `-2147483648d`
    /// negates to `2147483647d`. Any saturated count is already far outside
    /// the range of representable dates.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(self.count.saturating_neg(), self.unit)
    }

    /// Strips the sign of the count (saturating).
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.count.saturating_abs(), self.unit)
    }

    /// Adds an integer to the count (saturating).
    #[must_use]
    pub fn add_count(&self, n: i32) -> Self {
        Self::new(self.count.saturating_add(n), self.unit)
    }

    /// Subtracts an integer from the count (saturating).
    #[must_use]
    pub fn sub_count(&self, n: i32) -> Self {
        Self::new(self.count.saturating_sub(n), self.unit)
    }

    /// Adds the counts of two periods.
    ///
    /// Units are not reconciled: the result always carries the unit of
    /// `self`. Consequently `a.add(&b)` and `b.add(&a)` differ whenever the
    /// units differ (`1m + 2d = 3m`, `2d + 1m = 3d`).
    #[must_use]
    pub fn add(&self, other: &Period) -> Self {
        self.add_count(other.count)
    }

    /// Subtracts the count of `other`, keeping the unit of `self`.
    #[must_use]
    pub fn sub(&self, other: &Period) -> Self {
        self.add(&other.negate())
    }

    /// Scales the count, e.g. to turn "N steps of 6m" into one `6N m` jump.
    ///
    /// Saturates at the `i32` bounds; see [`Period::checked_multiply`].
    #[must_use]
    pub fn multiply(&self, factor: i32) -> Self {
        Self::new(self.count.saturating_mul(factor), self.unit)
    }

    /// Scales the count, returning `None` if it overflows.
    #[must_use]
    pub fn checked_multiply(&self, factor: i32) -> Option<Self> {
        self.count
            .checked_mul(factor)
            .map(|count| Self::new(count, self.unit))
    }

    /// Orders two periods of the same unit by count.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::IncompatibleUnits` if the units differ.
    pub fn compare(&self, other: &Period) -> CalendarResult<Ordering> {
        if self.unit != other.unit {
            return Err(CalendarError::IncompatibleUnits {
                left: self.unit,
                right: other.unit,
            });
        }
        Ok(self.count.cmp(&other.count))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit)
    }
}

impl FromStr for Period {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CalendarError::invalid_period_literal(s))
    }
}

impl TryFrom<String> for Period {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
