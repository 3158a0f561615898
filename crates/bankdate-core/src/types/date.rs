//! Banking date type and its period arithmetic.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::period::{Period, TimeUnit};
use crate::calendars::{self, Calendar, RollingConvention};
use crate::error::{CalendarError, CalendarResult};

/// A calendar date with banking arithmetic.
///
/// This is a newtype wrapper around `chrono::NaiveDate`; the wrapped date is
/// always a valid Gregorian date. Arithmetic never mutates, it returns a new
/// `BankDate`.
///
/// # Example
///
/// ```rust
/// use bankdate_core::types::{BankDate, Period};
///
/// let date = BankDate::parse("2021-01-31").unwrap();
/// let next = date.add_period(Period::months(1)).unwrap();
/// assert_eq!(next.to_string(), "2021-02-28");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankDate(NaiveDate);

impl BankDate {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidDateLiteral` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(BankDate)
            .ok_or_else(|| CalendarError::invalid_date(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Creates a date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidDateLiteral` if the string is not a
    /// valid date in that format.
    pub fn parse(s: &str) -> CalendarResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(BankDate)
            .map_err(|_| CalendarError::invalid_date(s))
    }

    /// Returns today's local date.
    #[must_use]
    pub fn today() -> Self {
        BankDate(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the day of week as a number, Monday = 0 through Sunday = 6.
    #[must_use]
    pub fn weekday_number(&self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }

    /// Returns the abbreviated day name, e.g. `"Wed"`.
    #[must_use]
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday() {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the actual number of days in the date's month (leap aware).
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 if self.0.leap_year() => 29,
            month => Self::ultimo(month),
        }
    }

    /// Last day of a month ignoring leap years (February is always 28).
    ///
    /// Used for day clamping in month arithmetic, not for reporting month
    /// lengths; see [`BankDate::days_in_month`] for that.
    #[must_use]
    pub fn ultimo(month: u32) -> u32 {
        match month {
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// True when the day equals [`BankDate::ultimo`] of the month.
    #[must_use]
    pub fn is_ultimo(&self) -> bool {
        self.day() == Self::ultimo(self.month())
    }

    /// Adds a period to the date.
    ///
    /// Weeks are seven days; months and years go through
    /// [`BankDate::add_months`] and [`BankDate::add_years`].
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::DateOutOfRange` if the result cannot be
    /// represented.
    pub fn add_period(&self, period: Period) -> CalendarResult<Self> {
        match period.unit() {
            TimeUnit::Year => self.add_years(period.count()),
            TimeUnit::Month => self.add_months(period.count()),
            TimeUnit::Week => self.add_days(7 * i64::from(period.count())),
            TimeUnit::Day => self.add_days(i64::from(period.count())),
        }
    }

    /// Subtracts a period from the date.
    pub fn sub_period(&self, period: Period) -> CalendarResult<Self> {
        self.add_period(period.negate())
    }

    /// Adds a period if there is one; `None` returns the date unchanged.
    pub fn add_optional(&self, period: Option<Period>) -> CalendarResult<Self> {
        match period {
            Some(period) => self.add_period(period),
            None => Ok(*self),
        }
    }

    /// Adds a period literal such as `"3m"`.
    ///
    /// Text that is not a period literal leaves the date unchanged, which
    /// keeps chains like `d.add_tenor("1y")?.add_tenor("-2d")?` total.
    pub fn add_tenor(&self, literal: &str) -> CalendarResult<Self> {
        let period = Period::parse(literal);
        if period.is_none() {
            tracing::debug!(literal, date = %self, "Ignoring non-period literal");
        }
        self.add_optional(period)
    }

    /// Adds a number of calendar days.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::DateOutOfRange` on overflow.
    pub fn add_days(&self, days: i64) -> CalendarResult<Self> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(BankDate)
            .ok_or_else(|| CalendarError::out_of_range(format!("{self} + {days}d")))
    }

    /// Adds a number of months.
    ///
    /// The day is clamped to [`BankDate::ultimo`] of the target month, so
    /// Jan 31 + 1 month is Feb 28 (also in leap years).
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::DateOutOfRange` if the target year is out of
    /// range.
    pub fn add_months(&self, months: i32) -> CalendarResult<Self> {
        let total = i64::from(self.month()) + i64::from(months);
        let mut year = i64::from(self.year()) + total.div_euclid(12);
        let month = match total.rem_euclid(12) {
            // Month indices run 1-12, so an exact multiple of 12 is December
            // of the previous year.
            0 => {
                year -= 1;
                12
            }
            m => m as u32,
        };
        let day = self.day().min(Self::ultimo(month));
        Self::checked_ymd(year, month, day, || format!("{self} + {months}m"))
    }

    /// Adds a number of years keeping month and day.
    ///
    /// Feb 29 moved into a non-leap year becomes Feb 28.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::DateOutOfRange` if the target year is out of
    /// range.
    pub fn add_years(&self, years: i32) -> CalendarResult<Self> {
        let year = i64::from(self.year()) + i64::from(years);
        let mut day = self.day();
        if self.month() == 2 && day == 29 && !i32::try_from(year).is_ok_and(is_leap_year) {
            day = 28;
        }
        Self::checked_ymd(year, self.month(), day, || format!("{self} + {years}y"))
    }

    fn checked_ymd(
        year: i64,
        month: u32,
        day: u32,
        describe: impl FnOnce() -> String,
    ) -> CalendarResult<Self> {
        i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .map(BankDate)
            .ok_or_else(|| CalendarError::out_of_range(describe()))
    }

    /// Signed number of days from `self` to `other`, positive when `other`
    /// is later.
    #[must_use]
    pub fn nbr_of_days(&self, other: &BankDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Signed number of whole months from `self` to `other`.
    ///
    /// A partial month is not counted: from Jan 15 to Mar 10 is one month.
    #[must_use]
    pub fn nbr_of_months(&self, other: &BankDate) -> i32 {
        let (earlier, later, sign) = if self < other {
            (self, other, 1)
        } else {
            (other, self, -1)
        };
        let mut months = (later.year() - earlier.year()) * 12 + later.month() as i32
            - earlier.month() as i32;
        if later.day() < earlier.day() {
            months -= 1;
        }
        sign * months
    }

    /// Signed number of whole years from `self` to `other`, truncated
    /// toward zero.
    #[must_use]
    pub fn nbr_of_years(&self, other: &BankDate) -> i32 {
        let months = self.nbr_of_months(other);
        months.signum() * (months.abs() / 12)
    }

    /// First day of the date's month.
    pub fn first_day_in_month(&self) -> CalendarResult<Self> {
        self.add_days(1 - i64::from(self.day()))
    }

    /// Next (or, with `future == false`, previous) IMM date: the third
    /// Wednesday of March, June, September or December.
    ///
    /// The IMM month is always strictly after (before) the current month,
    /// measured from the first day of the current month.
    pub fn next_imm_date(&self, future: bool) -> CalendarResult<Self> {
        let month = self.month() as i32;
        let add_months = if future {
            3 - month % 3
        } else {
            match month % 3 {
                0 => -3,
                m => -m,
            }
        };
        let first = self.first_day_in_month()?.add_months(add_months)?;
        // Third Wednesday counted from the first of the month.
        let add_days = 14 + (9 - i64::from(first.weekday_number())) % 7;
        first.add_days(add_days)
    }

    /// Moves the date onto a business day of `calendar`.
    pub fn adjust_to_banking_day<C: Calendar + ?Sized>(
        &self,
        convention: RollingConvention,
        calendar: &C,
    ) -> CalendarResult<Self> {
        calendars::adjust(*self, convention, calendar)
    }
}

impl fmt::Display for BankDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for BankDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for BankDate {
    fn from(date: NaiveDate) -> Self {
        BankDate(date)
    }
}

impl From<BankDate> for NaiveDate {
    fn from(date: BankDate) -> Self {
        date.0
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> BankDate {
        BankDate::parse(s).unwrap()
    }

    #[test]
    fn test_date_creation() {
        let date = BankDate::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(BankDate::from_ymd(2025, 2, 30).is_err());
        assert!(BankDate::from_ymd(2025, 13, 1).is_err());
        assert!(BankDate::parse("2021-02-29").is_err());
        assert!(BankDate::parse("20210101").is_err());
        assert!(BankDate::parse("not a date").is_err());
        assert!(BankDate::parse("2020-02-29").is_ok());
    }

    #[test]
    fn test_ultimo() {
        assert_eq!(BankDate::ultimo(1), 31);
        assert_eq!(BankDate::ultimo(2), 28);
        assert_eq!(BankDate::ultimo(4), 30);
        assert_eq!(BankDate::ultimo(12), 31);
        assert!(d("2021-04-30").is_ultimo());
        assert!(d("2024-02-28").is_ultimo());
        assert!(!d("2024-02-29").is_ultimo());
        assert!(!d("2021-01-30").is_ultimo());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(d("2024-02-10").days_in_month(), 29);
        assert_eq!(d("2023-02-10").days_in_month(), 28);
        assert_eq!(d("2023-11-10").days_in_month(), 30);
    }

    #[test]
    fn test_add_months_clamps_to_ultimo() {
        assert_eq!(d("2021-01-31").add_months(1).unwrap(), d("2021-02-28"));
        assert_eq!(d("2024-01-31").add_months(1).unwrap(), d("2024-02-28"));
        assert_eq!(d("2021-03-31").add_months(1).unwrap(), d("2021-04-30"));
        assert_eq!(d("2021-08-31").add_months(-2).unwrap(), d("2021-06-30"));
    }

    #[test]
    fn test_add_months_year_rollover() {
        assert_eq!(d("2021-01-15").add_months(-1).unwrap(), d("2020-12-15"));
        assert_eq!(d("2021-12-15").add_months(1).unwrap(), d("2022-01-15"));
        assert_eq!(d("2021-06-15").add_months(6).unwrap(), d("2021-12-15"));
        assert_eq!(d("2021-06-15").add_months(18).unwrap(), d("2022-12-15"));
        assert_eq!(d("2021-06-15").add_months(-18).unwrap(), d("2019-12-15"));
        assert_eq!(d("2021-01-15").add_months(-13).unwrap(), d("2019-12-15"));
        assert_eq!(d("2021-05-15").add_months(-5).unwrap(), d("2020-12-15"));
    }

    #[test]
    fn test_add_years() {
        assert_eq!(d("2021-03-14").add_years(3).unwrap(), d("2024-03-14"));
        assert_eq!(d("2021-03-14").add_years(-21).unwrap(), d("2000-03-14"));
        assert_eq!(d("2024-02-29").add_years(1).unwrap(), d("2025-02-28"));
        assert_eq!(d("2024-02-29").add_years(4).unwrap(), d("2028-02-29"));
    }

    #[test]
    fn test_add_period_dispatch() {
        let date = d("2021-01-29");
        assert_eq!(date.add_period(Period::days(3)).unwrap(), d("2021-02-01"));
        assert_eq!(date.add_period(Period::weeks(-1)).unwrap(), d("2021-01-22"));
        assert_eq!(date.add_period(Period::months(1)).unwrap(), d("2021-02-28"));
        assert_eq!(date.add_period(Period::years(1)).unwrap(), d("2022-01-29"));
        assert_eq!(date.sub_period(Period::months(1)).unwrap(), d("2020-12-29"));
    }

    #[test]
    fn test_optional_and_tenor() {
        let date = d("2021-06-01");
        assert_eq!(date.add_optional(None).unwrap(), date);
        assert_eq!(date.add_tenor("garbage").unwrap(), date);
        assert_eq!(
            date.add_tenor("1y").unwrap().add_tenor("-1d").unwrap(),
            d("2022-05-31")
        );
    }

    #[test]
    fn test_out_of_range() {
        let max = BankDate::from(NaiveDate::MAX);
        assert!(matches!(
            max.add_days(1),
            Err(CalendarError::DateOutOfRange { .. })
        ));
        assert!(max.add_years(i32::MAX).is_err());
        assert!(max.add_months(12).is_err());
    }

    #[test]
    fn test_nbr_of_days() {
        let d1 = d("2025-01-01");
        let d2 = d("2025-01-31");
        assert_eq!(d1.nbr_of_days(&d2), 30);
        assert_eq!(d2.nbr_of_days(&d1), -30);
        assert_eq!(d1.nbr_of_days(&d1), 0);
    }

    #[test]
    fn test_nbr_of_months() {
        assert_eq!(d("2021-03-10").nbr_of_months(&d("2021-01-15")), -1);
        assert_eq!(d("2021-01-15").nbr_of_months(&d("2021-03-10")), 1);
        assert_eq!(d("2021-01-15").nbr_of_months(&d("2021-03-15")), 2);
        assert_eq!(d("2021-01-31").nbr_of_months(&d("2021-02-28")), 0);
        assert_eq!(d("2021-01-15").nbr_of_months(&d("2021-01-15")), 0);
        assert_eq!(d("2019-11-20").nbr_of_months(&d("2021-02-19")), 14);
    }

    #[test]
    fn test_nbr_of_years() {
        assert_eq!(d("2021-01-15").nbr_of_years(&d("2023-01-14")), 1);
        assert_eq!(d("2021-01-15").nbr_of_years(&d("2023-01-15")), 2);
        assert_eq!(d("2023-01-14").nbr_of_years(&d("2021-01-15")), -1);
        assert_eq!(d("2021-01-15").nbr_of_years(&d("2021-12-31")), 0);
        assert_eq!(d("2021-12-31").nbr_of_years(&d("2021-01-15")), 0);
    }

    #[test]
    fn test_first_day_in_month() {
        assert_eq!(d("2021-03-31").first_day_in_month().unwrap(), d("2021-03-01"));
        assert_eq!(d("2021-03-01").first_day_in_month().unwrap(), d("2021-03-01"));
    }

    #[test]
    fn test_next_imm_date() {
        assert_eq!(d("2021-01-05").next_imm_date(true).unwrap(), d("2021-03-17"));
        assert_eq!(d("2021-03-01").next_imm_date(true).unwrap(), d("2021-06-16"));
        assert_eq!(d("2021-12-30").next_imm_date(true).unwrap(), d("2022-03-16"));
        // September 2022 starts on a Thursday.
        assert_eq!(d("2022-07-10").next_imm_date(true).unwrap(), d("2022-09-21"));
        // June 2018 starts on a Friday.
        assert_eq!(d("2018-04-02").next_imm_date(true).unwrap(), d("2018-06-20"));
    }

    #[test]
    fn test_previous_imm_date() {
        assert_eq!(d("2021-01-05").next_imm_date(false).unwrap(), d("2020-12-16"));
        assert_eq!(d("2021-03-31").next_imm_date(false).unwrap(), d("2020-12-16"));
        assert_eq!(d("2021-05-20").next_imm_date(false).unwrap(), d("2021-03-17"));
    }

    #[test]
    fn test_weekday_queries() {
        let date = d("2021-03-17");
        assert_eq!(date.weekday(), Weekday::Wed);
        assert_eq!(date.weekday_number(), 2);
        assert_eq!(date.weekday_name(), "Wed");
        assert!(!date.is_weekend());
        assert!(d("2021-03-20").is_weekend());
        assert_eq!(d("2021-03-21").weekday_number(), 6);
    }

    #[test]
    fn test_display_and_from_str() {
        let date: BankDate = "2025-06-05".parse().unwrap();
        assert_eq!(format!("{}", date), "2025-06-05");
        assert_eq!(NaiveDate::from(date), NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
    }

    #[test]
    fn test_serde() {
        let date = BankDate::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: BankDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
