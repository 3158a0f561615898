//! Schedule generation.
//!
//! A schedule is generated backward from its end date: the end date is
//! always included, then every `end - k * step` that is still after the
//! start date, and finally (optionally) the start date itself. Each
//! generated date is rolled onto a business day.
//!
//! # Example
//!
//! ```rust
//! use bankdate_core::calendars::{HolidayList, RollingConvention};
//! use bankdate_core::schedule::ScheduleSpec;
//! use bankdate_core::types::{BankDate, Period};
//!
//! let spec = ScheduleSpec::new(2)
//!     .with_start(BankDate::parse("2020-01-01").unwrap())
//!     .with_step(Period::years(1))
//!     .with_rolling(RollingConvention::Actual);
//!
//! let dates = spec.dates(&HolidayList::new()).unwrap();
//! let text: Vec<String> = dates.iter().map(ToString::to_string).collect();
//! assert_eq!(text, ["2020-01-01", "2021-01-01", "2022-01-01"]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendars::{adjust, Calendar, RollingConvention, WeekendCalendar};
use crate::error::{CalendarError, CalendarResult};
use crate::types::{BankDate, Period};

/// Where a schedule ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleEnd {
    /// A number of steps after the start date.
    Periods(i32),
    /// An explicit end date.
    Date(BankDate),
}

impl From<BankDate> for ScheduleEnd {
    fn from(date: BankDate) -> Self {
        ScheduleEnd::Date(date)
    }
}

impl From<i32> for ScheduleEnd {
    fn from(periods: i32) -> Self {
        ScheduleEnd::Periods(periods)
    }
}

impl fmt::Display for ScheduleEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleEnd::Periods(n) => write!(f, "{n} periods"),
            ScheduleEnd::Date(date) => write!(f, "{date}"),
        }
    }
}

fn default_step() -> Period {
    Period::years(1)
}

fn default_keep_start_date() -> bool {
    true
}

/// Parameters of a schedule.
///
/// Defaults: start today, yearly steps, start date kept, no rolling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    /// End date, or number of steps after the start date
    pub end: ScheduleEnd,
    /// Start date; today when absent
    #[serde(default)]
    pub start: Option<BankDate>,
    /// Step between dates; only its magnitude matters
    #[serde(default = "default_step")]
    pub step: Period,
    /// Whether the start date itself is part of the schedule
    #[serde(default = "default_keep_start_date")]
    pub keep_start_date: bool,
    /// Business day rolling applied to every date
    #[serde(default)]
    pub rolling: RollingConvention,
}

impl ScheduleSpec {
    /// Creates a schedule specification with defaults.
    #[must_use]
    pub fn new(end: impl Into<ScheduleEnd>) -> Self {
        Self {
            end: end.into(),
            start: None,
            step: default_step(),
            keep_start_date: default_keep_start_date(),
            rolling: RollingConvention::default(),
        }
    }

    /// Sets the start date.
    #[must_use]
    pub fn with_start(mut self, start: BankDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the step.
    #[must_use]
    pub fn with_step(mut self, step: Period) -> Self {
        self.step = step;
        self
    }

    /// Sets whether the start date is included.
    #[must_use]
    pub fn with_keep_start_date(mut self, keep: bool) -> Self {
        self.keep_start_date = keep;
        self
    }

    /// Sets the rolling convention.
    #[must_use]
    pub fn with_rolling(mut self, rolling: RollingConvention) -> Self {
        self.rolling = rolling;
        self
    }

    /// Returns the lazy date sequence, latest date first.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidPeriodValue` for a zero step, or
    /// `CalendarError::DateOutOfRange` if the end date cannot be computed.
    pub fn iter<'a, C: Calendar + ?Sized>(
        &self,
        calendar: &'a C,
    ) -> CalendarResult<DateRange<'a, C>> {
        if self.step.is_zero() {
            return Err(CalendarError::invalid_period_value(
                self.step,
                "schedule step must be non-zero",
            ));
        }

        let mut start = self.start.unwrap_or_else(BankDate::today);
        let mut end = match self.end {
            ScheduleEnd::Date(date) => date,
            ScheduleEnd::Periods(n) => {
                let span = self.step.checked_multiply(n).ok_or_else(|| {
                    CalendarError::out_of_range(format!("{start} + {n} x {}", self.step))
                })?;
                start.add_period(span)?
            }
        };
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        let step = self.step.abs().negate();

        tracing::debug!(%start, %end, %step, rolling = %self.rolling, "Resolved schedule bounds");

        Ok(DateRange {
            start,
            end,
            step,
            keep_start_date: self.keep_start_date,
            rolling: self.rolling,
            calendar,
            counter: 0,
            phase: Phase::Stepping,
        })
    }

    /// Returns the whole schedule in ascending order.
    pub fn dates<C: Calendar + ?Sized>(&self, calendar: &C) -> CalendarResult<Vec<BankDate>> {
        let mut dates = self.iter(calendar)?.collect::<CalendarResult<Vec<_>>>()?;
        dates.sort_unstable();
        tracing::debug!(count = dates.len(), "Generated schedule");
        Ok(dates)
    }

    /// Number of stepped dates, the start date never counted.
    pub fn period_count(&self) -> CalendarResult<usize> {
        let spec = self
            .clone()
            .with_keep_start_date(false)
            .with_rolling(RollingConvention::Actual);
        spec.iter(&WeekendCalendar)?
            .try_fold(0, |count, date| date.map(|_| count + 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stepping,
    Start,
    Done,
}

/// Lazy schedule sequence, from the end date backward to the start date.
///
/// Dates are computed as `end + k * step` rather than by repeated addition,
/// so month-end clamping on one step never leaks into the next. The
/// sequence stops after the first error.
pub struct DateRange<'a, C: ?Sized> {
    start: BankDate,
    end: BankDate,
    step: Period,
    keep_start_date: bool,
    rolling: RollingConvention,
    calendar: &'a C,
    counter: i32,
    phase: Phase,
}

impl<C: ?Sized> Clone for DateRange<'_, C> {
    fn clone(&self) -> Self {
        Self {
            calendar: self.calendar,
            ..*self
        }
    }
}

impl<C: ?Sized> fmt::Debug for DateRange<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRange")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("step", &self.step)
            .field("keep_start_date", &self.keep_start_date)
            .field("rolling", &self.rolling)
            .field("counter", &self.counter)
            .finish()
    }
}

impl<C: Calendar + ?Sized> DateRange<'_, C> {
    /// Resolved (earlier) start date.
    #[must_use]
    pub fn start(&self) -> BankDate {
        self.start
    }

    /// Resolved (later) end date.
    #[must_use]
    pub fn end(&self) -> BankDate {
        self.end
    }

    fn running_date(&self) -> CalendarResult<BankDate> {
        if self.counter == 0 {
            Ok(self.end)
        } else {
            let offset = self.step.checked_multiply(self.counter).ok_or_else(|| {
                CalendarError::out_of_range(format!(
                    "{} + {} x {}",
                    self.end, self.counter, self.step
                ))
            })?;
            self.end.add_period(offset)
        }
    }

    fn roll(&mut self, date: BankDate) -> Option<CalendarResult<BankDate>> {
        let rolled = adjust(date, self.rolling, self.calendar);
        if rolled.is_err() {
            self.phase = Phase::Done;
        }
        Some(rolled)
    }
}

impl<C: Calendar + ?Sized> Iterator for DateRange<'_, C> {
    type Item = CalendarResult<BankDate>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Stepping => match self.running_date() {
                Ok(running) if running > self.start => {
                    self.counter += 1;
                    self.roll(running)
                }
                // Stepping backward past the earliest representable date is
                // past the start date as well.
                Ok(_) | Err(CalendarError::DateOutOfRange { .. }) => {
                    self.phase = Phase::Start;
                    self.next()
                }
                Err(e) => {
                    self.phase = Phase::Done;
                    Some(Err(e))
                }
            },
            Phase::Start => {
                self.phase = Phase::Done;
                if self.keep_start_date {
                    self.roll(self.start)
                } else {
                    None
                }
            }
            Phase::Done => None,
        }
    }
}

/// Lazy schedule between `start` (today when `None`) and `end`.
pub fn daterange_iter<'a, C: Calendar + ?Sized>(
    end: impl Into<ScheduleEnd>,
    start: Option<BankDate>,
    step: Period,
    keep_start_date: bool,
    rolling: RollingConvention,
    calendar: &'a C,
) -> CalendarResult<DateRange<'a, C>> {
    spec_from(end, start, step, keep_start_date, rolling).iter(calendar)
}

/// Ascending schedule between `start` (today when `None`) and `end`.
pub fn daterange<C: Calendar + ?Sized>(
    end: impl Into<ScheduleEnd>,
    start: Option<BankDate>,
    step: Period,
    keep_start_date: bool,
    rolling: RollingConvention,
    calendar: &C,
) -> CalendarResult<Vec<BankDate>> {
    spec_from(end, start, step, keep_start_date, rolling).dates(calendar)
}

/// Number of whole steps between `start` (today when `None`) and `end`.
pub fn period_count(
    end: impl Into<ScheduleEnd>,
    start: Option<BankDate>,
    step: Period,
) -> CalendarResult<usize> {
    spec_from(end, start, step, false, RollingConvention::Actual).period_count()
}

fn spec_from(
    end: impl Into<ScheduleEnd>,
    start: Option<BankDate>,
    step: Period,
    keep_start_date: bool,
    rolling: RollingConvention,
) -> ScheduleSpec {
    ScheduleSpec {
        end: end.into(),
        start,
        step,
        keep_start_date,
        rolling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::HolidayList;

    fn d(s: &str) -> BankDate {
        BankDate::parse(s).unwrap()
    }

    fn texts(dates: &[BankDate]) -> Vec<String> {
        dates.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_periods_from_start() {
        let dates = daterange(
            2,
            Some(d("2020-01-01")),
            Period::years(1),
            true,
            RollingConvention::Actual,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(texts(&dates), ["2020-01-01", "2021-01-01", "2022-01-01"]);
    }

    #[test]
    fn test_backward_stepping_keeps_start() {
        let spec = ScheduleSpec::new(d("2025-07-15"))
            .with_start(d("2023-03-01"))
            .with_step(Period::months(6));
        let dates = spec.dates(&HolidayList::new()).unwrap();
        assert_eq!(
            texts(&dates),
            [
                "2023-03-01",
                "2023-07-15",
                "2024-01-15",
                "2024-07-15",
                "2025-01-15",
                "2025-07-15"
            ]
        );
        assert_eq!(spec.period_count().unwrap(), 5);
    }

    #[test]
    fn test_generation_order_is_descending() {
        let spec = ScheduleSpec::new(d("2025-07-15"))
            .with_start(d("2023-03-01"))
            .with_step(Period::months(6));
        let cal = WeekendCalendar;
        let lazy: Vec<_> = spec
            .iter(&cal)
            .unwrap()
            .collect::<CalendarResult<_>>()
            .unwrap();
        assert_eq!(lazy.first(), Some(&d("2025-07-15")));
        assert_eq!(lazy.last(), Some(&d("2023-03-01")));
    }

    #[test]
    fn test_drop_start_date() {
        let spec = ScheduleSpec::new(d("2025-07-15"))
            .with_start(d("2023-03-01"))
            .with_step(Period::months(6))
            .with_keep_start_date(false);
        let dates = spec.dates(&WeekendCalendar).unwrap();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], d("2023-07-15"));
    }

    #[test]
    fn test_no_month_end_drift() {
        let spec = ScheduleSpec::new(d("2021-08-31"))
            .with_start(d("2021-01-01"))
            .with_step(Period::months(1));
        let dates = spec.dates(&WeekendCalendar).unwrap();
        assert_eq!(
            texts(&dates),
            [
                "2021-01-01",
                "2021-01-31",
                "2021-02-28",
                "2021-03-31",
                "2021-04-30",
                "2021-05-31",
                "2021-06-30",
                "2021-07-31",
                "2021-08-31"
            ]
        );
    }

    #[test]
    fn test_end_before_start_is_swapped() {
        let forward = daterange(
            d("2022-01-01"),
            Some(d("2020-01-01")),
            Period::years(1),
            true,
            RollingConvention::Actual,
            &WeekendCalendar,
        )
        .unwrap();
        let swapped = daterange(
            d("2020-01-01"),
            Some(d("2022-01-01")),
            Period::years(1),
            true,
            RollingConvention::Actual,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(forward, swapped);

        let negative = daterange(
            -2,
            Some(d("2022-01-01")),
            Period::years(1),
            true,
            RollingConvention::Actual,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(forward, negative);
    }

    #[test]
    fn test_step_sign_is_ignored() {
        let positive = ScheduleSpec::new(d("2022-01-01"))
            .with_start(d("2021-01-01"))
            .with_step(Period::months(3));
        let negative = positive.clone().with_step(Period::months(-3));
        assert_eq!(
            positive.dates(&WeekendCalendar).unwrap(),
            negative.dates(&WeekendCalendar).unwrap()
        );
    }

    #[test]
    fn test_rolling_is_applied() {
        let holidays = HolidayList::parse(["2021-05-31"]).unwrap();
        let spec = ScheduleSpec::new(d("2021-05-31"))
            .with_start(d("2021-02-28"))
            .with_step(Period::months(1))
            .with_rolling(RollingConvention::ModifiedFollowing);
        let dates = spec.dates(&holidays).unwrap();
        // 2021-02-28 is a Sunday, 2021-03-31 a Wednesday, 2021-04-30 a Friday.
        assert_eq!(
            texts(&dates),
            ["2021-02-26", "2021-03-31", "2021-04-30", "2021-05-28"]
        );
    }

    #[test]
    fn test_start_equals_end() {
        let spec = ScheduleSpec::new(0).with_start(d("2021-06-01"));
        assert_eq!(texts(&spec.dates(&WeekendCalendar).unwrap()), ["2021-06-01"]);
        assert_eq!(spec.period_count().unwrap(), 0);
    }

    #[test]
    fn test_zero_step_rejected() {
        let spec = ScheduleSpec::new(d("2022-01-01"))
            .with_start(d("2021-01-01"))
            .with_step(Period::days(0));
        assert!(matches!(
            spec.iter(&WeekendCalendar),
            Err(CalendarError::InvalidPeriodValue { .. })
        ));
    }

    #[test]
    fn test_iteration_stops_after_error() {
        let start = d("2025-03-03");
        let holidays: HolidayList = (0..40).map(|i| start.add_days(i).unwrap()).collect();
        let spec = ScheduleSpec::new(d("2025-03-10"))
            .with_start(start)
            .with_step(Period::days(1))
            .with_rolling(RollingConvention::Following);
        let items: Vec<_> = spec.iter(&holidays).unwrap().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
        assert!(spec.dates(&holidays).is_err());
    }

    #[test]
    fn test_clone_restarts() {
        let spec = ScheduleSpec::new(4)
            .with_start(d("2021-01-15"))
            .with_step(Period::weeks(1));
        let range = spec.iter(&WeekendCalendar).unwrap();
        let first: Vec<_> = range.clone().collect();
        let second: Vec<_> = range.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_period_count_free_function() {
        let count = period_count(d("2030-06-15"), Some(d("2025-06-15")), Period::months(6));
        assert_eq!(count.unwrap(), 10);
        // 2025-06-16 is still after the start date, so it counts.
        let count = period_count(d("2030-06-16"), Some(d("2025-06-15")), Period::years(1));
        assert_eq!(count.unwrap(), 6);
    }

    #[test]
    fn test_resolved_bounds() {
        let range = daterange_iter(
            3,
            Some(d("2021-01-31")),
            Period::months(1),
            true,
            RollingConvention::Actual,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(range.start(), d("2021-01-31"));
        assert_eq!(range.end(), d("2021-04-30"));
    }

    #[test]
    fn test_spec_from_json() {
        let spec: ScheduleSpec = serde_json::from_str(
            r#"{"end": "2025-07-15", "start": "2023-03-01", "step": "6m", "rolling": "ModifiedFollowing"}"#,
        )
        .unwrap();
        assert_eq!(spec.end, ScheduleEnd::Date(d("2025-07-15")));
        assert_eq!(spec.step, Period::months(6));
        assert!(spec.keep_start_date);
        assert_eq!(spec.rolling, RollingConvention::ModifiedFollowing);

        let spec: ScheduleSpec = serde_json::from_str(r#"{"end": 4}"#).unwrap();
        assert_eq!(spec, ScheduleSpec::new(4));
    }

    #[test]
    fn test_overflowing_period_count_fails() {
        let spec = ScheduleSpec::new(100_000)
            .with_start(d("2025-01-01"))
            .with_step(Period::days(100_000));
        assert!(matches!(
            spec.dates(&WeekendCalendar),
            Err(CalendarError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            spec.period_count(),
            Err(CalendarError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_huge_step_keeps_both_ends() {
        let min_step = Period::parse("-2147483648d").unwrap();
        let spec = ScheduleSpec::new(d("2025-12-31"))
            .with_start(d("2025-01-01"))
            .with_step(min_step);
        let dates = spec.dates(&WeekendCalendar).unwrap();
        assert_eq!(texts(&dates), ["2025-01-01", "2025-12-31"]);
        assert_eq!(spec.period_count().unwrap(), 1);

        let yearly = ScheduleSpec::new(d("2025-12-31"))
            .with_start(d("2025-01-01"))
            .with_step(Period::years(i32::MAX));
        assert_eq!(yearly.dates(&WeekendCalendar).unwrap().len(), 2);
    }
}
