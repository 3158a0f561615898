//! # Bankdate Core
//!
//! Business-day-aware calendar engine: periods, banking dates, business
//! day rolling and schedule generation.
//!
//! - **Types**: [`Period`] and [`BankDate`] with month-end-safe arithmetic
//! - **Calendars**: holiday lists and the five rolling conventions
//! - **Schedules**: backward-stepping date ranges that keep the start date
//!
//! Everything here is a pure computation over values created per call;
//! holiday lists are supplied by the caller and only read.
//!
//! ## Example
//!
//! ```rust
//! use bankdate_core::prelude::*;
//!
//! let maturity = BankDate::parse("2026-05-31").unwrap();
//! let holidays = HolidayList::parse(["2025-12-01"]).unwrap();
//!
//! let schedule = ScheduleSpec::new(maturity)
//!     .with_start(BankDate::parse("2025-05-31").unwrap())
//!     .with_step(Period::parse("6m").unwrap())
//!     .with_rolling(RollingConvention::ModifiedFollowing)
//!     .dates(&holidays)
//!     .unwrap();
//!
//! assert_eq!(schedule.len(), 3);
//! assert!(schedule.windows(2).all(|w| w[0] < w[1]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::doc_markdown)]

pub mod calendars;
pub mod error;
pub mod schedule;
pub mod types;


/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, HolidayList, RollingConvention, WeekendCalendar};
    pub use crate::error::{CalendarError, CalendarResult};
    pub use crate::schedule::{daterange, daterange_iter, period_count, ScheduleEnd, ScheduleSpec};
    pub use crate::types::{BankDate, Period, TimeUnit};
}

// Re-export commonly used types at crate root
pub use error::{CalendarError, CalendarResult};
pub use types::{BankDate, Period, TimeUnit};
