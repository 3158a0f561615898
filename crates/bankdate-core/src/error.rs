//! Error types for the calendar engine.
//!
//! Every failure is local to the computation that raised it; nothing here
//! carries retry semantics.

use thiserror::Error;

use crate::types::TimeUnit;

/// A specialized Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// The error type for period, date, rolling and schedule operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Text that is not a period literal such as `6m` or `-3d`.
    #[error("Invalid period literal: {literal:?}")]
    InvalidPeriodLiteral {
        /// The rejected text.
        literal: String,
    },

    /// Text that is not a `YYYY-MM-DD` date, or a calendrically invalid date.
    #[error("Invalid date: {literal}")]
    InvalidDateLiteral {
        /// The rejected text or triple.
        literal: String,
    },

    /// Ordering was requested between periods of different units.
    #[error("Non comparable units ({left}) vs ({right})")]
    IncompatibleUnits {
        /// Unit of the left operand.
        left: TimeUnit,
        /// Unit of the right operand.
        right: TimeUnit,
    },

    /// A value that cannot be used as a period count.
    #[error("Invalid period value {value}: {reason}")]
    InvalidPeriodValue {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rolling convention name that is not one of the five known ones.
    #[error(
        "Unknown rolling convention {name:?}; expected one of Actual, Following, \
         Previous, ModifiedFollowing, ModifiedPrevious"
    )]
    UnknownRollingConvention {
        /// The rejected name.
        name: String,
    },

    /// The bounded business-day scan was exhausted.
    #[error("No business day found within {attempts} days of {date}")]
    NoBusinessDayFound {
        /// Date the scan started from.
        date: String,
        /// Number of candidates inspected.
        attempts: u32,
    },

    /// A scan step other than 1 or -1.
    #[error("The roll direction must be 1 or -1, not {step}")]
    InvalidRollDirection {
        /// The rejected step.
        step: i64,
    },

    /// Arithmetic left the representable date range.
    #[error("Date out of range: {message}")]
    DateOutOfRange {
        /// Description of the overflowing operation.
        message: String,
    },
}

impl CalendarError {
    /// Creates an invalid period literal error.
    #[must_use]
    pub fn invalid_period_literal(literal: impl Into<String>) -> Self {
        Self::InvalidPeriodLiteral {
            literal: literal.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(literal: impl Into<String>) -> Self {
        Self::InvalidDateLiteral {
            literal: literal.into(),
        }
    }

    /// Creates an invalid period value error.
    #[must_use]
    pub fn invalid_period_value(value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidPeriodValue {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown rolling convention error.
    #[must_use]
    pub fn unknown_convention(name: impl Into<String>) -> Self {
        Self::UnknownRollingConvention { name: name.into() }
    }

    /// Creates a date overflow error.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            message: message.into(),
        }
    }
}
