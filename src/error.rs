//! Error types for the Leave Engine.
//!
//! The calculator itself cannot fail; these errors come from building
//! validated inputs (date ranges, month numbers), from reading
//! configuration, and from the HTTP layer.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for leave engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaveError {
    /// The end of a leave request precedes its start.
    #[error("invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A 1-based calendar month outside `1..=12`.
    #[error("invalid month number {0}: expected 1..=12")]
    InvalidMonthNumber(u32),

    /// A 0-based month index outside `0..=11`.
    #[error("invalid month index {0}: expected 0..=11")]
    InvalidMonthIndex(u32),

    /// A configuration value could not be interpreted.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A batch request carried no items.
    #[error("batch contains no items")]
    EmptyBatch,
}

pub type LeaveResult<T> = Result<T, LeaveError>;
