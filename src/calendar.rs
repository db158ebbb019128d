//! Calendar helpers.
//!
//! Monthly leave records number months `1..=12` while annual records use
//! `0..=11`.  The two schemes get their own types here so they cannot be
//! mixed up silently; converting between them is explicit.

use crate::error::LeaveError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A 1-based calendar month (`1` is January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MonthNumber(u32);

/// A 0-based month index (`0` is January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MonthIndex(u32);

impl MonthNumber {
    pub fn new(month: u32) -> Result<Self, LeaveError> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(LeaveError::InvalidMonthNumber(month))
        }
    }

    /// The month `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.month())
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn to_index(self) -> MonthIndex {
        MonthIndex(self.0 - 1)
    }
}

impl MonthIndex {
    pub fn new(index: u32) -> Result<Self, LeaveError> {
        if index < 12 {
            Ok(Self(index))
        } else {
            Err(LeaveError::InvalidMonthIndex(index))
        }
    }

    /// The month `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.month0())
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn to_number(self) -> MonthNumber {
        MonthNumber(self.0 + 1)
    }
}

impl TryFrom<u32> for MonthNumber {
    type Error = LeaveError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u32> for MonthIndex {
    type Error = LeaveError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthNumber> for u32 {
    fn from(month: MonthNumber) -> Self {
        month.0
    }
}

impl From<MonthIndex> for u32 {
    fn from(index: MonthIndex) -> Self {
        index.0
    }
}

/// Number of calendar days from `start` to `end`, both inclusive.
///
/// Callers guarantee `start <= end`; a single day counts as 1.
pub fn total_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    u32::try_from(span).unwrap_or(0)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(next) => next - Duration::days(1),
        None => date,
    }
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Split the inclusive range `start..=end` into one inclusive sub-range
/// per calendar month it touches, in order.
pub fn month_segments(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut segments = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let segment_end = last_day_of_month(cursor).min(end);
        segments.push((cursor, segment_end));
        match segment_end.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    segments
}
