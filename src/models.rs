//! Data models for the Leave Engine.
//!
//! The `models` module defines the serialisable inputs and outputs of
//! the leave calculator: the leave request, the employee's leave
//! ledger as returned by the backend leave-statistics endpoint, the
//! computed distribution and the application payload submitted back to
//! the backend.  Field names follow the backend's camelCase JSON.

use crate::calendar::{MonthIndex, MonthNumber};
use crate::error::{LeaveError, LeaveResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of leave an employee can apply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Charged against the monthly quota, then the annual quota.
    Casual,
    /// Shares the monthly quota with `Casual`.
    Sick,
    /// Charged against the annual quota only.
    Annual,
}

impl LeaveType {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveType::Casual => "Casual",
            LeaveType::Sick => "Sick",
            LeaveType::Annual => "Annual",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leave request over an inclusive date range.
///
/// The range is checked on construction, including when deserialised,
/// so a `LeaveRequest` always satisfies `start_date <= end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLeaveRequest", rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(rename = "type")]
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeaveRequest {
    #[serde(rename = "type", alias = "leaveType")]
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawLeaveRequest> for LeaveRequest {
    type Error = LeaveError;

    fn try_from(raw: RawLeaveRequest) -> Result<Self, Self::Error> {
        LeaveRequest::new(raw.leave_type, raw.start_date, raw.end_date)
    }
}

impl LeaveRequest {
    pub fn new(
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LeaveResult<Self> {
        if end_date < start_date {
            return Err(LeaveError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            leave_type,
            start_date,
            end_date,
        })
    }

    pub fn leave_type(&self) -> LeaveType {
        self.leave_type
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Inclusive number of days requested.
    pub fn total_days(&self) -> u32 {
        crate::calendar::total_days(self.start_date, self.end_date)
    }
}

/// Leave already consumed during one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLeaveRecord {
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: MonthNumber,
    /// Paid monthly-quota days consumed.
    #[serde(default)]
    pub paid_leaves: u32,
    /// Casual days taken this month.  The backend reports these
    /// separately from `paid_leaves`; only the trailing segments of a
    /// cross-month request read them.
    #[serde(default)]
    pub casual_leaves: u32,
    #[serde(default)]
    pub sick_leaves: u32,
}

/// Annual-quota days consumed, keyed by a 0-based month index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualLeaveRecord {
    pub year: i32,
    /// Month index, `0..=11`.
    pub month: MonthIndex,
    #[serde(default)]
    pub paid_leaves: u32,
}

/// An employee's historical leave usage and quotas.
///
/// Records are optional: a month or cycle without a record counts as
/// zero consumption, which is what a newly hired employee looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveLedger {
    /// Combined Casual + Sick paid days allowed per calendar month.
    #[serde(default)]
    pub monthly_leaves_allowed: u32,
    #[serde(default)]
    pub monthly_leave_records: Vec<MonthlyLeaveRecord>,
    /// Paid annual-leave days per 12-month cycle.
    #[serde(default)]
    pub annual_leaves_allowed: u32,
    #[serde(default)]
    pub annual_leaves_records: Vec<AnnualLeaveRecord>,
}

impl LeaveLedger {
    /// The record for the calendar month containing `date`, if any.
    pub fn monthly_record(&self, date: NaiveDate) -> Option<&MonthlyLeaveRecord> {
        let month = MonthNumber::of(date);
        self.monthly_leave_records
            .iter()
            .find(|r| r.year == date.year() && r.month == month)
    }
}

/// How the requested days were charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDistribution {
    /// Days paid from the monthly quota.
    pub leaves: u32,
    /// Days not covered by any quota.
    pub unpaid_leaves: u32,
    /// Days paid from the annual quota.
    pub annual_leaves: u32,
}

impl LeaveDistribution {
    pub fn total(&self) -> u32 {
        self.leaves + self.unpaid_leaves + self.annual_leaves
    }
}

/// The leave application submitted to the backend: request metadata
/// plus the computed distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub paid_leaves: u32,
    pub unpaid_leaves: u32,
    pub annual_leaves: u32,
}

impl LeaveApplication {
    pub fn new(
        employee_id: impl Into<String>,
        request: &LeaveRequest,
        distribution: LeaveDistribution,
        reason: Option<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type: request.leave_type(),
            start_date: request.start_date(),
            end_date: request.end_date(),
            reason,
            paid_leaves: distribution.leaves,
            unpaid_leaves: distribution.unpaid_leaves,
            annual_leaves: distribution.annual_leaves,
        }
    }

    /// The `(name, value)` pairs of the multipart form, in submission
    /// order.  `reason` is omitted when absent.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("employeeId", self.employee_id.clone()),
            ("leaveType", self.leave_type.to_string()),
            ("startDate", self.start_date.format("%Y-%m-%d").to_string()),
            ("endDate", self.end_date.format("%Y-%m-%d").to_string()),
        ];
        if let Some(reason) = &self.reason {
            fields.push(("reason", reason.clone()));
        }
        fields.push(("paidLeaves", self.paid_leaves.to_string()));
        fields.push(("unpaidLeaves", self.unpaid_leaves.to_string()));
        fields.push(("annualLeaves", self.annual_leaves.to_string()));
        fields
    }
}
