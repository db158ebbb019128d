//! Quota accounting.
//!
//! Two quotas pay for leave: a monthly quota shared by Casual and Sick
//! leave, and an annual quota that accrues month by month over a
//! 12-month cycle anchored to the employee's joining anniversary.  This
//! module answers "how many paid days are left" for each of them; the
//! engine decides how a request is charged against them.

use crate::calendar::MonthIndex;
use crate::models::{LeaveLedger, MonthlyLeaveRecord};
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// Which counters of a [`MonthlyLeaveRecord`] count as consumed quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsumptionBasis {
    /// `paid_leaves`.
    PaidLeaves,
    /// `casual_leaves + sick_leaves`.
    #[default]
    CasualPlusSick,
}

impl ConsumptionBasis {
    pub fn consumed(self, record: &MonthlyLeaveRecord) -> u32 {
        match self {
            ConsumptionBasis::PaidLeaves => record.paid_leaves,
            ConsumptionBasis::CasualPlusSick => {
                record.casual_leaves.saturating_add(record.sick_leaves)
            }
        }
    }
}

impl FromStr for ConsumptionBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid_leaves" => Ok(ConsumptionBasis::PaidLeaves),
            "casual_plus_sick" => Ok(ConsumptionBasis::CasualPlusSick),
            other => Err(format!(
                "unknown consumption basis '{other}', expected paid_leaves or casual_plus_sick"
            )),
        }
    }
}

/// Monthly-quota days still available in the month containing `date`.
pub fn remaining_monthly_quota(
    ledger: &LeaveLedger,
    date: NaiveDate,
    basis: ConsumptionBasis,
) -> u32 {
    let consumed = ledger
        .monthly_record(date)
        .map(|record| basis.consumed(record))
        .unwrap_or(0);
    ledger.monthly_leaves_allowed.saturating_sub(consumed)
}

/// The annual-leave cycle position of an employee on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnualCycle {
    /// Whole months since the most recent joining anniversary, `0..=11`.
    /// Negative (down to `-11`) when the date precedes the joining month.
    pub cycle_start_month: i32,
    /// Year against which annual records are windowed.
    pub cycle_start_year: i32,
}

impl AnnualCycle {
    pub fn at(joining_date: NaiveDate, current: NaiveDate) -> Self {
        let months_since_joining = (current.year() - joining_date.year()) * 12
            + (current.month() as i32 - joining_date.month() as i32);
        // truncating remainder keeps the sign before joining
        let cycle_start_month = months_since_joining % 12;
        // ceil(cycle_start_month / 12): 1 inside a cycle, 0 at the anniversary or before joining
        let cycle_start_year = current.year() - i32::from(cycle_start_month > 0);
        Self {
            cycle_start_month,
            cycle_start_year,
        }
    }

    /// Annual days accrued so far: `floor(allowed / 12 * months)`, and
    /// nothing before the joining month.
    pub fn accrued(&self, annual_leaves_allowed: u32) -> u32 {
        match u32::try_from(self.cycle_start_month) {
            Ok(months) => annual_leaves_allowed.saturating_mul(months) / 12,
            Err(_) => 0,
        }
    }

    /// Whether an annual record with this year and month index falls in
    /// the cycle window.
    pub fn contains(&self, year: i32, month: MonthIndex) -> bool {
        let month = month.get() as i32;
        (year == self.cycle_start_year && month >= self.cycle_start_month)
            || (year == self.cycle_start_year + 1 && month < self.cycle_start_month)
    }

    /// Annual days already used in this cycle.
    pub fn consumed(&self, ledger: &LeaveLedger) -> u32 {
        ledger
            .annual_leaves_records
            .iter()
            .filter(|r| self.contains(r.year, r.month))
            .fold(0u32, |acc, r| acc.saturating_add(r.paid_leaves))
    }

    pub fn remaining(&self, ledger: &LeaveLedger) -> u32 {
        self.accrued(ledger.annual_leaves_allowed)
            .saturating_sub(self.consumed(ledger))
    }
}

/// Annual-quota days available when evaluated at `date`.
pub fn remaining_annual_quota(ledger: &LeaveLedger, joining_date: NaiveDate, date: NaiveDate) -> u32 {
    AnnualCycle::at(joining_date, date).remaining(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthNumber;
    use crate::models::AnnualLeaveRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn annual(year: i32, month: u32, paid: u32) -> AnnualLeaveRecord {
        AnnualLeaveRecord {
            year,
            month: MonthIndex::new(month).unwrap(),
            paid_leaves: paid,
        }
    }

    #[test]
    fn test_cycle_position() {
        let joined = date(2022, 1, 15);
        let cycle = AnnualCycle::at(joined, date(2024, 7, 2));
        assert_eq!(cycle.cycle_start_month, 6);
        assert_eq!(cycle.cycle_start_year, 2023);

        let anniversary = AnnualCycle::at(joined, date(2024, 1, 30));
        assert_eq!(anniversary.cycle_start_month, 0);
        assert_eq!(anniversary.cycle_start_year, 2024);
    }

    #[test]
    fn test_cycle_before_joining_accrues_nothing() {
        let cycle = AnnualCycle::at(date(2024, 5, 1), date(2024, 3, 1));
        assert_eq!(cycle.cycle_start_month, -2);
        assert_eq!(cycle.cycle_start_year, 2024);
        assert_eq!(cycle.accrued(12), 0);
        let ledger = LeaveLedger {
            annual_leaves_allowed: 12,
            ..LeaveLedger::default()
        };
        assert_eq!(remaining_annual_quota(&ledger, date(2024, 5, 1), date(2024, 3, 1)), 0);
        // a whole year early lands on offset zero, still nothing accrued
        assert_eq!(AnnualCycle::at(date(2025, 3, 1), date(2024, 3, 1)).accrued(12), 0);
    }

    #[test]
    fn test_accrual_boundary() {
        let cycle = AnnualCycle::at(date(2023, 1, 10), date(2024, 7, 10));
        assert_eq!(cycle.cycle_start_month, 6);
        assert_eq!(cycle.accrued(12), 6);
        // floor, never rounding up
        assert_eq!(cycle.accrued(7), 3);
        assert_eq!(AnnualCycle::at(date(2023, 1, 10), date(2024, 1, 10)).accrued(12), 0);
    }

    #[test]
    fn test_consumed_window() {
        let joined = date(2022, 1, 15);
        let cycle = AnnualCycle::at(joined, date(2024, 7, 2));
        let ledger = LeaveLedger {
            annual_leaves_allowed: 12,
            annual_leaves_records: vec![
                annual(2023, 6, 1),  // in window
                annual(2023, 11, 1), // in window
                annual(2024, 5, 1),  // in window
                annual(2023, 5, 4),  // before window
                annual(2024, 6, 4),  // after window
            ],
            ..LeaveLedger::default()
        };
        assert_eq!(cycle.consumed(&ledger), 3);
        assert_eq!(cycle.remaining(&ledger), 3);
    }

    #[test]
    fn test_remaining_annual_never_negative() {
        let ledger = LeaveLedger {
            annual_leaves_allowed: 12,
            annual_leaves_records: vec![annual(2023, 8, 10)],
            ..LeaveLedger::default()
        };
        assert_eq!(remaining_annual_quota(&ledger, date(2022, 1, 15), date(2024, 7, 2)), 0);
    }

    #[test]
    fn test_remaining_monthly_quota() {
        let ledger = LeaveLedger {
            monthly_leaves_allowed: 2,
            monthly_leave_records: vec![MonthlyLeaveRecord {
                year: 2024,
                month: MonthNumber::new(3).unwrap(),
                paid_leaves: 1,
                casual_leaves: 2,
                sick_leaves: 1,
            }],
            ..LeaveLedger::default()
        };
        let march = date(2024, 3, 5);
        assert_eq!(remaining_monthly_quota(&ledger, march, ConsumptionBasis::PaidLeaves), 1);
        assert_eq!(remaining_monthly_quota(&ledger, march, ConsumptionBasis::CasualPlusSick), 0);
        assert_eq!(remaining_monthly_quota(&ledger, date(2024, 4, 1), ConsumptionBasis::PaidLeaves), 2);
    }

    #[test]
    fn test_basis_from_str() {
        assert_eq!("paid_leaves".parse(), Ok(ConsumptionBasis::PaidLeaves));
        assert_eq!(" Casual_Plus_Sick ".parse(), Ok(ConsumptionBasis::CasualPlusSick));
        assert!("both".parse::<ConsumptionBasis>().is_err());
    }
}
