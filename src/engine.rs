//! Leave distribution engine.
//!
//! The `engine` module turns a [`LeaveRequest`] and the employee's
//! [`LeaveLedger`] into a [`LeaveDistribution`].  Days are charged in a
//! fixed order: the monthly quota first (Casual and Sick only), then
//! the annual quota, and whatever remains is unpaid.  Batches of
//! independent requests are evaluated in parallel with [`rayon`].

use crate::calendar::{month_segments, same_month, total_days};
use crate::models::{LeaveDistribution, LeaveLedger, LeaveRequest, LeaveType};
use crate::quota::{remaining_annual_quota, remaining_monthly_quota, ConsumptionBasis};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for how the ledger is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeavePolicy {
    /// How consumption is read for every month of a cross-month request
    /// after the first.  The first month always reads `paid_leaves`.
    pub trailing_month_basis: ConsumptionBasis,
}

/// One calculator invocation, as carried by batch requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionInput {
    pub request: LeaveRequest,
    pub ledger: LeaveLedger,
    pub joining_date: NaiveDate,
}

/// Distributes a request with the default [`LeavePolicy`].
pub fn distribute_leaves(
    request: &LeaveRequest,
    ledger: &LeaveLedger,
    joining_date: NaiveDate,
) -> LeaveDistribution {
    distribute_leaves_with(&LeavePolicy::default(), request, ledger, joining_date)
}

/// Computes how many days of `request` are paid from the monthly quota,
/// paid from the annual quota, or unpaid.
pub fn distribute_leaves_with(
    policy: &LeavePolicy,
    request: &LeaveRequest,
    ledger: &LeaveLedger,
    joining_date: NaiveDate,
) -> LeaveDistribution {
    let days = request.total_days();
    let start = request.start_date();
    let end = request.end_date();

    let distribution = match request.leave_type() {
        LeaveType::Annual => {
            let available = remaining_annual_quota(ledger, joining_date, start);
            let annual_leaves = days.min(available);
            LeaveDistribution {
                leaves: 0,
                unpaid_leaves: days - annual_leaves,
                annual_leaves,
            }
        }
        LeaveType::Casual | LeaveType::Sick => {
            let segments = month_segments(start, end);
            let mut leaves = 0;
            let mut shortfall = 0;
            for (i, (seg_start, seg_end)) in segments.iter().enumerate() {
                let basis = if i == 0 {
                    ConsumptionBasis::PaidLeaves
                } else {
                    policy.trailing_month_basis
                };
                let seg_days = total_days(*seg_start, *seg_end);
                let paid = seg_days.min(remaining_monthly_quota(ledger, *seg_start, basis));
                leaves += paid;
                shortfall += seg_days - paid;
            }
            // single-month requests check the annual quota at the start,
            // cross-month ones at the end
            let evaluated_at = if same_month(start, end) { start } else { end };
            let annual_leaves = shortfall.min(remaining_annual_quota(ledger, joining_date, evaluated_at));
            LeaveDistribution {
                leaves,
                unpaid_leaves: shortfall - annual_leaves,
                annual_leaves,
            }
        }
    };

    debug!(
        leave_type = %request.leave_type(),
        %start,
        %end,
        days,
        leaves = distribution.leaves,
        annual_leaves = distribution.annual_leaves,
        unpaid_leaves = distribution.unpaid_leaves,
        "leave distributed"
    );
    distribution
}

/// Distributes every input in parallel, returning results in input order.
pub fn distribute_batch(policy: &LeavePolicy, inputs: &[DistributionInput]) -> Vec<LeaveDistribution> {
    inputs
        .par_iter()
        .map(|input| distribute_leaves_with(policy, &input.request, &input.ledger, input.joining_date))
        .collect()
}
