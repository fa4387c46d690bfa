//! Leave balance ledger rows.
//!
//! One [`LeaveBalance`] row exists per (employee, leave type, year). The row
//! is derived state: it is created lazily and mutated only by leave-request
//! state transitions and year-end rollover, never edited directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-employee, per-leave-type, per-year balance record.
///
/// Invariant: `used >= 0` and `pending >= 0` at all times. The available
/// balance may legitimately go negative on bad data entry; callers treat
/// that as a warning rather than clamping it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this row belongs to.
    pub employee_id: String,
    /// The leave type code this row tracks.
    pub leave_type: String,
    /// The calendar year this row tracks.
    pub year: i32,
    /// Days allocated for the year (the configured annual entitlement; the
    /// prorated figure is re-derived at read time, never stored).
    pub entitlement: Decimal,
    /// Days brought forward from the prior year's unused balance.
    pub carried_over: Decimal,
    /// Days consumed by approved requests.
    pub used: Decimal,
    /// Days reserved by requests awaiting a decision.
    pub pending: Decimal,
}

impl LeaveBalance {
    /// Creates a fresh row with no usage.
    pub fn new(
        employee_id: impl Into<String>,
        leave_type: impl Into<String>,
        year: i32,
        entitlement: Decimal,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type: leave_type.into(),
            year,
            entitlement,
            carried_over: Decimal::ZERO,
            used: Decimal::ZERO,
            pending: Decimal::ZERO,
        }
    }

    /// The available balance against the stored annual entitlement:
    /// `entitlement + carried_over - used - pending`.
    pub fn available(&self) -> Decimal {
        self.entitlement + self.carried_over - self.used - self.pending
    }
}

/// Read model combining a ledger row with the prorated entitlement derived
/// for the requesting date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceSummary {
    /// The underlying ledger row.
    #[serde(flatten)]
    pub balance: LeaveBalance,
    /// The entitlement prorated for the employee's hire date as of the read.
    pub effective_entitlement: Decimal,
    /// `effective_entitlement + carried_over - used - pending`.
    pub available: Decimal,
}
