//! The balance ledger and its state machine.
//!
//! This module owns all mutable state: leave balances, leave requests,
//! expense claims, payslips, absence markers and the audit log. Every
//! state transition is applied atomically under one lock, with the
//! source-state check re-verified inside the critical section.

mod engine;
mod payroll_run;
mod rollover;
mod store;

pub use engine::HrEngine;
pub use payroll_run::{PayrollRunError, PayrollRunReport};
pub use rollover::{RolloverEntry, RolloverReport};
