//! Core data models for the HR balance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod actor;
mod audit;
mod calendar;
mod employee;
mod expense_claim;
mod leave_balance;
mod leave_request;
mod payslip;
mod salary;

pub use actor::{ActorContext, Role};
pub use audit::{AuditEntityKind, AuditEntry};
pub use calendar::AbsenceEvent;
pub use employee::{Employee, EmployeeStatus};
pub use expense_claim::{ExpenseClaim, NewExpenseClaim};
pub use leave_balance::{LeaveBalance, LeaveBalanceSummary};
pub use leave_request::{LeaveRequest, NewLeaveRequest, RequestStatus};
pub use payslip::{Payslip, PayslipStatus};
pub use salary::SalaryInfo;
