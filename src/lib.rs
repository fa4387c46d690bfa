//! Leave and payroll balance-consistency engine for an HR management system.
//!
//! This crate maintains per-employee leave balances through the
//! leave-request lifecycle (submit, approve, reject, cancel, reset),
//! prorates annual entitlements for mid-year hires, computes CPF-banded
//! payroll breakdowns, and rolls unused leave into the next year.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
