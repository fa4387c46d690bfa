//! Calculation logic for the HR balance engine.
//!
//! This module contains the pure calculation functions: leave entitlement
//! proration with half-day rounding, completed-years age determination,
//! the CPF contribution split with wage ceilings, and the monthly payroll
//! breakdown.

mod cpf;
mod payroll;
mod proration;

pub use cpf::{CpfContribution, calculate_cpf, completed_years, round_to_dollar};
pub use payroll::{PayrollBreakdown, PayrollInput, calculate_payroll};
pub use proration::{prorate, round_to_half};
