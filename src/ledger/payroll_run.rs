//! Idempotent batch payslip generation.
//!
//! One payroll run covers one calendar month. Each employee is processed
//! independently: missing salary records, missing dates of birth and
//! per-employee calculation failures are counted and reported, never
//! fatal to the batch.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollInput, calculate_payroll};
use crate::error::{EngineError, EngineResult};
use crate::models::{Payslip, PayslipStatus};

use super::engine::HrEngine;

/// One per-employee failure inside a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunError {
    /// The employee whose computation failed.
    pub employee_id: String,
    /// Human-readable failure detail.
    pub detail: String,
}

/// The outcome of one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunReport {
    /// Payslips created by this run.
    pub created: u32,
    /// Employees skipped: inactive, already generated for the period,
    /// missing salary record or missing date of birth.
    pub skipped: u32,
    /// Employees whose computation failed.
    pub errors: Vec<PayrollRunError>,
}

impl HrEngine {
    /// Generates payslips for every active employee for one month.
    ///
    /// Generation is idempotent per (employee, period): an employee who
    /// already has a payslip for the period is counted as skipped, so
    /// re-running a month never duplicates records. The `as_of` date
    /// drives the CPF age computation; `ytd_ordinary_wage` is passed as
    /// zero (the annual additional-wage ceiling is therefore enforced
    /// only against the current month's ordinary wage).
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for an invalid month/year; everything
    /// per-employee lands in the report instead.
    pub fn generate_payroll(
        &self,
        month: u32,
        year: i32,
        payment_date: NaiveDate,
        as_of: NaiveDate,
    ) -> EngineResult<PayrollRunReport> {
        let (period_start, period_end) = month_bounds(month, year)?;

        let mut report = PayrollRunReport {
            created: 0,
            skipped: 0,
            errors: Vec::new(),
        };

        let mut store = self.store();
        for employee in store.employees_sorted() {
            if !employee.is_active() {
                report.skipped += 1;
                continue;
            }
            if store.payslip_exists(&employee.id, period_start, period_end) {
                report.skipped += 1;
                continue;
            }

            let Some(salary) = store.salary(&employee.id).cloned() else {
                warn!(employee_id = %employee.id, "no salary record, skipping payroll");
                report.skipped += 1;
                continue;
            };
            let Some(date_of_birth) = employee.date_of_birth else {
                warn!(employee_id = %employee.id, "no date of birth, skipping payroll");
                report.skipped += 1;
                continue;
            };

            let input = PayrollInput {
                basic_salary: salary.basic_salary,
                allowances: salary.allowances,
                overtime: Decimal::ZERO,
                bonus: Decimal::ZERO,
                other_deductions: Decimal::ZERO,
                date_of_birth,
                cpf_applicable: salary.cpf_applicable,
                cpf_employee_rate: salary.cpf_employee_rate,
                cpf_employer_rate: salary.cpf_employer_rate,
                ytd_ordinary_wage: Decimal::ZERO,
                income_tax_rate: None,
            };

            match calculate_payroll(&input, as_of, self.config().cpf()) {
                Ok(breakdown) => {
                    store.insert_payslip(Payslip {
                        id: Uuid::new_v4(),
                        employee_id: employee.id.clone(),
                        period_start,
                        period_end,
                        payment_date,
                        basic_salary: salary.basic_salary,
                        allowances: salary.allowances,
                        overtime: Decimal::ZERO,
                        bonus: Decimal::ZERO,
                        gross_salary: breakdown.gross_salary,
                        cpf_employee: breakdown.cpf_employee,
                        cpf_employer: breakdown.cpf_employer,
                        income_tax: breakdown.income_tax,
                        other_deductions: Decimal::ZERO,
                        total_deductions: breakdown.total_deductions,
                        net_salary: breakdown.net_salary,
                        status: PayslipStatus::Generated,
                        generated_at: Utc::now(),
                    });
                    report.created += 1;
                }
                Err(err) => {
                    warn!(employee_id = %employee.id, error = %err, "payroll computation failed");
                    report.errors.push(PayrollRunError {
                        employee_id: employee.id.clone(),
                        detail: err.to_string(),
                    });
                }
            }
        }

        info!(
            month,
            year,
            created = report.created,
            skipped = report.skipped,
            errors = report.errors.len(),
            "payroll run finished"
        );
        Ok(report)
    }

    /// Marks a generated payslip as paid. A paid payslip is immutable:
    /// paying it again (or regenerating its period) is rejected.
    pub fn mark_payslip_paid(&self, id: Uuid) -> EngineResult<Payslip> {
        let mut store = self.store();
        let payslip = store.payslip(id)?;
        if payslip.status != PayslipStatus::Generated {
            return Err(EngineError::InvalidStateTransition {
                entity: "payslip",
                id: id.to_string(),
                status: payslip.status.as_str().to_string(),
                action: "pay",
            });
        }

        let payslip = store.payslip_mut(id)?;
        payslip.status = PayslipStatus::Paid;
        Ok(payslip.clone())
    }

    /// Returns one employee's payslips, sorted by period start.
    pub fn payslips(&self, employee_id: &str) -> Vec<Payslip> {
        self.store().payslips_for(employee_id)
    }
}

/// Returns the inclusive first and last day of a calendar month.
fn month_bounds(month: u32, year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::Validation {
        field: "month",
        message: format!("{}-{:02} is not a valid month", year, month),
    })?;

    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::Validation {
        field: "month",
        message: format!("{}-{:02} has no following month", year, month),
    })?;

    let end = next_month_start.pred_opt().ok_or(EngineError::Validation {
        field: "month",
        message: "month end underflow".to_string(),
    })?;

    debug_assert_eq!(end.month(), month);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CpfConfig, HrConfig, LeaveTypeConfig};
    use crate::models::{Employee, EmployeeStatus, SalaryInfo};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_config() -> HrConfig {
        HrConfig::new(
            vec![LeaveTypeConfig {
                code: "annual".to_string(),
                name: "Annual Leave".to_string(),
                default_days: dec("14"),
                carry_over: true,
                max_carry_over: dec("7"),
            }],
            CpfConfig::statutory(),
        )
    }

    fn add_employee(engine: &HrEngine, id: &str, dob: Option<NaiveDate>, status: EmployeeStatus) {
        engine
            .register_employee(
                Employee {
                    id: id.to_string(),
                    name: format!("Employee {}", id),
                    hire_date: Some(date(2020, 1, 6)),
                    date_of_birth: dob,
                    status,
                },
                date(2026, 1, 5),
            )
            .unwrap();
    }

    fn add_salary(engine: &HrEngine, id: &str, basic: &str, allowances: &str) {
        engine
            .set_salary_info(SalaryInfo {
                employee_id: id.to_string(),
                basic_salary: dec(basic),
                allowances: dec(allowances),
                cpf_applicable: true,
                cpf_employee_rate: None,
                cpf_employer_rate: None,
            })
            .unwrap();
    }

    #[test]
    fn test_generates_payslip_with_worked_example_amounts() {
        let engine = HrEngine::new(test_config());
        add_employee(&engine, "emp_001", Some(date(1986, 2, 1)), EmployeeStatus::Active);
        add_salary(&engine, "emp_001", "3000", "200");

        let report = engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 0);
        assert!(report.errors.is_empty());

        let slips = engine.payslips("emp_001");
        assert_eq!(slips.len(), 1);
        let slip = &slips[0];
        assert_eq!(slip.period_start, date(2026, 3, 1));
        assert_eq!(slip.period_end, date(2026, 3, 31));
        assert_eq!(slip.gross_salary, dec("3200"));
        assert_eq!(slip.cpf_employee, dec("640"));
        assert_eq!(slip.cpf_employer, dec("544"));
        assert_eq!(slip.income_tax, dec("480"));
        assert_eq!(slip.net_salary, dec("2080"));
        assert_eq!(slip.status, PayslipStatus::Generated);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let engine = HrEngine::new(test_config());
        add_employee(&engine, "emp_001", Some(date(1986, 2, 1)), EmployeeStatus::Active);
        add_salary(&engine, "emp_001", "3000", "200");

        let first = engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();
        let second = engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();

        assert_eq!(first.created, 1);
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(engine.payslips("emp_001").len(), 1);
    }

    #[test]
    fn test_missing_salary_and_dob_are_skipped_not_fatal() {
        let engine = HrEngine::new(test_config());
        add_employee(&engine, "emp_001", Some(date(1986, 2, 1)), EmployeeStatus::Active);
        add_salary(&engine, "emp_001", "3000", "200");
        // No salary record.
        add_employee(&engine, "emp_002", Some(date(1990, 5, 5)), EmployeeStatus::Active);
        // No date of birth.
        add_employee(&engine, "emp_003", None, EmployeeStatus::Active);
        add_salary(&engine, "emp_003", "2500", "0");

        let report = engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 2);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_inactive_employee_skipped() {
        let engine = HrEngine::new(test_config());
        add_employee(&engine, "emp_001", Some(date(1986, 2, 1)), EmployeeStatus::Inactive);
        add_salary(&engine, "emp_001", "3000", "200");

        let report = engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_invalid_month_is_validation_error() {
        let engine = HrEngine::new(test_config());
        let result = engine.generate_payroll(13, 2026, date(2026, 3, 28), date(2026, 8, 1));
        assert!(matches!(
            result,
            Err(EngineError::Validation { field: "month", .. })
        ));
    }

    #[test]
    fn test_december_period_bounds() {
        let (start, end) = month_bounds(12, 2026).unwrap();
        assert_eq!(start, date(2026, 12, 1));
        assert_eq!(end, date(2026, 12, 31));
    }

    #[test]
    fn test_february_leap_year_bounds() {
        let (_, end) = month_bounds(2, 2028).unwrap();
        assert_eq!(end, date(2028, 2, 29));
    }

    #[test]
    fn test_paid_payslip_is_immutable() {
        let engine = HrEngine::new(test_config());
        add_employee(&engine, "emp_001", Some(date(1986, 2, 1)), EmployeeStatus::Active);
        add_salary(&engine, "emp_001", "3000", "200");
        engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();
        let slip_id = engine.payslips("emp_001")[0].id;

        let paid = engine.mark_payslip_paid(slip_id).unwrap();
        assert_eq!(paid.status, PayslipStatus::Paid);

        let again = engine.mark_payslip_paid(slip_id);
        assert!(matches!(
            again,
            Err(EngineError::InvalidStateTransition { action: "pay", .. })
        ));

        // Regeneration over a paid period is absorbed by idempotence.
        let report = engine
            .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
            .unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.skipped, 1);
    }
}
