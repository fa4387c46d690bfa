//! Payslip model.
//!
//! A payslip is derived state created by the payroll generation routine,
//! unique per (employee, pay period) and immutable once paid.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// Prepared but not yet finalized.
    Draft,
    /// Produced by a payroll run; amounts are final but unpaid.
    Generated,
    /// Payment released. The record is immutable from here on.
    Paid,
}

impl PayslipStatus {
    /// Returns the lowercase wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayslipStatus::Draft => "draft",
            PayslipStatus::Generated => "generated",
            PayslipStatus::Paid => "paid",
        }
    }
}

/// One employee's pay record for one pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The employee this payslip is for.
    pub employee_id: String,
    /// First day of the pay period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the pay period (inclusive).
    pub period_end: NaiveDate,
    /// The date payment is (or was) released.
    pub payment_date: NaiveDate,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly fixed allowances.
    pub allowances: Decimal,
    /// Overtime pay for the period.
    pub overtime: Decimal,
    /// Bonus paid in the period.
    pub bonus: Decimal,
    /// Gross salary before deductions.
    pub gross_salary: Decimal,
    /// CPF amount withheld from the employee.
    pub cpf_employee: Decimal,
    /// CPF amount contributed by the employer.
    pub cpf_employer: Decimal,
    /// Flat-rate income tax withheld.
    pub income_tax: Decimal,
    /// Other deductions for the period.
    pub other_deductions: Decimal,
    /// Total of all deductions borne by the employee.
    pub total_deductions: Decimal,
    /// Net salary paid out.
    pub net_salary: Decimal,
    /// Current lifecycle status.
    pub status: PayslipStatus,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PayslipStatus::Generated).unwrap(),
            "\"generated\""
        );
        assert_eq!(serde_json::to_string(&PayslipStatus::Paid).unwrap(), "\"paid\"");
    }

    #[test]
    fn test_payslip_round_trip() {
        let payslip = Payslip {
            id: Uuid::nil(),
            employee_id: "emp_001".to_string(),
            period_start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
            basic_salary: dec("3000"),
            allowances: dec("200"),
            overtime: dec("0"),
            bonus: dec("0"),
            gross_salary: dec("3200"),
            cpf_employee: dec("640"),
            cpf_employer: dec("544"),
            income_tax: dec("480"),
            other_deductions: dec("0"),
            total_deductions: dec("1120"),
            net_salary: dec("2080"),
            status: PayslipStatus::Generated,
            generated_at: DateTime::parse_from_rfc3339("2026-03-25T02:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_string(&payslip).unwrap();
        let back: Payslip = serde_json::from_str(&json).unwrap();
        assert_eq!(payslip, back);
    }
}
