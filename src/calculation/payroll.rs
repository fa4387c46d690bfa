//! Monthly payroll breakdown calculation.
//!
//! Combines gross pay, the CPF contribution split, a flat-rate income tax
//! approximation and other deductions into one breakdown for a pay
//! period. Pure and deterministic given its inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CpfConfig;
use crate::error::{EngineError, EngineResult};

use super::cpf::{calculate_cpf, completed_years, round_to_dollar};

/// Inputs to one payroll computation.
#[derive(Debug, Clone)]
pub struct PayrollInput {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly fixed allowances.
    pub allowances: Decimal,
    /// Overtime pay for the period.
    pub overtime: Decimal,
    /// Bonus paid in the period.
    pub bonus: Decimal,
    /// Other deductions for the period.
    pub other_deductions: Decimal,
    /// The employee's date of birth, for CPF age banding.
    pub date_of_birth: NaiveDate,
    /// Whether CPF applies at all.
    pub cpf_applicable: bool,
    /// Override for the employee CPF rate (percent).
    pub cpf_employee_rate: Option<Decimal>,
    /// Override for the employer CPF rate (percent).
    pub cpf_employer_rate: Option<Decimal>,
    /// Ordinary wages already contributed this year. The payroll run
    /// passes zero; the parameter exists so callers can wire up real
    /// year-to-date tracking.
    pub ytd_ordinary_wage: Decimal,
    /// Income tax rate override; the configured default applies when
    /// absent.
    pub income_tax_rate: Option<Decimal>,
}

/// The complete result of one payroll computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// The employee's age in completed years at computation time.
    pub age: u32,
    /// Basic salary plus allowances, uncapped.
    pub ordinary_wage: Decimal,
    /// Overtime plus bonus, uncapped.
    pub additional_wage: Decimal,
    /// Ordinary plus additional wage.
    pub gross_salary: Decimal,
    /// The employee's CPF share.
    pub cpf_employee: Decimal,
    /// The employer's CPF share.
    pub cpf_employer: Decimal,
    /// The combined CPF contribution.
    pub cpf_total: Decimal,
    /// Flat-rate income tax on the gross salary.
    pub income_tax: Decimal,
    /// CPF employee share + income tax + other deductions.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions.
    pub net_salary: Decimal,
}

/// Calculates the payroll breakdown for one employee and one pay period.
///
/// Steps: determine the employee's age in completed years, look up the
/// CPF rate band (honouring per-employee overrides), cap wages, split the
/// contribution, apply the flat income tax to the uncapped gross, and
/// derive the net salary.
///
/// # Errors
///
/// Returns a `Validation` error for negative monetary components or a
/// date of birth after `as_of`, and `ConfigurationMissing` when no CPF
/// band covers the employee's age.
///
/// # Examples
///
/// ```
/// use hrm_engine::calculation::{calculate_payroll, PayrollInput};
/// use hrm_engine::config::CpfConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let input = PayrollInput {
///     basic_salary: dec("3000"),
///     allowances: dec("200"),
///     overtime: Decimal::ZERO,
///     bonus: Decimal::ZERO,
///     other_deductions: Decimal::ZERO,
///     date_of_birth: NaiveDate::from_ymd_opt(1986, 2, 1).unwrap(),
///     cpf_applicable: true,
///     cpf_employee_rate: None,
///     cpf_employer_rate: None,
///     ytd_ordinary_wage: Decimal::ZERO,
///     income_tax_rate: None,
/// };
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
/// let breakdown = calculate_payroll(&input, as_of, &CpfConfig::statutory()).unwrap();
/// assert_eq!(breakdown.net_salary, dec("2080"));
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    as_of: NaiveDate,
    config: &CpfConfig,
) -> EngineResult<PayrollBreakdown> {
    validate_non_negative("basic_salary", input.basic_salary)?;
    validate_non_negative("allowances", input.allowances)?;
    validate_non_negative("overtime", input.overtime)?;
    validate_non_negative("bonus", input.bonus)?;
    validate_non_negative("other_deductions", input.other_deductions)?;

    let age = completed_years(input.date_of_birth, as_of);
    if age < 0 {
        return Err(EngineError::Validation {
            field: "date_of_birth",
            message: format!("{} is after the computation date", input.date_of_birth),
        });
    }
    let age = age as u32;

    let ordinary_wage = input.basic_salary + input.allowances;
    let additional_wage = input.overtime + input.bonus;

    let (cpf_employee, cpf_employer, cpf_total) = if input.cpf_applicable {
        let (band_employee, band_employer) = config.rates_for_age(age)?;
        let employee_rate = input.cpf_employee_rate.unwrap_or(band_employee);
        let employer_rate = input.cpf_employer_rate.unwrap_or(band_employer);

        let contribution = calculate_cpf(
            ordinary_wage,
            additional_wage,
            input.ytd_ordinary_wage,
            employee_rate,
            employer_rate,
            config,
        );
        (contribution.employee, contribution.employer, contribution.total)
    } else {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    };

    let gross_salary = ordinary_wage + additional_wage;
    let tax_rate = input
        .income_tax_rate
        .unwrap_or(config.default_income_tax_rate);
    let income_tax = round_to_dollar(gross_salary * tax_rate);

    let total_deductions = cpf_employee + income_tax + input.other_deductions;
    let net_salary = gross_salary - total_deductions;

    Ok(PayrollBreakdown {
        age,
        ordinary_wage,
        additional_wage,
        gross_salary,
        cpf_employee,
        cpf_employer,
        cpf_total,
        income_tax,
        total_deductions,
        net_salary,
    })
}

fn validate_non_negative(field: &'static str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::Validation {
            field,
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}
