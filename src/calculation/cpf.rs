//! CPF contribution calculation.
//!
//! Computes employee and employer CPF amounts from capped wages and
//! age-banded rates. All arithmetic is exact decimal arithmetic; the only
//! rounding steps are the ones specified here, so results are stable to
//! the cent.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::CpfConfig;

/// Rounds a monetary amount half-up (away from zero) to whole dollars.
pub fn round_to_dollar(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the number of completed years between `date_of_birth` and
/// `as_of`, decrementing by one when the birthday has not yet occurred in
/// the `as_of` year.
///
/// # Examples
///
/// ```
/// use hrm_engine::calculation::completed_years;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(1986, 9, 12).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
/// // Birthday has not happened yet this year.
/// assert_eq!(completed_years(dob, as_of), 39);
/// ```
pub fn completed_years(date_of_birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut years = as_of.year() - date_of_birth.year();
    if (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years
}

/// The result of one CPF computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpfContribution {
    /// Ordinary wage after applying the monthly ceiling.
    pub capped_ordinary_wage: Decimal,
    /// Additional wage after applying the remaining annual headroom.
    pub capped_additional_wage: Decimal,
    /// Combined employee + employer contribution, rounded once.
    pub total: Decimal,
    /// The employee's share, truncated toward zero.
    pub employee: Decimal,
    /// The employer's share: always `total - employee`.
    pub employer: Decimal,
}

/// Calculates the CPF contribution split for one month's wages.
///
/// The ordinary wage is capped at the monthly ceiling; the additional
/// wage is capped at the annual ceiling net of year-to-date ordinary
/// wages and this month's capped ordinary wage. The caps affect only the
/// CPF computation, never the salary actually paid.
///
/// Rounding follows the statutory scheme: the combined contribution is
/// computed first and rounded half-up to the dollar exactly once; the
/// employee share is truncated toward zero to the dollar; the employer
/// share is the difference, so it absorbs the rounding remainder and the
/// identity `employee + employer == total` holds by construction.
///
/// `ytd_ordinary_wage` is accepted so callers can enforce the annual
/// ceiling across a year; the payroll run currently passes zero.
///
/// # Examples
///
/// ```
/// use hrm_engine::calculation::calculate_cpf;
/// use hrm_engine::config::CpfConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = CpfConfig::statutory();
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// let result = calculate_cpf(dec("3200"), dec("0"), dec("0"), dec("20"), dec("17"), &config);
/// assert_eq!(result.total, dec("1184"));
/// assert_eq!(result.employee, dec("640"));
/// assert_eq!(result.employer, dec("544"));
/// ```
pub fn calculate_cpf(
    ordinary_wage: Decimal,
    additional_wage: Decimal,
    ytd_ordinary_wage: Decimal,
    employee_rate: Decimal,
    employer_rate: Decimal,
    config: &CpfConfig,
) -> CpfContribution {
    let capped_ordinary_wage = ordinary_wage.min(config.ordinary_wage_ceiling);

    let additional_headroom = (config.additional_wage_annual_ceiling
        - ytd_ordinary_wage
        - capped_ordinary_wage)
        .max(Decimal::ZERO);
    let capped_additional_wage = additional_wage.min(additional_headroom);

    let total_cpf_wage = capped_ordinary_wage + capped_additional_wage;
    let hundred = Decimal::from(100u32);

    let total = round_to_dollar(total_cpf_wage * (employee_rate + employer_rate) / hundred);
    let employee = (total_cpf_wage * employee_rate / hundred).trunc();
    let employer = total - employee;

    CpfContribution {
        capped_ordinary_wage,
        capped_additional_wage,
        total,
        employee,
        employer,
    }
}
