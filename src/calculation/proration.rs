//! Leave entitlement proration.
//!
//! This module computes the portion of an annual leave entitlement an
//! employee has accrued as of a given date, based on completed calendar
//! months. The function is pure and is re-evaluated on every read; the
//! prorated figure is never persisted.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a day count to the nearest half day.
///
/// The computation is `round(x * 2) / 2` with round-half-up (away from
/// zero) on the doubled intermediate, so `1.25` rounds to `1.5` and
/// `1.17` rounds to `1.0`.
///
/// # Examples
///
/// ```
/// use hrm_engine::calculation::round_to_half;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_to_half(Decimal::from_str("4.67").unwrap());
/// assert_eq!(rounded, Decimal::from_str("4.5").unwrap());
/// ```
pub fn round_to_half(value: Decimal) -> Decimal {
    (value * Decimal::TWO).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / Decimal::TWO
}

/// Prorates an annual leave entitlement for the completed months of the
/// `as_of` year.
///
/// Rules:
/// - An employee hired before the `as_of` year, or with no recorded hire
///   date, accrues for every month through the current one
///   (`completed_months = as_of month`, counting the current month).
/// - An employee hired during the `as_of` year accrues only for whole
///   months since hire (`completed_months = as_of month - hire month`);
///   the partial current month never counts, so a hire dated in the
///   current calendar month accrues 0 regardless of day-of-month.
/// - A hire date after `as_of` yields 0.
/// - The result is `annual_entitlement * completed_months / 12`, rounded
///   to the nearest half day; zero completed months yield exactly 0.
///
/// # Examples
///
/// ```
/// use hrm_engine::calculation::prorate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let annual = Decimal::from_str("14").unwrap();
/// let hired = NaiveDate::from_ymd_opt(2026, 3, 10);
/// let as_of = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
///
/// // Four completed months (March through June): 14 * 4 / 12 = 4.67 -> 4.5
/// assert_eq!(prorate(annual, hired, as_of), Decimal::from_str("4.5").unwrap());
/// ```
pub fn prorate(
    annual_entitlement: Decimal,
    hire_date: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Decimal {
    let completed_months: u32 = match hire_date {
        Some(hire) if hire > as_of => return Decimal::ZERO,
        Some(hire) if started_during_year(hire, as_of) => as_of.month() - hire.month(),
        _ => as_of.month(),
    };

    if completed_months == 0 {
        return Decimal::ZERO;
    }

    round_to_half(annual_entitlement * Decimal::from(completed_months) / Decimal::from(12u32))
}

/// A hire strictly after Jan 1 of the `as_of` year counts as a new hire
/// for that year; a hire on Jan 1 is a full-year employee.
fn started_during_year(hire: NaiveDate, as_of: NaiveDate) -> bool {
    hire.year() == as_of.year() && (hire.month() > 1 || hire.day() > 1)
}
