//! Year-end leave rollover.
//!
//! Computes how much unused leave carries from one year into the next for
//! every carry-eligible leave type and active employee, and overwrites
//! the target year's `carried_over` field. Running the same rollover
//! twice therefore converges on the same result instead of accumulating.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::EngineResult;

use super::engine::HrEngine;

/// One (employee, leave type) line of a rollover report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverEntry {
    /// The employee whose balance was rolled.
    pub employee_id: String,
    /// The leave type that was rolled.
    pub leave_type: String,
    /// Unused days in the source year: `max(0, entitlement - used)`.
    pub unused: Decimal,
    /// Days written to the next year's `carried_over`.
    pub carried: Decimal,
    /// Non-fatal data-quality warning, e.g. unresolved pending days on
    /// the source-year row.
    pub warning: Option<String>,
}

/// The outcome of one rollover run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverReport {
    /// The source year that was rolled.
    pub from_year: i32,
    /// One entry per (employee, carry-eligible leave type) with a
    /// source-year balance row.
    pub entries: Vec<RolloverEntry>,
}

impl HrEngine {
    /// Rolls unused leave from `from_year` into `from_year + 1`.
    ///
    /// Only leave types configured with `carry_over` and only active
    /// employees participate. The carried amount is `min(unused, cap)`,
    /// where a zero configured cap means uncapped. The target-year row is
    /// created with the leave type's default entitlement if absent, and
    /// its `carried_over` is overwritten, not accumulated. Pending days
    /// on the source row are left untouched; they surface as a warning on
    /// that entry for the administrator running the rollover.
    pub fn rollover(&self, from_year: i32) -> EngineResult<RolloverReport> {
        let mut leave_types: Vec<_> = self
            .config()
            .leave_types()
            .filter(|lt| lt.carry_over)
            .cloned()
            .collect();
        leave_types.sort_by(|a, b| a.code.cmp(&b.code));

        let mut report = RolloverReport {
            from_year,
            entries: Vec::new(),
        };

        let mut store = self.store();
        for employee in store.employees_sorted() {
            if !employee.is_active() {
                continue;
            }

            for leave_type in &leave_types {
                let key = (
                    employee.id.clone(),
                    leave_type.code.clone(),
                    from_year,
                );
                let Some(source) = store.balance(&key).cloned() else {
                    continue;
                };

                let unused = (source.entitlement - source.used).max(Decimal::ZERO);
                let carried = if leave_type.max_carry_over > Decimal::ZERO {
                    unused.min(leave_type.max_carry_over)
                } else {
                    unused
                };

                let warning = if source.pending > Decimal::ZERO {
                    let message = format!(
                        "{} pending day(s) on the {} balance were not resolved before rollover",
                        source.pending, from_year
                    );
                    warn!(
                        employee_id = %employee.id,
                        leave_type = %leave_type.code,
                        pending = %source.pending,
                        "rollover over unresolved pending days"
                    );
                    Some(message)
                } else {
                    None
                };

                let target = store.balance_entry(
                    (
                        employee.id.clone(),
                        leave_type.code.clone(),
                        from_year + 1,
                    ),
                    leave_type.default_days,
                );
                target.carried_over = carried;

                report.entries.push(RolloverEntry {
                    employee_id: employee.id.clone(),
                    leave_type: leave_type.code.clone(),
                    unused,
                    carried,
                    warning,
                });
            }
        }

        info!(
            from_year,
            entries = report.entries.len(),
            "rollover finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CpfConfig, HrConfig, LeaveTypeConfig};
    use crate::models::{
        ActorContext, Employee, EmployeeStatus, NewLeaveRequest, Role,
    };
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_config() -> HrConfig {
        HrConfig::new(
            vec![
                LeaveTypeConfig {
                    code: "annual".to_string(),
                    name: "Annual Leave".to_string(),
                    default_days: dec("14"),
                    carry_over: true,
                    max_carry_over: dec("2"),
                },
                LeaveTypeConfig {
                    code: "medical".to_string(),
                    name: "Medical Leave".to_string(),
                    default_days: dec("14"),
                    carry_over: false,
                    max_carry_over: Decimal::ZERO,
                },
                LeaveTypeConfig {
                    code: "service".to_string(),
                    name: "Service Leave".to_string(),
                    default_days: dec("10"),
                    carry_over: true,
                    max_carry_over: Decimal::ZERO,
                },
            ],
            CpfConfig::statutory(),
        )
    }

    fn engine_with_employee() -> HrEngine {
        let engine = HrEngine::new(test_config());
        engine
            .register_employee(
                Employee {
                    id: "emp_001".to_string(),
                    name: "Tan Wei Ming".to_string(),
                    hire_date: Some(date(2020, 6, 15)),
                    date_of_birth: Some(date(1986, 2, 1)),
                    status: EmployeeStatus::Active,
                },
                date(2026, 1, 5),
            )
            .unwrap();
        engine
    }

    /// Approves `days` of annual leave so the 2026 row shows usage.
    fn use_annual_days(engine: &HrEngine, start: NaiveDate, end: NaiveDate) {
        let owner = ActorContext::new("emp_001", Role::Staff);
        let reviewer = ActorContext::new("hr_admin", Role::Hr);
        let request = engine
            .create_leave_request(
                &owner,
                NewLeaveRequest {
                    employee_id: "emp_001".to_string(),
                    leave_type: "annual".to_string(),
                    start_date: start,
                    end_date: end,
                    days: None,
                    document: None,
                },
            )
            .unwrap();
        engine.approve_leave(&reviewer, request.id).unwrap();
    }

    fn balance(engine: &HrEngine, leave_type: &str, year: i32) -> crate::models::LeaveBalance {
        engine
            .leave_balances("emp_001", year, date(year, 12, 31))
            .unwrap()
            .into_iter()
            .find(|s| s.balance.leave_type == leave_type)
            .unwrap()
            .balance
    }

    #[test]
    fn test_carry_capped_at_configured_maximum() {
        let engine = engine_with_employee();
        // Use 10 of 14 days: unused 4, cap 2.
        use_annual_days(&engine, date(2026, 3, 2), date(2026, 3, 11));

        let report = engine.rollover(2026).unwrap();
        let entry = report
            .entries
            .iter()
            .find(|e| e.leave_type == "annual")
            .unwrap();
        assert_eq!(entry.unused, dec("4"));
        assert_eq!(entry.carried, dec("2"));

        let next = balance(&engine, "annual", 2027);
        assert_eq!(next.carried_over, dec("2"));
        assert_eq!(next.entitlement, dec("14"));
        assert_eq!(next.used, Decimal::ZERO);
    }

    #[test]
    fn test_zero_cap_means_uncapped() {
        let engine = engine_with_employee();

        let report = engine.rollover(2026).unwrap();
        let entry = report
            .entries
            .iter()
            .find(|e| e.leave_type == "service")
            .unwrap();
        // Nothing used: all 10 days carry.
        assert_eq!(entry.carried, dec("10"));
    }

    #[test]
    fn test_non_carry_type_produces_no_entry() {
        let engine = engine_with_employee();

        let report = engine.rollover(2026).unwrap();
        assert!(report.entries.iter().all(|e| e.leave_type != "medical"));

        // And no 2027 medical row was created by rollover.
        let medical = balance(&engine, "medical", 2027);
        assert_eq!(medical.carried_over, Decimal::ZERO);
    }

    #[test]
    fn test_pending_days_surface_as_warning() {
        let engine = engine_with_employee();
        let owner = ActorContext::new("emp_001", Role::Staff);
        engine
            .create_leave_request(
                &owner,
                NewLeaveRequest {
                    employee_id: "emp_001".to_string(),
                    leave_type: "annual".to_string(),
                    start_date: date(2026, 12, 28),
                    end_date: date(2026, 12, 29),
                    days: None,
                    document: None,
                },
            )
            .unwrap();

        let report = engine.rollover(2026).unwrap();
        let entry = report
            .entries
            .iter()
            .find(|e| e.leave_type == "annual")
            .unwrap();
        assert!(entry.warning.as_deref().unwrap_or("").contains("pending"));

        // The pending reservation itself is left untouched.
        assert_eq!(balance(&engine, "annual", 2026).pending, dec("2"));
    }

    #[test]
    fn test_rerun_overwrites_instead_of_accumulating() {
        let engine = engine_with_employee();
        use_annual_days(&engine, date(2026, 3, 2), date(2026, 3, 11));

        engine.rollover(2026).unwrap();
        engine.rollover(2026).unwrap();

        assert_eq!(balance(&engine, "annual", 2027).carried_over, dec("2"));
    }

    #[test]
    fn test_inactive_employee_excluded() {
        let engine = engine_with_employee();
        engine
            .register_employee(
                Employee {
                    id: "emp_gone".to_string(),
                    name: "Former Employee".to_string(),
                    hire_date: Some(date(2019, 1, 7)),
                    date_of_birth: Some(date(1980, 1, 1)),
                    status: EmployeeStatus::Inactive,
                },
                date(2026, 1, 5),
            )
            .unwrap();

        let report = engine.rollover(2026).unwrap();
        assert!(report.entries.iter().all(|e| e.employee_id != "emp_gone"));
    }

    #[test]
    fn test_overdrawn_balance_carries_nothing() {
        let engine = engine_with_employee();
        // Use 16 days against an entitlement of 14.
        use_annual_days(&engine, date(2026, 3, 2), date(2026, 3, 17));

        let report = engine.rollover(2026).unwrap();
        let entry = report
            .entries
            .iter()
            .find(|e| e.leave_type == "annual")
            .unwrap();
        assert_eq!(entry.unused, Decimal::ZERO);
        assert_eq!(entry.carried, Decimal::ZERO);
    }
}
