//! In-process system of record behind the engine.
//!
//! The store owns every mutable row the engine maintains. It performs no
//! validation of its own; the engine validates before mutating, inside a
//! single critical section, so each state transition lands atomically.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceEvent, AuditEntry, Employee, ExpenseClaim, LeaveBalance, LeaveRequest, Payslip,
    SalaryInfo,
};

/// Key of one balance row: (employee id, leave type code, year).
pub type BalanceKey = (String, String, i32);

/// The collections owned by the engine.
#[derive(Debug, Default)]
pub struct LedgerStore {
    employees: HashMap<String, Employee>,
    salaries: HashMap<String, SalaryInfo>,
    balances: HashMap<BalanceKey, LeaveBalance>,
    requests: HashMap<Uuid, LeaveRequest>,
    claims: HashMap<Uuid, ExpenseClaim>,
    payslips: HashMap<Uuid, Payslip>,
    /// Absence markers keyed by the approving request's id.
    events: HashMap<Uuid, AbsenceEvent>,
    audit_log: Vec<AuditEntry>,
}

impl LedgerStore {
    /// Returns the employee with the given id.
    pub fn employee(&self, id: &str) -> EngineResult<&Employee> {
        self.employees.get(id).ok_or_else(|| EngineError::NotFound {
            entity: "employee",
            id: id.to_string(),
        })
    }

    /// True if an employee with this id is already registered.
    pub fn has_employee(&self, id: &str) -> bool {
        self.employees.contains_key(id)
    }

    /// Inserts a new employee row.
    pub fn insert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// All employees, sorted by id for deterministic batch iteration.
    pub fn employees_sorted(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        employees
    }

    /// Returns the salary record for an employee, if configured.
    pub fn salary(&self, employee_id: &str) -> Option<&SalaryInfo> {
        self.salaries.get(employee_id)
    }

    /// Inserts or replaces an employee's salary record.
    pub fn upsert_salary(&mut self, info: SalaryInfo) {
        self.salaries.insert(info.employee_id.clone(), info);
    }

    /// Returns the balance row for a key, if present.
    pub fn balance(&self, key: &BalanceKey) -> Option<&LeaveBalance> {
        self.balances.get(key)
    }

    /// Returns the balance row for a key, creating it with the given
    /// entitlement and zero usage if absent.
    pub fn balance_entry(
        &mut self,
        key: BalanceKey,
        default_entitlement: Decimal,
    ) -> &mut LeaveBalance {
        self.balances.entry(key.clone()).or_insert_with(|| {
            LeaveBalance::new(key.0, key.1, key.2, default_entitlement)
        })
    }

    /// Returns the leave request with the given id.
    pub fn request(&self, id: Uuid) -> EngineResult<&LeaveRequest> {
        self.requests.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "leave request",
            id: id.to_string(),
        })
    }

    /// Mutable access to a leave request.
    pub fn request_mut(&mut self, id: Uuid) -> EngineResult<&mut LeaveRequest> {
        self.requests
            .get_mut(&id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "leave request",
                id: id.to_string(),
            })
    }

    /// Inserts a new leave request.
    pub fn insert_request(&mut self, request: LeaveRequest) {
        self.requests.insert(request.id, request);
    }

    /// Returns the expense claim with the given id.
    pub fn claim(&self, id: Uuid) -> EngineResult<&ExpenseClaim> {
        self.claims.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "expense claim",
            id: id.to_string(),
        })
    }

    /// Mutable access to an expense claim.
    pub fn claim_mut(&mut self, id: Uuid) -> EngineResult<&mut ExpenseClaim> {
        self.claims
            .get_mut(&id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "expense claim",
                id: id.to_string(),
            })
    }

    /// Inserts a new expense claim.
    pub fn insert_claim(&mut self, claim: ExpenseClaim) {
        self.claims.insert(claim.id, claim);
    }

    /// Returns the payslip with the given id.
    pub fn payslip(&self, id: Uuid) -> EngineResult<&Payslip> {
        self.payslips.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "payslip",
            id: id.to_string(),
        })
    }

    /// Mutable access to a payslip.
    pub fn payslip_mut(&mut self, id: Uuid) -> EngineResult<&mut Payslip> {
        self.payslips
            .get_mut(&id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "payslip",
                id: id.to_string(),
            })
    }

    /// True if a payslip already exists for (employee, period).
    pub fn payslip_exists(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> bool {
        self.payslips.values().any(|p| {
            p.employee_id == employee_id
                && p.period_start == period_start
                && p.period_end == period_end
        })
    }

    /// Inserts a new payslip.
    pub fn insert_payslip(&mut self, payslip: Payslip) {
        self.payslips.insert(payslip.id, payslip);
    }

    /// All payslips for one employee, sorted by period start.
    pub fn payslips_for(&self, employee_id: &str) -> Vec<Payslip> {
        let mut slips: Vec<Payslip> = self
            .payslips
            .values()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect();
        slips.sort_by_key(|p| p.period_start);
        slips
    }

    /// Stores the absence marker for an approved request.
    pub fn insert_event(&mut self, event: AbsenceEvent) {
        self.events.insert(event.request_id, event);
    }

    /// Deletes the absence marker for a request, if one exists.
    pub fn remove_event(&mut self, request_id: Uuid) -> Option<AbsenceEvent> {
        self.events.remove(&request_id)
    }

    /// All current absence markers.
    pub fn events(&self) -> Vec<AbsenceEvent> {
        self.events.values().cloned().collect()
    }

    /// Appends an audit entry.
    pub fn record_audit(&mut self, entry: AuditEntry) {
        self.audit_log.push(entry);
    }

    /// The audit log, oldest first.
    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit_log
    }
}
