//! Request types for the HR balance engine API.
//!
//! This module defines the JSON request structures for the engine's
//! endpoints. Every mutating request carries an explicit `actor` object:
//! the caller resolves who is acting (and in which role) up front, and
//! the engine re-validates authorization from that context.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    ActorContext, Employee, EmployeeStatus, NewExpenseClaim, NewLeaveRequest, Role, SalaryInfo,
};

/// The acting identity and role attached to a mutating request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorRequest {
    /// The acting employee's identifier.
    pub actor_id: String,
    /// The role the actor holds for this operation.
    pub role: Role,
}

impl From<ActorRequest> for ActorContext {
    fn from(req: ActorRequest) -> Self {
        ActorContext::new(req.actor_id, req.role)
    }
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The date the employee was hired.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// The employee's date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Employment status; defaults to active.
    #[serde(default = "default_status")]
    pub status: EmployeeStatus,
}

fn default_status() -> EmployeeStatus {
    EmployeeStatus::Active
}

impl From<RegisterEmployeeRequest> for Employee {
    fn from(req: RegisterEmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            hire_date: req.hire_date,
            date_of_birth: req.date_of_birth,
            status: req.status,
        }
    }
}

/// Request body for `PUT /employees/:id/salary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly fixed allowances.
    pub allowances: Decimal,
    /// Whether CPF contributions apply.
    pub cpf_applicable: bool,
    /// Override for the employee CPF rate (percent).
    #[serde(default)]
    pub cpf_employee_rate: Option<Decimal>,
    /// Override for the employer CPF rate (percent).
    #[serde(default)]
    pub cpf_employer_rate: Option<Decimal>,
}

impl SalaryRequest {
    /// Binds the body to the employee id from the request path.
    pub fn into_salary_info(self, employee_id: String) -> SalaryInfo {
        SalaryInfo {
            employee_id,
            basic_salary: self.basic_salary,
            allowances: self.allowances,
            cpf_applicable: self.cpf_applicable,
            cpf_employee_rate: self.cpf_employee_rate,
            cpf_employer_rate: self.cpf_employer_rate,
        }
    }
}

/// Request body for `POST /leave-requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    /// The acting identity.
    pub actor: ActorRequest,
    /// The leave application.
    pub request: NewLeaveRequest,
}

/// Request body for leave-request and expense-claim transitions
/// (approve, reject, cancel, reset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// The acting identity.
    pub actor: ActorRequest,
    /// Optional free-text reason (recorded on reject and reset).
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for `POST /expense-claims`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseClaim {
    /// The acting identity.
    pub actor: ActorRequest,
    /// The expense claim.
    pub request: NewExpenseClaim,
}

/// Request body for `POST /payroll/runs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The month to generate, 1-12.
    pub month: u32,
    /// The year to generate.
    pub year: i32,
    /// The payment release date; defaults to the computation date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// The date driving CPF age computation; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for `POST /rollover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloverRequest {
    /// The source year whose unused leave rolls forward.
    pub from_year: i32,
}

/// Query parameters for `GET /employees/:id/leave-balances/:year`.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceQuery {
    /// The read date driving proration; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_create_leave_request() {
        let json = r#"{
            "actor": { "actor_id": "emp_001", "role": "staff" },
            "request": {
                "employee_id": "emp_001",
                "leave_type": "annual",
                "start_date": "2026-03-02",
                "end_date": "2026-03-04"
            }
        }"#;

        let body: CreateLeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(body.actor.actor_id, "emp_001");
        assert_eq!(body.actor.role, Role::Staff);
        assert_eq!(body.request.leave_type, "annual");
        assert!(body.request.days.is_none());
    }

    #[test]
    fn test_deserialize_transition_without_reason() {
        let json = r#"{ "actor": { "actor_id": "hr_admin", "role": "hr" } }"#;
        let body: TransitionRequest = serde_json::from_str(json).unwrap();
        assert!(body.reason.is_none());
    }

    #[test]
    fn test_register_employee_defaults_to_active() {
        let json = r#"{ "id": "emp_001", "name": "Tan Wei Ming" }"#;
        let body: RegisterEmployeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(body.status, EmployeeStatus::Active);

        let employee: Employee = body.into();
        assert!(employee.is_active());
        assert!(employee.hire_date.is_none());
    }

    #[test]
    fn test_salary_request_binds_path_employee_id() {
        let body = SalaryRequest {
            basic_salary: Decimal::from_str("3000").unwrap(),
            allowances: Decimal::from_str("200").unwrap(),
            cpf_applicable: true,
            cpf_employee_rate: None,
            cpf_employer_rate: None,
        };

        let info = body.into_salary_info("emp_001".to_string());
        assert_eq!(info.employee_id, "emp_001");
        assert_eq!(info.basic_salary, Decimal::from_str("3000").unwrap());
    }

    #[test]
    fn test_payroll_run_request_optional_dates() {
        let json = r#"{ "month": 3, "year": 2026 }"#;
        let body: PayrollRunRequest = serde_json::from_str(json).unwrap();
        assert!(body.payment_date.is_none());
        assert!(body.as_of.is_none());
    }
}
