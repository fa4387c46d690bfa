//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum
//! for representing workers whose balances the engine maintains.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee's employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed; included in payroll runs and rollover.
    Active,
    /// No longer employed; skipped by batch operations.
    Inactive,
}

/// Represents an employee whose leave and payroll records the engine owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The date the employee was hired. An employee with no recorded hire
    /// date is treated as a full-year existing employee for proration.
    pub hire_date: Option<NaiveDate>,
    /// The employee's date of birth, required for CPF age banding.
    pub date_of_birth: Option<NaiveDate>,
    /// The employee's employment status.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee is in an active status.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrm_engine::models::{Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Tan Wei Ming".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1),
    ///     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(status: EmployeeStatus) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Tan Wei Ming".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2023, 6, 1),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15),
            status,
        }
    }

    #[test]
    fn test_deserialize_active_employee() {
        let json = r#"{
            "id": "emp_001",
            "name": "Tan Wei Ming",
            "hire_date": "2023-06-01",
            "date_of_birth": "1990-01-15",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(
            employee.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 15)
        );
    }

    #[test]
    fn test_deserialize_employee_without_hire_date() {
        let json = r#"{
            "id": "emp_002",
            "name": "Lim Hui Fen",
            "hire_date": null,
            "date_of_birth": null,
            "status": "inactive"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.hire_date.is_none());
        assert!(employee.date_of_birth.is_none());
        assert_eq!(employee.status, EmployeeStatus::Inactive);
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee(EmployeeStatus::Active);
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_is_active_returns_true_for_active() {
        let employee = create_test_employee(EmployeeStatus::Active);
        assert!(employee.is_active());
    }

    #[test]
    fn test_is_active_returns_false_for_inactive() {
        let employee = create_test_employee(EmployeeStatus::Inactive);
        assert!(!employee.is_active());
    }

    #[test]
    fn test_employee_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }
}
