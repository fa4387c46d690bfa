//! Salary configuration per employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Static salary input to payroll computation, one active record per
/// employee. Mutated by HR; read-only to the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInfo {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly fixed allowances.
    pub allowances: Decimal,
    /// Whether CPF contributions apply to this employee.
    pub cpf_applicable: bool,
    /// Override for the employee CPF rate (percent); band rate when absent.
    #[serde(default)]
    pub cpf_employee_rate: Option<Decimal>,
    /// Override for the employer CPF rate (percent); band rate when absent.
    #[serde(default)]
    pub cpf_employer_rate: Option<Decimal>,
}
