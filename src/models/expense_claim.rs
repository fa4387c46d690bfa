//! Expense claim model.
//!
//! Expense claims share the request lifecycle (and its authorization and
//! reset rules) with leave requests but carry a monetary amount instead of
//! a day count and touch no balance row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RequestStatus;

/// Represents one employee's expense claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseClaim {
    /// Unique identifier for the claim.
    pub id: Uuid,
    /// The employee claiming the expense.
    pub employee_id: String,
    /// Expense category (e.g., "transport", "medical").
    pub category: String,
    /// The claimed amount.
    pub amount: Decimal,
    /// Free-text description of the expense.
    pub description: String,
    /// Reference to the uploaded receipt, if any.
    pub receipt: Option<String>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// The reviewer who decided the claim, if decided.
    pub approver: Option<String>,
    /// When the claim was approved or rejected.
    pub decided_at: Option<DateTime<Utc>>,
    /// The reviewer's reason, recorded on rejection.
    pub rejection_reason: Option<String>,
    /// When the claim was submitted.
    pub created_at: DateTime<Utc>,
}

/// Input for submitting an expense claim.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewExpenseClaim {
    /// The employee claiming the expense.
    pub employee_id: String,
    /// Expense category.
    pub category: String,
    /// The claimed amount; must be positive.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Reference to the uploaded receipt.
    #[serde(default)]
    pub receipt: Option<String>,
}
