//! Leave request model and lifecycle status.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status shared by leave requests and expense claims.
///
/// Transitions: `Pending` may become `Approved`, `Rejected` or `Cancelled`;
/// `Approved` and `Rejected` may be reset back to `Pending` by a reviewer;
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision; days are reserved in `pending`.
    Pending,
    /// Approved by a reviewer; days have moved from `pending` to `used`.
    Approved,
    /// Rejected by a reviewer; reserved days were released.
    Rejected,
    /// Withdrawn by the owner before a decision. Terminal.
    Cancelled,
}

impl RequestStatus {
    /// Returns the lowercase wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

/// Represents one employee's leave application.
///
/// The `days` value is fixed at creation and never recomputed; every
/// balance mutation for this request uses exactly this figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee the leave is for.
    pub employee_id: String,
    /// The leave type code (e.g., "annual").
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of days requested, in half-day steps.
    pub days: Decimal,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// The reviewer who decided the request, if decided.
    pub approver: Option<String>,
    /// When the request was approved or rejected.
    pub decided_at: Option<DateTime<Utc>>,
    /// The reviewer's reason, recorded on rejection.
    pub rejection_reason: Option<String>,
    /// Reference to a supporting document, if one was attached.
    pub document: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a leave request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewLeaveRequest {
    /// The employee the leave is for.
    pub employee_id: String,
    /// The leave type code.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of days requested. When omitted, defaults to the inclusive
    /// calendar span of `start_date..=end_date`.
    pub days: Option<Decimal>,
    /// Reference to a supporting document.
    #[serde(default)]
    pub document: Option<String>,
}
