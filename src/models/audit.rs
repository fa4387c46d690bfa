//! Audit log entries for reset transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityKind {
    /// A leave request.
    LeaveRequest,
    /// An expense claim.
    ExpenseClaim,
}

/// One structured audit record, written whenever a reviewer resets a
/// decided request back to pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The reviewer who performed the reset.
    pub actor_id: String,
    /// The kind of entity that was reset.
    pub entity_kind: AuditEntityKind,
    /// The identifier of the entity that was reset.
    pub entity_id: Uuid,
    /// The status the entity held before the reset.
    pub prior_status: String,
    /// The status the entity holds after the reset.
    pub new_status: String,
    /// Optional free-text reason supplied by the reviewer.
    pub reason: Option<String>,
    /// When the reset was recorded.
    pub recorded_at: DateTime<Utc>,
}
