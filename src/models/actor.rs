//! Actor context for authorization decisions.
//!
//! The effective role and identity for an operation are resolved once by
//! the caller (the HTTP layer or a test harness) and passed by parameter.
//! The engine never inspects ambient state to decide who is acting.

use serde::{Deserialize, Serialize};

/// The role an actor holds for the duration of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular employee; may submit and cancel their own requests.
    Staff,
    /// A manager; may decide requests for their reports.
    Manager,
    /// An HR officer; may decide requests and run payroll.
    Hr,
    /// A system administrator.
    Admin,
}

impl Role {
    /// Returns true if the role may approve, reject or reset requests.
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Role::Manager | Role::Hr | Role::Admin)
    }
}

/// The resolved identity and role under which one operation executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// The acting employee's identifier.
    pub actor_id: String,
    /// The role the actor holds for this operation.
    pub role: Role,
}

impl ActorContext {
    /// Creates a new actor context.
    pub fn new(actor_id: impl Into<String>, role: Role) -> Self {
        Self {
            actor_id: actor_id.into(),
            role,
        }
    }
}
