//! Absence markers emitted to the calendar layer.
//!
//! The engine creates one marker when a leave request is approved and
//! deletes it again when the approval is reset. The marker's presentation
//! (title, colour) is owned by the calendar component, not this engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visibility marker for an approved absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceEvent {
    /// Unique identifier for the marker.
    pub id: Uuid,
    /// The approved leave request this marker belongs to.
    pub request_id: Uuid,
    /// The absent employee.
    pub employee_id: String,
    /// Marker title (employee name and leave type).
    pub title: String,
    /// First day of the absence (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the absence (inclusive).
    pub end_date: NaiveDate,
}
