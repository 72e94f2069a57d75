//! Core error types for planner-core.
//!
//! Every scheduling operation returns these as explicit values; no error is
//! fatal and the store remains valid after any rejected operation.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::overlap::Conflict;

/// Core error type for planner-core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// Operation referenced a task id that is not in the store.
    #[error("task not found: {id}")]
    NotFound { id: String },

    /// A proposed placement collides with an existing one.
    #[error("requested time overlaps {0}")]
    Overlap(Conflict),

    /// A candidate recurrence rule would produce a conflicting occurrence.
    /// Carries the occurrence that failed so the caller can surface the
    /// exact date and time to the user.
    #[error("occurrence at {occurrence_start} would overlap {conflict}")]
    RecurrenceOverlap {
        occurrence_start: DateTime<Utc>,
        occurrence_key: String,
        conflict: Conflict,
    },

    /// Recurrence rule malformed, or requested on an unscheduled task.
    #[error("invalid recurrence rule: {reason}")]
    InvalidRecurrence { reason: String },

    /// Boundary misuse not covered by duration clamping.
    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}

/// Result type alias for PlannerError.
pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
