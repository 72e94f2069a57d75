//! # Planner Core Library
//!
//! Scheduling and recurrence engine for a personal task/event planner:
//! unscheduled tasks live in an inbox, any task can be placed on the
//! calendar with a start and duration, and a placed task can repeat on a
//! weekly day-of-week pattern.
//!
//! The engine is deliberately free of I/O and clocks: "now" is always an
//! explicit parameter, and the whole state serializes as one
//! [`PlannerSnapshot`] that collaborators (CLI, GUI, storage) load and save
//! when they see fit.
//!
//! ## Key components
//!
//! - [`Planner`]: atomic, validated scheduling operations over the store
//! - [`generate_occurrences`]: bounded expansion of recurrence rules
//! - [`find_conflict`]: overlap detection across anchors and occurrences
//! - [`TaskStore`]: in-memory source of truth for task records

pub mod error;
pub mod overlap;
pub mod planner;
pub mod recurrence;
pub mod snapshot;
pub mod store;
pub mod task;
pub mod time;

pub use error::{PlannerError, Result};
pub use overlap::{find_conflict, has_overlap, intervals_overlap, Conflict};
pub use planner::{Density, Planner, RepeatChoice, ViewMode, ViewPrefs, VisibleEvent};
pub use recurrence::{generate_occurrences, occurrence_key, recurrence_cap, Occurrence};
pub use snapshot::{sample_tasks, PlannerSnapshot};
pub use store::TaskStore;
pub use task::{
    clamp_duration, snap_duration, Recurrence, RecurrenceKind, Task, DEFAULT_TASK_DURATION,
    MAX_EVENT_DURATION, MIN_EVENT_DURATION, RECURRENCE_CAP_DAYS, RESIZE_SNAP_MINUTES,
};
