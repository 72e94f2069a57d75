//! Recurrence expansion.
//!
//! A recurring task stores one anchor placement plus a weekly day-of-week
//! rule; the concrete future occurrences are derived on demand here and are
//! never persisted. Expansion is a pure function of its inputs: "now" enters
//! only through the caller-supplied cap instant.

use chrono::{DateTime, Timelike, Utc};

use crate::task::{Task, RECURRENCE_CAP_DAYS};
use crate::time::{add_days, start_of_day, weekday_index};

/// A concrete calendar instant implied by a recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Stable key `"{task_id}::{YYYY-MM-DD}"`, unique per task and date.
    pub key: String,
    pub task_id: String,
    pub start: DateTime<Utc>,
}

/// The hard expansion horizon: no occurrence is ever generated at or beyond
/// `now + RECURRENCE_CAP_DAYS`.
pub fn recurrence_cap(now: DateTime<Utc>) -> DateTime<Utc> {
    add_days(now, RECURRENCE_CAP_DAYS)
}

/// Stable identifier for one occurrence of a task on a given date.
pub fn occurrence_key(task_id: &str, start: DateTime<Utc>) -> String {
    format!("{}::{}", task_id, start.format("%Y-%m-%d"))
}

/// Expand a recurring task into the occurrences falling inside
/// `[window_start, min(window_end, cap))`.
///
/// Returns an empty vec when the task has no recurrence or no anchor; that
/// is a convenience no-op so callers can iterate mixed task lists. The
/// anchor itself is never re-emitted: only instants strictly after it
/// qualify.
pub fn generate_occurrences(
    task: &Task,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    cap: DateTime<Utc>,
) -> Vec<Occurrence> {
    let (Some(rule), Some(anchor)) = (&task.recurrence, task.scheduled_start) else {
        return Vec::new();
    };
    if rule.days.is_empty() {
        return Vec::new();
    }

    let hour = anchor.hour();
    let minute = anchor.minute();
    let effective_end = window_end.min(cap);

    let mut out = Vec::new();
    let mut day = start_of_day(window_start);
    while day < effective_end {
        if rule.includes(weekday_index(day)) {
            // `day` is a midnight, so re-timing it cannot fail.
            if let Some(occ) = day.with_hour(hour).and_then(|d| d.with_minute(minute)) {
                if occ > anchor && occ < effective_end {
                    out.push(Occurrence {
                        key: occurrence_key(&task.id, occ),
                        task_id: task.id.clone(),
                        start: occ,
                    });
                }
            }
        }
        day = add_days(day, 1);
    }
    out
}
