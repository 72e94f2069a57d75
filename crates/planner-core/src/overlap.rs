//! Time-conflict detection.
//!
//! A proposed placement is checked against every concrete anchor placement
//! and against every occurrence that recurring tasks project into a bounded
//! window around "now". Intervals are half-open, so back-to-back events do
//! not conflict.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::recurrence::{generate_occurrences, recurrence_cap};
use crate::store::TaskStore;
use crate::time::{add_days, format_hm, start_of_day};

/// Details of a detected conflict, for user display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Task owning the conflicting interval.
    pub task_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// True when the interval is a generated occurrence rather than the
    /// anchor placement itself.
    pub is_recurring_instance: bool,
    pub occurrence_key: Option<String>,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({} {}-{})",
            self.title,
            self.start.format("%Y-%m-%d"),
            format_hm(self.start),
            format_hm(self.end),
        )
    }
}

/// Half-open interval intersection: `[s1, e1)` overlaps `[s2, e2)`.
pub fn intervals_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Find the first placement conflicting with `[start, start + duration)`.
///
/// Anchors are checked first, then recurring occurrences expanded over
/// `[start_of_day(now) - 1 day, now + cap)`. The one-day lookback catches
/// occurrences that began just before "now" but whose duration extends past
/// it. `exclude_id` skips the task being edited so it never conflicts with
/// itself.
pub fn find_conflict(
    store: &TaskStore,
    start: DateTime<Utc>,
    duration_min: u32,
    exclude_id: Option<&str>,
    now: DateTime<Utc>,
) -> Option<Conflict> {
    let end = start + Duration::minutes(duration_min as i64);

    for task in store.iter() {
        let Some(s2) = task.scheduled_start else {
            continue;
        };
        if exclude_id == Some(task.id.as_str()) {
            continue;
        }
        let e2 = s2 + Duration::minutes(task.duration_min as i64);
        if intervals_overlap(start, end, s2, e2) {
            return Some(Conflict {
                task_id: task.id.clone(),
                title: task.title.clone(),
                start: s2,
                end: e2,
                is_recurring_instance: false,
                occurrence_key: None,
            });
        }
    }

    let cap = recurrence_cap(now);
    let lookback = add_days(start_of_day(now), -1);

    for task in store.iter() {
        if task.recurrence.is_none() || task.scheduled_start.is_none() {
            continue;
        }
        if exclude_id == Some(task.id.as_str()) {
            continue;
        }
        for occ in generate_occurrences(task, lookback, cap, cap) {
            let e2 = occ.start + Duration::minutes(task.duration_min as i64);
            if intervals_overlap(start, end, occ.start, e2) {
                return Some(Conflict {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    start: occ.start,
                    end: e2,
                    is_recurring_instance: true,
                    occurrence_key: Some(occ.key),
                });
            }
        }
    }

    None
}

/// Boolean form of [`find_conflict`].
pub fn has_overlap(
    store: &TaskStore,
    start: DateTime<Utc>,
    duration_min: u32,
    exclude_id: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    find_conflict(store, start, duration_min, exclude_id, now).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Recurrence, Task};
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn store_with(tasks: Vec<Task>) -> TaskStore {
        TaskStore::from_tasks(tasks)
    }

    fn scheduled(title: &str, start: DateTime<Utc>, duration: u32) -> Task {
        let mut t = Task::new(title, duration, start);
        t.scheduled_start = Some(start);
        t
    }

    #[test]
    fn containment_overlaps_back_to_back_does_not() {
        let s1 = at(2025, 3, 10, 10, 0);
        let e1 = at(2025, 3, 10, 11, 0);

        // [10:00,11:00) vs [10:30,11:30) overlap
        assert!(intervals_overlap(s1, e1, at(2025, 3, 10, 10, 30), at(2025, 3, 10, 11, 30)));
        // [10:00,11:00) vs [11:00,12:00) do not
        assert!(!intervals_overlap(s1, e1, at(2025, 3, 10, 11, 0), at(2025, 3, 10, 12, 0)));
        // symmetry
        assert!(intervals_overlap(at(2025, 3, 10, 10, 30), at(2025, 3, 10, 11, 30), s1, e1));
    }

    #[test]
    fn conflict_with_anchor_placement() {
        let now = at(2025, 3, 10, 8, 0);
        let store = store_with(vec![scheduled("Standup", at(2025, 3, 10, 9, 0), 60)]);

        let conflict = find_conflict(&store, at(2025, 3, 10, 9, 30), 30, None, now).unwrap();
        assert_eq!(conflict.title, "Standup");
        assert!(!conflict.is_recurring_instance);
        assert_eq!(conflict.start, at(2025, 3, 10, 9, 0));
        assert_eq!(conflict.end, at(2025, 3, 10, 10, 0));

        // Back-to-back is allowed.
        assert!(!has_overlap(&store, at(2025, 3, 10, 10, 0), 30, None, now));
    }

    #[test]
    fn exclude_skips_the_task_itself() {
        let now = at(2025, 3, 10, 8, 0);
        let task = scheduled("Standup", at(2025, 3, 10, 9, 0), 60);
        let id = task.id.clone();
        let store = store_with(vec![task]);

        // Moving the same task over its own slot is fine.
        assert!(!has_overlap(&store, at(2025, 3, 10, 9, 15), 60, Some(&id), now));
        assert!(has_overlap(&store, at(2025, 3, 10, 9, 15), 60, None, now));
    }

    #[test]
    fn conflict_with_generated_occurrence() {
        let now = at(2025, 3, 10, 8, 0);
        let mut daily = scheduled("Workout session", at(2025, 3, 10, 9, 0), 60);
        daily.recurrence = Some(Recurrence::daily());
        let store = store_with(vec![daily]);

        // Wednesday 09:30 collides with the projected Wednesday 09:00 occurrence.
        let conflict = find_conflict(&store, at(2025, 3, 12, 9, 30), 30, None, now).unwrap();
        assert!(conflict.is_recurring_instance);
        assert_eq!(conflict.start, at(2025, 3, 12, 9, 0));
        assert!(conflict.occurrence_key.is_some());
    }

    #[test]
    fn occurrences_beyond_cap_do_not_conflict() {
        let now = at(2025, 3, 10, 8, 0);
        let mut daily = scheduled("Workout session", at(2025, 3, 10, 9, 0), 60);
        daily.recurrence = Some(Recurrence::daily());
        let store = store_with(vec![daily]);

        // 40 days out is past the 30-day horizon.
        assert!(!has_overlap(&store, at(2025, 4, 19, 9, 0), 60, None, now));
    }
}
