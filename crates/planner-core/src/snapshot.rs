//! Serializable planner state.
//!
//! The engine itself has no I/O; collaborators serialize the whole state as
//! one snapshot (tasks plus view preferences) and decide when to load and
//! save it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::planner::{Density, Planner, ViewMode, ViewPrefs};
use crate::store::TaskStore;
use crate::task::Task;

/// Full planner state as a plain serde document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    #[serde(default)]
    pub view_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub density: Density,
    #[serde(default)]
    pub filter_text: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Planner {
    /// Capture the complete state for persistence.
    pub fn snapshot(&self) -> PlannerSnapshot {
        let prefs = self.prefs();
        PlannerSnapshot {
            view_start: prefs.view_start,
            view_mode: prefs.view_mode,
            density: prefs.density,
            filter_text: prefs.filter_text.clone(),
            tasks: self.store().iter().cloned().collect(),
        }
    }

    /// Rebuild a planner from a previously captured snapshot.
    pub fn from_snapshot(snapshot: PlannerSnapshot) -> Self {
        let prefs = ViewPrefs {
            view_start: snapshot.view_start,
            view_mode: snapshot.view_mode,
            density: snapshot.density,
            filter_text: snapshot.filter_text,
        };
        Planner::from_parts(TaskStore::from_tasks(snapshot.tasks), prefs)
    }

    /// Fresh planner seeded with the first-run sample inbox.
    pub fn with_sample_tasks(now: DateTime<Utc>) -> Self {
        let store = TaskStore::from_tasks(sample_tasks(now));
        Planner::from_parts(store, ViewPrefs::default())
    }
}

/// Starter tasks for first-time users.
pub fn sample_tasks(now: DateTime<Utc>) -> Vec<Task> {
    vec![
        Task::new("Read 20 pages", 45, now),
        Task::new("Workout session", 60, now),
        Task::new("Write blog paragraph", 30, now),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::RepeatChoice;
    use chrono::TimeZone;

    #[test]
    fn snapshot_round_trip_is_lossless() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let mut planner = Planner::with_sample_tasks(now);
        let id = planner.create_task("Weekly review", 60, now).id.clone();
        planner
            .schedule(&id, Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap(), 60, now)
            .unwrap();
        planner.set_recurrence(&id, RepeatChoice::Weekly, now).unwrap();
        planner.prefs_mut().filter_text = "review".into();
        planner.prefs_mut().density = Density::Relaxed;
        planner.go_today(now);

        let snap = planner.snapshot();
        let json = serde_json::to_string_pretty(&snap).unwrap();
        let decoded: PlannerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, decoded);

        let restored = Planner::from_snapshot(decoded);
        assert_eq!(restored.snapshot(), snap);

        // Recurrence rule fidelity survives the trip.
        let task = restored.find_task(&id).unwrap();
        assert_eq!(task.recurrence.as_ref().unwrap().days, vec![2]);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let snap: PlannerSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, PlannerSnapshot::default());
        assert_eq!(snap.view_mode, ViewMode::SevenDay);
        assert_eq!(snap.density, Density::Cozy);
    }

    #[test]
    fn sample_inbox_is_unscheduled() {
        let now = Utc::now();
        let planner = Planner::with_sample_tasks(now);
        assert_eq!(planner.store().len(), 3);
        assert_eq!(planner.store().inbox().count(), 3);
    }
}
