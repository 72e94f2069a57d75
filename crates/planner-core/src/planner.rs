//! Scheduling operations over the task store.
//!
//! Every mutating operation follows the same order: normalize inputs (clamp
//! the duration), validate against the overlap rules, then apply. A rejected
//! operation leaves the store untouched. "Now" is always an explicit
//! parameter so expansion horizons stay deterministic under test.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::overlap::find_conflict;
use crate::recurrence::{generate_occurrences, recurrence_cap};
use crate::store::TaskStore;
use crate::task::{clamp_duration, Recurrence, Task};
use crate::time::{add_days, start_of_day, start_of_week};

/// Number of day columns shown per calendar page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "7d")]
    SevenDay,
    #[serde(rename = "4d")]
    FourDay,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::SevenDay
    }
}

/// Vertical density of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    Cozy,
    Relaxed,
}

impl Default for Density {
    fn default() -> Self {
        Density::Cozy
    }
}

/// View preferences persisted alongside the tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewPrefs {
    /// First visible day; `None` until the user navigates.
    #[serde(default)]
    pub view_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub density: Density,
    #[serde(default)]
    pub filter_text: String,
}

/// One entry of a calendar listing: either an anchor placement or a
/// generated occurrence of a recurring task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleEvent {
    pub task_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub duration_min: u32,
    pub is_recurring_instance: bool,
    pub occurrence_key: Option<String>,
}

/// Repeat selection as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatChoice {
    /// Clear any recurrence.
    None,
    Daily,
    /// Repeat weekly on the anchor's weekday.
    Weekly,
    /// Repeat on an explicit set of weekday indices (0=Sun ... 6=Sat).
    Custom(Vec<u8>),
}

/// The scheduling engine: a task store plus view preferences, mutated only
/// through validated, atomic operations.
#[derive(Debug, Default, Clone)]
pub struct Planner {
    store: TaskStore,
    prefs: ViewPrefs,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn prefs(&self) -> &ViewPrefs {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut ViewPrefs {
        &mut self.prefs
    }

    /// Create an unscheduled inbox task; the duration is clamped, never
    /// rejected. Returns the stored record.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        duration_min: u32,
        now: DateTime<Utc>,
    ) -> &Task {
        self.store.insert(Task::new(title, duration_min, now))
    }

    /// Create a task already placed on the calendar (quick-create on a
    /// slot). Rejected if the slot conflicts; nothing is created then.
    pub fn quick_create(
        &mut self,
        title: impl Into<String>,
        duration_min: u32,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<&Task> {
        let duration = clamp_duration(duration_min);
        if let Some(conflict) = find_conflict(&self.store, start, duration, None, now) {
            return Err(PlannerError::Overlap(conflict));
        }
        let mut task = Task::new(title, duration, now);
        task.scheduled_start = Some(start);
        Ok(self.store.insert(task))
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.store.get(id)
    }

    /// Place a task at `start` for `duration_min` minutes. Works for both
    /// inbox tasks and already-scheduled tasks being moved.
    pub fn schedule(
        &mut self,
        id: &str,
        start: DateTime<Utc>,
        duration_min: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.store.get(id).is_none() {
            return Err(PlannerError::NotFound { id: id.into() });
        }
        let duration = clamp_duration(duration_min);
        if let Some(conflict) = find_conflict(&self.store, start, duration, Some(id), now) {
            return Err(PlannerError::Overlap(conflict));
        }
        let task = self.store.get_mut(id).expect("checked above");
        task.scheduled_start = Some(start);
        task.duration_min = duration;
        Ok(())
    }

    /// Return a task to the inbox. Also clears its recurrence: a rule
    /// without an anchor has no interpretation, so it is dropped rather
    /// than left dormant.
    pub fn unschedule(&mut self, id: &str) -> Result<()> {
        let task = self
            .store
            .get_mut(id)
            .ok_or_else(|| PlannerError::NotFound { id: id.into() })?;
        task.scheduled_start = None;
        task.recurrence = None;
        Ok(())
    }

    /// Change a task's duration. For a scheduled task the new interval is
    /// re-validated at the existing anchor; on conflict the duration is
    /// left unchanged.
    pub fn resize(&mut self, id: &str, new_duration_min: u32, now: DateTime<Utc>) -> Result<()> {
        let task = self
            .store
            .get(id)
            .ok_or_else(|| PlannerError::NotFound { id: id.into() })?;
        let duration = clamp_duration(new_duration_min);

        if let Some(start) = task.scheduled_start {
            if let Some(conflict) = find_conflict(&self.store, start, duration, Some(id), now) {
                return Err(PlannerError::Overlap(conflict));
            }
        }
        self.store.get_mut(id).expect("checked above").duration_min = duration;
        Ok(())
    }

    /// Replace a task's title, leaving placement untouched.
    pub fn rename(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        let task = self
            .store
            .get_mut(id)
            .ok_or_else(|| PlannerError::NotFound { id: id.into() })?;
        task.title = title.into();
        Ok(())
    }

    /// Set or clear a task's recurrence rule.
    ///
    /// A non-`None` choice requires the task to be scheduled. The candidate
    /// rule is simulated from `now` to the cap horizon and every projected
    /// occurrence must be conflict-free; otherwise the whole operation is
    /// rejected and the failing occurrence is reported. No partial rule is
    /// ever persisted.
    pub fn set_recurrence(
        &mut self,
        id: &str,
        choice: RepeatChoice,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let task = self
            .store
            .get(id)
            .ok_or_else(|| PlannerError::NotFound { id: id.into() })?;

        if choice == RepeatChoice::None {
            self.store.get_mut(id).expect("checked above").recurrence = None;
            return Ok(());
        }

        let Some(anchor) = task.scheduled_start else {
            return Err(PlannerError::InvalidRecurrence {
                reason: "recurrence applies to scheduled tasks only".into(),
            });
        };

        let rule = match choice {
            RepeatChoice::None => unreachable!("handled above"),
            RepeatChoice::Daily => Recurrence::daily(),
            RepeatChoice::Weekly => Recurrence::weekly(anchor),
            RepeatChoice::Custom(ref days) => Recurrence::custom(days)?,
        };

        // Simulate the rule on a copy; the store stays untouched until
        // every projected occurrence has passed validation.
        let mut candidate = task.clone();
        candidate.recurrence = Some(rule.clone());
        let cap = recurrence_cap(now);

        for occ in generate_occurrences(&candidate, start_of_day(now), cap, cap) {
            if let Some(conflict) =
                find_conflict(&self.store, occ.start, candidate.duration_min, Some(id), now)
            {
                return Err(PlannerError::RecurrenceOverlap {
                    occurrence_start: occ.start,
                    occurrence_key: occ.key,
                    conflict,
                });
            }
        }

        self.store.get_mut(id).expect("checked above").recurrence = Some(rule);
        Ok(())
    }

    /// Remove a task unconditionally.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PlannerError::NotFound { id: id.into() })
    }

    /// Concrete placements and expanded occurrences intersecting
    /// `[window_start, window_end)`, ordered by start then task id.
    pub fn list_visible(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Vec<VisibleEvent> {
        self.list_visible_filtered(window_start, window_end, now, "")
    }

    /// [`list_visible`](Self::list_visible) restricted to tasks whose title
    /// contains `filter` (case-insensitive; empty matches everything).
    pub fn list_visible_filtered(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        now: DateTime<Utc>,
        filter: &str,
    ) -> Vec<VisibleEvent> {
        let cap = recurrence_cap(now);
        let mut out = Vec::new();

        for task in self.store.iter() {
            if !title_matches(&task.title, filter) {
                continue;
            }
            if let Some(start) = task.scheduled_start {
                if start >= window_start && start < window_end {
                    out.push(VisibleEvent {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        start,
                        duration_min: task.duration_min,
                        is_recurring_instance: false,
                        occurrence_key: None,
                    });
                }
            }
            for occ in generate_occurrences(task, window_start, window_end, cap) {
                if occ.start >= window_start && occ.start < window_end {
                    out.push(VisibleEvent {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        start: occ.start,
                        duration_min: task.duration_min,
                        is_recurring_instance: true,
                        occurrence_key: Some(occ.key),
                    });
                }
            }
        }

        out.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.task_id.cmp(&b.task_id)));
        out
    }

    /// Inbox tasks whose title contains `filter`.
    pub fn inbox_filtered(&self, filter: &str) -> Vec<&Task> {
        self.store
            .inbox()
            .filter(|t| title_matches(&t.title, filter))
            .collect()
    }

    /// Day columns per page for the current view mode.
    pub fn view_days(&self) -> i64 {
        match self.prefs.view_mode {
            ViewMode::SevenDay => 7,
            ViewMode::FourDay => 4,
        }
    }

    /// First visible day, defaulting to the current week/day when the user
    /// has not navigated yet.
    pub fn view_anchor(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.prefs.view_start.unwrap_or_else(|| self.default_anchor(now))
    }

    /// Page one view-width backwards.
    pub fn page_prev(&mut self, now: DateTime<Utc>) {
        let anchor = self.view_anchor(now);
        self.prefs.view_start = Some(add_days(anchor, -self.view_days()));
    }

    /// Page one view-width forwards.
    pub fn page_next(&mut self, now: DateTime<Utc>) {
        let anchor = self.view_anchor(now);
        self.prefs.view_start = Some(add_days(anchor, self.view_days()));
    }

    /// Jump back to today (week view snaps to Monday).
    pub fn go_today(&mut self, now: DateTime<Utc>) {
        self.prefs.view_start = Some(self.default_anchor(now));
    }

    fn default_anchor(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.prefs.view_mode {
            ViewMode::FourDay => start_of_day(now),
            ViewMode::SevenDay => start_of_week(now),
        }
    }

    pub(crate) fn from_parts(store: TaskStore, prefs: ViewPrefs) -> Self {
        Self { store, prefs }
    }

    /// End of the window starting at the view anchor.
    pub fn view_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        add_days(self.view_anchor(now), self.view_days())
    }
}

fn title_matches(title: &str, filter: &str) -> bool {
    let q = filter.trim().to_lowercase();
    q.is_empty() || title.to_lowercase().contains(&q)
}

// Duration helper kept close to the listing type since renderers need the
// end of each entry.
impl VisibleEvent {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.duration_min as i64)
    }
}
