//! Task model and recurrence rules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::time::weekday_index;

/// Minimum event duration in minutes.
pub const MIN_EVENT_DURATION: u32 = 15;
/// Maximum event duration in minutes (8 hours).
pub const MAX_EVENT_DURATION: u32 = 480;
/// Maximum days into the future for which recurring occurrences are expanded.
pub const RECURRENCE_CAP_DAYS: i64 = 30;
/// Duration assigned when the caller does not supply one.
pub const DEFAULT_TASK_DURATION: u32 = 60;
/// Granularity for snapped resize operations.
pub const RESIZE_SNAP_MINUTES: u32 = 15;

/// Clamp a duration into `[MIN_EVENT_DURATION, MAX_EVENT_DURATION]`.
pub fn clamp_duration(minutes: u32) -> u32 {
    minutes.clamp(MIN_EVENT_DURATION, MAX_EVENT_DURATION)
}

/// Round a duration to the nearest [`RESIZE_SNAP_MINUTES`] increment, then clamp.
pub fn snap_duration(minutes: u32) -> u32 {
    let snapped =
        minutes.saturating_add(RESIZE_SNAP_MINUTES / 2) / RESIZE_SNAP_MINUTES * RESIZE_SNAP_MINUTES;
    clamp_duration(snapped)
}

/// Kind of recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    /// Repeats every day of the week.
    Daily,
    /// Repeats on the anchor's weekday.
    Weekly,
    /// Repeats on a user-chosen set of weekdays.
    Custom,
}

/// A weekly day-of-week recurrence rule.
///
/// `days` holds weekday indices with Sunday=0 ... Saturday=6, sorted and
/// deduplicated, never empty. Use the constructors rather than building the
/// struct directly so those invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub kind: RecurrenceKind,
    pub days: Vec<u8>,
}

impl Recurrence {
    /// Rule repeating on all seven weekdays.
    pub fn daily() -> Self {
        Self {
            kind: RecurrenceKind::Daily,
            days: vec![0, 1, 2, 3, 4, 5, 6],
        }
    }

    /// Rule repeating weekly on the anchor's weekday.
    pub fn weekly(anchor: DateTime<Utc>) -> Self {
        Self {
            kind: RecurrenceKind::Weekly,
            days: vec![weekday_index(anchor)],
        }
    }

    /// Rule repeating on a custom set of weekdays.
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidRecurrence`] if `days` is empty or
    /// contains an index outside 0..=6.
    pub fn custom(days: &[u8]) -> Result<Self, PlannerError> {
        if days.is_empty() {
            return Err(PlannerError::InvalidRecurrence {
                reason: "custom recurrence requires at least one weekday".into(),
            });
        }
        if let Some(bad) = days.iter().find(|d| **d > 6) {
            return Err(PlannerError::InvalidRecurrence {
                reason: format!("weekday index {bad} out of range (0=Sun ... 6=Sat)"),
            });
        }
        let mut days: Vec<u8> = days.to_vec();
        days.sort_unstable();
        days.dedup();
        Ok(Self {
            kind: RecurrenceKind::Custom,
            days,
        })
    }

    /// Whether the rule fires on the given weekday index.
    pub fn includes(&self, weekday: u8) -> bool {
        self.days.contains(&weekday)
    }
}

/// The sole scheduling entity.
///
/// A task with `scheduled_start: None` sits in the inbox. A scheduled task
/// occupies `[scheduled_start, scheduled_start + duration)` on the calendar;
/// that anchor placement is canonical and is never re-derived from the
/// recurrence rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Duration in minutes, always within `[15, 480]`.
    pub duration_min: u32,
    /// Anchor instant; `None` means the task is unscheduled.
    pub scheduled_start: Option<DateTime<Utc>>,
    /// Optional repeat rule; only meaningful while an anchor is set.
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an unscheduled inbox task with a clamped duration.
    pub fn new(title: impl Into<String>, duration_min: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            duration_min: clamp_duration(duration_min),
            scheduled_start: None,
            recurrence: None,
            created_at,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled_start.is_some()
    }

    /// End of the anchor placement, if scheduled.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.scheduled_start
            .map(|s| s + Duration::minutes(self.duration_min as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_duration(0), MIN_EVENT_DURATION);
        assert_eq!(clamp_duration(14), MIN_EVENT_DURATION);
        assert_eq!(clamp_duration(15), 15);
        assert_eq!(clamp_duration(60), 60);
        assert_eq!(clamp_duration(480), 480);
        assert_eq!(clamp_duration(9999), MAX_EVENT_DURATION);
    }

    #[test]
    fn snap_rounds_to_quarter_hour() {
        assert_eq!(snap_duration(52), 45);
        assert_eq!(snap_duration(53), 60);
        assert_eq!(snap_duration(60), 60);
        assert_eq!(snap_duration(7), MIN_EVENT_DURATION);
        assert_eq!(snap_duration(500), MAX_EVENT_DURATION);
        assert_eq!(snap_duration(u32::MAX), MAX_EVENT_DURATION);
    }

    #[test]
    fn weekly_uses_anchor_weekday() {
        // 2025-03-11 is a Tuesday.
        let anchor = Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();
        let rule = Recurrence::weekly(anchor);
        assert_eq!(rule.days, vec![2]);
        assert!(rule.includes(2));
        assert!(!rule.includes(3));
    }

    #[test]
    fn custom_rejects_empty_and_out_of_range() {
        assert!(Recurrence::custom(&[]).is_err());
        assert!(Recurrence::custom(&[7]).is_err());

        let rule = Recurrence::custom(&[5, 1, 3, 1]).unwrap();
        assert_eq!(rule.days, vec![1, 3, 5]);
    }

    #[test]
    fn daily_covers_all_weekdays() {
        let rule = Recurrence::daily();
        for wd in 0..=6u8 {
            assert!(rule.includes(wd));
        }
    }

    #[test]
    fn new_task_clamps_duration() {
        let now = Utc::now();
        let t = Task::new("Read 20 pages", 5, now);
        assert_eq!(t.duration_min, MIN_EVENT_DURATION);
        assert!(!t.is_scheduled());
        assert!(t.end_time().is_none());
    }

    #[test]
    fn task_serialization_round_trip() {
        let anchor = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let mut task = Task::new("Workout session", 60, anchor);
        task.scheduled_start = Some(anchor);
        task.recurrence = Some(Recurrence::custom(&[1, 3, 5]).unwrap());

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, decoded);
    }
}
