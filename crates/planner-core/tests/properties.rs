//! Property tests for clamping, overlap and recurrence expansion.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use planner_core::time::weekday_index;
use planner_core::{
    clamp_duration, generate_occurrences, intervals_overlap, recurrence_cap, snap_duration,
    Recurrence, Task, MAX_EVENT_DURATION, MIN_EVENT_DURATION, RESIZE_SNAP_MINUTES,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn clamp_stays_in_bounds(d in 0u32..100_000) {
        let clamped = clamp_duration(d);
        prop_assert!((MIN_EVENT_DURATION..=MAX_EVENT_DURATION).contains(&clamped));
        // Idempotent.
        prop_assert_eq!(clamp_duration(clamped), clamped);
        // Identity inside the bounds.
        if (MIN_EVENT_DURATION..=MAX_EVENT_DURATION).contains(&d) {
            prop_assert_eq!(clamped, d);
        }
    }

    #[test]
    fn snap_lands_on_grid(d in 0u32..100_000) {
        let snapped = snap_duration(d);
        prop_assert_eq!(snapped % RESIZE_SNAP_MINUTES, 0);
        prop_assert!((MIN_EVENT_DURATION..=MAX_EVENT_DURATION).contains(&snapped));
    }

    #[test]
    fn overlap_is_symmetric(
        s1 in 0i64..10_000,
        d1 in 1i64..600,
        s2 in 0i64..10_000,
        d2 in 1i64..600,
    ) {
        let a1 = base() + Duration::minutes(s1);
        let e1 = a1 + Duration::minutes(d1);
        let a2 = base() + Duration::minutes(s2);
        let e2 = a2 + Duration::minutes(d2);
        prop_assert_eq!(
            intervals_overlap(a1, e1, a2, e2),
            intervals_overlap(a2, e2, a1, e1)
        );
    }

    #[test]
    fn back_to_back_never_overlaps(s in 0i64..10_000, d1 in 1i64..600, d2 in 1i64..600) {
        let a1 = base() + Duration::minutes(s);
        let e1 = a1 + Duration::minutes(d1);
        let e2 = e1 + Duration::minutes(d2);
        prop_assert!(!intervals_overlap(a1, e1, e1, e2));
    }

    #[test]
    fn occurrences_respect_rule_anchor_and_cap(
        anchor_hour in 0u32..24,
        anchor_minute in 0u32..60,
        days in proptest::collection::vec(0u8..7, 1..7),
        window_days in 1i64..90,
    ) {
        let anchor = base() + Duration::hours(anchor_hour as i64) + Duration::minutes(anchor_minute as i64);
        let mut task = Task::new("Habit", 30, anchor);
        task.scheduled_start = Some(anchor);
        task.recurrence = Some(Recurrence::custom(&days).unwrap());

        let now = anchor;
        let cap = recurrence_cap(now);
        let occs = generate_occurrences(&task, base(), base() + Duration::days(window_days), cap);

        let rule = task.recurrence.as_ref().unwrap();
        for occ in &occs {
            prop_assert!(occ.start > anchor);
            prop_assert!(occ.start < cap);
            prop_assert!(rule.includes(weekday_index(occ.start)));
            let expected = format!("{}::{}", task.id, occ.start.format("%Y-%m-%d"));
            prop_assert_eq!(occ.key.as_str(), expected.as_str());
        }
    }
}
