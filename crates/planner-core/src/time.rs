//! Calendar arithmetic helpers.
//!
//! All scheduling logic works on a single canonical timeline
//! (`DateTime<Utc>`); day boundaries and weekday indices are derived here so
//! the rest of the crate never touches raw date math.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Timelike, Utc};

/// Midnight (00:00:00) of the same date.
pub fn start_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Midnight of the Monday on or before the given instant.
pub fn start_of_week(t: DateTime<Utc>) -> DateTime<Utc> {
    let back = (weekday_index(t) as i64 + 6) % 7;
    start_of_day(t) - Duration::days(back)
}

/// Add `n` whole days; `n` may be negative.
pub fn add_days(t: DateTime<Utc>, n: i64) -> DateTime<Utc> {
    t + Duration::days(n)
}

/// Whole days between the day-starts of `a` and `b` (positive when `b` is later).
pub fn diff_days(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (start_of_day(b) - start_of_day(a)).num_days()
}

/// Whether two instants fall on the same calendar date.
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Weekday index with Sunday=0 ... Saturday=6.
pub fn weekday_index(t: DateTime<Utc>) -> u8 {
    t.weekday().num_days_from_sunday() as u8
}

/// Format an instant as `HH:MM`.
pub fn format_hm(t: DateTime<Utc>) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Human-readable duration label: `45m`, `1h`, `1h 30m`.
pub fn duration_label(minutes: u32) -> String {
    if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn start_of_day_truncates_time() {
        let t = at(2025, 3, 14, 15, 9);
        assert_eq!(start_of_day(t), at(2025, 3, 14, 0, 0));
    }

    #[test]
    fn start_of_week_lands_on_monday() {
        // 2025-03-14 is a Friday; the preceding Monday is 2025-03-10.
        let friday = at(2025, 3, 14, 15, 9);
        assert_eq!(start_of_week(friday), at(2025, 3, 10, 0, 0));

        // A Monday maps to its own midnight.
        let monday = at(2025, 3, 10, 8, 0);
        assert_eq!(start_of_week(monday), at(2025, 3, 10, 0, 0));

        // A Sunday maps back six days.
        let sunday = at(2025, 3, 16, 23, 59);
        assert_eq!(start_of_week(sunday), at(2025, 3, 10, 0, 0));
    }

    #[test]
    fn add_days_handles_month_rollover() {
        assert_eq!(add_days(at(2025, 1, 30, 12, 0), 3), at(2025, 2, 2, 12, 0));
        assert_eq!(add_days(at(2025, 3, 1, 12, 0), -1), at(2025, 2, 28, 12, 0));
    }

    #[test]
    fn diff_days_ignores_time_of_day() {
        assert_eq!(diff_days(at(2025, 3, 10, 23, 0), at(2025, 3, 11, 1, 0)), 1);
        assert_eq!(diff_days(at(2025, 3, 11, 1, 0), at(2025, 3, 10, 23, 0)), -1);
        assert_eq!(diff_days(at(2025, 3, 10, 0, 0), at(2025, 3, 10, 23, 59)), 0);
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        assert_eq!(weekday_index(at(2025, 3, 16, 0, 0)), 0); // Sunday
        assert_eq!(weekday_index(at(2025, 3, 10, 0, 0)), 1); // Monday
        assert_eq!(weekday_index(at(2025, 3, 15, 0, 0)), 6); // Saturday
    }

    #[test]
    fn duration_labels() {
        assert_eq!(duration_label(45), "45m");
        assert_eq!(duration_label(60), "1h");
        assert_eq!(duration_label(90), "1h 30m");
        assert_eq!(duration_label(480), "8h");
    }
}
