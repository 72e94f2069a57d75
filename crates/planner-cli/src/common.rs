//! Shared helpers for CLI commands.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use planner_core::time::{duration_label, format_hm};
use planner_core::Task;

/// Parse an instant from RFC 3339 (`2025-03-10T09:00:00Z`) or the short
/// `YYYY-MM-DD HH:MM` form.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    Err(format!("cannot parse '{input}' as a date-time (use RFC 3339 or 'YYYY-MM-DD HH:MM')").into())
}

/// Parse a date (`YYYY-MM-DD`) as midnight of that day.
pub fn parse_day(input: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("cannot parse '{input}' as a date (use YYYY-MM-DD)"))?;
    Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc())
}

/// One-line task summary for listings.
pub fn task_line(task: &Task) -> String {
    let placement = match task.scheduled_start {
        Some(start) => format!(
            "{} {}",
            start.format("%Y-%m-%d"),
            format_hm(start)
        ),
        None => "inbox".to_string(),
    };
    let repeat = if task.recurrence.is_some() { " \u{21bb}" } else { "" };
    format!(
        "{}  {}  [{} | {}]{}",
        task.id,
        task.title,
        duration_label(task.duration_min),
        placement,
        repeat
    )
}
