//! Agenda listing: scheduled events and recurring occurrences per day.

use chrono::Utc;

use planner_core::time::{add_days, duration_label, format_hm, start_of_day};
use planner_core::VisibleEvent;

use crate::common::parse_day;
use crate::config::CliConfig;
use crate::storage::load_planner;

pub fn run(
    from: Option<String>,
    days: Option<i64>,
    filter: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load()?;
    let planner = load_planner(&config)?;
    let now = Utc::now();

    let window_start = match from {
        Some(spec) => parse_day(&spec)?,
        None => planner.view_anchor(now),
    };
    let days = days.unwrap_or_else(|| planner.view_days());
    if days <= 0 {
        return Err("--days must be positive".into());
    }
    let window_end = add_days(window_start, days);
    let filter = filter.unwrap_or_else(|| planner.prefs().filter_text.clone());

    let events = planner.list_visible_filtered(window_start, window_end, now, &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!(
            "No events between {} and {}.",
            window_start.format("%Y-%m-%d"),
            window_end.format("%Y-%m-%d")
        );
        return Ok(());
    }

    let mut current_day = None;
    for event in &events {
        let day = start_of_day(event.start);
        if current_day != Some(day) {
            println!("{}", day.format("%a %Y-%m-%d"));
            current_day = Some(day);
        }
        println!("  {}", event_line(event));
    }
    Ok(())
}

fn event_line(event: &VisibleEvent) -> String {
    let marker = if event.is_recurring_instance { " \u{21bb}" } else { "" };
    format!(
        "{}-{}  {} ({}){}",
        format_hm(event.start),
        format_hm(event.end()),
        event.title,
        duration_label(event.duration_min),
        marker
    )
}
