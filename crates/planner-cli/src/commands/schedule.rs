//! Calendar placement commands: schedule, unschedule, resize, repeat.

use chrono::Utc;
use clap::Subcommand;

use planner_core::{snap_duration, RepeatChoice};

use crate::common::parse_instant;
use crate::config::CliConfig;
use crate::storage::{load_planner, save_planner};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Place a task at a start time
    Set {
        /// Task ID
        id: String,
        /// Start instant ('YYYY-MM-DD HH:MM' or RFC 3339)
        start: String,
        /// Duration in minutes (defaults to the task's current duration)
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Return a task to the inbox (also clears its recurrence)
    Unschedule {
        /// Task ID
        id: String,
    },
    /// Change a task's duration
    Resize {
        /// Task ID
        id: String,
        /// New duration in minutes
        duration: u32,
        /// Snap the duration to 15-minute increments first
        #[arg(long)]
        snap: bool,
    },
    /// Set or clear the repeat rule
    Repeat {
        /// Task ID
        id: String,
        /// One of: none, daily, weekly, custom
        rule: String,
        /// Weekdays for a custom rule, comma-separated (0=Sun ... 6=Sat)
        #[arg(long)]
        days: Option<String>,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load()?;
    let mut planner = load_planner(&config)?;
    let now = Utc::now();

    match action {
        ScheduleAction::Set { id, start, duration } => {
            let start = parse_instant(&start)?;
            let duration = duration
                .or_else(|| planner.find_task(&id).map(|t| t.duration_min))
                .unwrap_or(config.default_duration);
            planner.schedule(&id, start, duration, now)?;
            println!("Task scheduled: {id} at {start}");
            save_planner(&planner)?;
        }
        ScheduleAction::Unschedule { id } => {
            planner.unschedule(&id)?;
            println!("Task unscheduled: {id}");
            save_planner(&planner)?;
        }
        ScheduleAction::Resize { id, duration, snap } => {
            let duration = if snap { snap_duration(duration) } else { duration };
            planner.resize(&id, duration, now)?;
            let stored = planner.find_task(&id).map(|t| t.duration_min).unwrap_or(duration);
            println!("Task resized: {id} to {stored} minutes");
            save_planner(&planner)?;
        }
        ScheduleAction::Repeat { id, rule, days } => {
            let choice = match rule.as_str() {
                "none" => RepeatChoice::None,
                "daily" => RepeatChoice::Daily,
                "weekly" => RepeatChoice::Weekly,
                "custom" => {
                    let spec = days.ok_or("custom rule requires --days (e.g. --days 1,3,5)")?;
                    let parsed: Result<Vec<u8>, _> = spec
                        .split(',')
                        .map(|s| s.trim().parse::<u8>())
                        .collect();
                    RepeatChoice::Custom(parsed.map_err(|_| format!("cannot parse '{spec}' as weekday list"))?)
                }
                other => return Err(format!("unknown rule '{other}' (use none|daily|weekly|custom)").into()),
            };
            planner.set_recurrence(&id, choice, now)?;
            println!("Repeat rule updated: {id}");
            save_planner(&planner)?;
        }
    }
    Ok(())
}
