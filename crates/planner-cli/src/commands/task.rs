//! Task management commands for CLI.

use chrono::Utc;
use clap::Subcommand;

use crate::common::{parse_instant, task_line};
use crate::config::CliConfig;
use crate::storage::{load_planner, save_planner};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task in the inbox (or directly on the calendar with --at)
    Add {
        /// Task title
        title: String,
        /// Duration in minutes (defaults to the configured default)
        #[arg(long)]
        duration: Option<u32>,
        /// Schedule immediately at this instant ('YYYY-MM-DD HH:MM' or RFC 3339)
        #[arg(long)]
        at: Option<String>,
    },
    /// List tasks, inbox first
    List {
        /// Emit JSON instead of the text listing
        #[arg(long)]
        json: bool,
        /// Only show tasks whose title contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one task
    Show {
        /// Task ID
        id: String,
    },
    /// Change a task's title
    Rename {
        /// Task ID
        id: String,
        /// New title
        title: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load()?;
    let mut planner = load_planner(&config)?;
    let now = Utc::now();

    match action {
        TaskAction::Add { title, duration, at } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err("task title must not be empty".into());
            }
            let duration = duration.unwrap_or(config.default_duration);

            let task = match at {
                Some(spec) => {
                    let start = parse_instant(&spec)?;
                    planner.quick_create(title, duration, start, now)?
                }
                None => planner.create_task(title, duration, now),
            };
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(task)?);
            save_planner(&planner)?;
        }
        TaskAction::List { json, filter } => {
            let filter = filter.unwrap_or_default();
            if json {
                let tasks: Vec<_> = planner
                    .store()
                    .iter()
                    .filter(|t| t.title.to_lowercase().contains(&filter.to_lowercase()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&tasks)?);
                return Ok(());
            }

            let inbox = planner.inbox_filtered(&filter);
            println!("Inbox ({}):", inbox.len());
            for task in inbox {
                println!("  {}", task_line(task));
            }
            println!("Scheduled:");
            for task in planner.store().scheduled() {
                if task.title.to_lowercase().contains(&filter.to_lowercase()) {
                    println!("  {}", task_line(task));
                }
            }
        }
        TaskAction::Show { id } => match planner.find_task(&id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(task)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Rename { id, title } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err("task title must not be empty".into());
            }
            planner.rename(&id, title)?;
            println!("Task renamed: {id}");
            save_planner(&planner)?;
        }
        TaskAction::Delete { id } => {
            planner.delete(&id)?;
            println!("Task deleted: {id}");
            save_planner(&planner)?;
        }
    }
    Ok(())
}
