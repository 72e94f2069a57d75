//! State file handling for the CLI.
//!
//! The core engine has no I/O of its own; the CLI owns the load/save cycle
//! around every command, mirroring the single-writer model the engine
//! expects.

use std::path::PathBuf;

use chrono::Utc;
use planner_core::{Planner, PlannerSnapshot};

use crate::config::CliConfig;

/// Returns the planner data directory.
///
/// `PLANNER_STATE_DIR` overrides the location outright (used by tests);
/// otherwise `~/.config/planner` or `~/.config/planner-dev` depending on
/// `PLANNER_ENV`.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(dir) = std::env::var("PLANNER_STATE_DIR") {
        let path = PathBuf::from(dir);
        std::fs::create_dir_all(&path)?;
        return Ok(path);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PLANNER_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("planner-dev")
    } else {
        base_dir.join("planner")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn state_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("state.json"))
}

/// Load the planner from the state file.
///
/// First run (no file) seeds the sample inbox with the configured view
/// preferences. A file that does not parse is reported and replaced with a
/// fresh planner rather than blocking every command; read errors propagate.
pub fn load_planner(config: &CliConfig) -> Result<Planner, Box<dyn std::error::Error>> {
    let path = state_path()?;
    if !path.exists() {
        return Ok(fresh_planner(config));
    }

    let raw = std::fs::read_to_string(&path)?;
    match serde_json::from_str::<PlannerSnapshot>(&raw) {
        Ok(snapshot) => Ok(Planner::from_snapshot(snapshot)),
        Err(e) => {
            eprintln!("warning: failed to parse state file, starting fresh: {e}");
            Ok(fresh_planner(config))
        }
    }
}

/// Write the planner state back to disk.
pub fn save_planner(planner: &Planner) -> Result<(), Box<dyn std::error::Error>> {
    let path = state_path()?;
    let json = serde_json::to_string_pretty(&planner.snapshot())?;
    std::fs::write(&path, json)?;
    Ok(())
}

pub fn fresh_planner(config: &CliConfig) -> Planner {
    let mut planner = Planner::with_sample_tasks(Utc::now());
    planner.prefs_mut().view_mode = config.view_mode;
    planner.prefs_mut().density = config.density;
    planner
}
