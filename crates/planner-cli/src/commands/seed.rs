//! Seed a fresh state file with the sample inbox.

use crate::config::CliConfig;
use crate::storage::{fresh_planner, save_planner, state_path};

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = state_path()?;
    if path.exists() && !force {
        return Err(format!(
            "state file already exists at {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    let config = CliConfig::load()?;
    let planner = fresh_planner(&config);
    save_planner(&planner)?;
    println!("Sample inbox written: {} tasks", planner.store().len());
    Ok(())
}
