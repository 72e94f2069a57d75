//! TOML-based CLI configuration.
//!
//! Stored at `~/.config/planner[-dev]/config.toml`. Holds the defaults the
//! CLI applies when a command omits a value; the planner state itself lives
//! in the JSON state file next to it.

use serde::{Deserialize, Serialize};

use planner_core::{Density, ViewMode, DEFAULT_TASK_DURATION};

use crate::storage::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Duration in minutes for new tasks created without `--duration`.
    #[serde(default = "default_duration")]
    pub default_duration: u32,
    /// View mode applied to a fresh state file.
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Density applied to a fresh state file.
    #[serde(default)]
    pub density: Density,
}

fn default_duration() -> u32 {
    DEFAULT_TASK_DURATION
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            view_mode: ViewMode::default(),
            density: Density::default(),
        }
    }
}

impl CliConfig {
    /// Load the config file, falling back to defaults if it is missing.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = data_dir()?.join("config.toml");
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
