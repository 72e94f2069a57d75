//! Configuration commands for CLI.

use clap::Subcommand;

use planner_core::{Density, ViewMode};

use crate::config::CliConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one config value
    Get {
        /// Config key (default_duration, view_mode, density)
        key: String,
    },
    /// Set one config value
    Set {
        /// Config key (default_duration, view_mode, density)
        key: String,
        /// New value
        value: String,
    },
    /// Print the whole config
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::load()?;

    match action {
        ConfigAction::Get { key } => match key.as_str() {
            "default_duration" => println!("{}", config.default_duration),
            "view_mode" => println!("{}", view_mode_str(config.view_mode)),
            "density" => println!("{}", density_str(config.density)),
            other => return Err(format!("unknown config key: {other}").into()),
        },
        ConfigAction::Set { key, value } => {
            match key.as_str() {
                "default_duration" => {
                    config.default_duration = value
                        .parse()
                        .map_err(|_| format!("cannot parse '{value}' as minutes"))?;
                }
                "view_mode" => {
                    config.view_mode = match value.as_str() {
                        "7d" => ViewMode::SevenDay,
                        "4d" => ViewMode::FourDay,
                        other => return Err(format!("unknown view mode '{other}' (use 7d|4d)").into()),
                    };
                }
                "density" => {
                    config.density = match value.as_str() {
                        "compact" => Density::Compact,
                        "cozy" => Density::Cozy,
                        "relaxed" => Density::Relaxed,
                        other => {
                            return Err(
                                format!("unknown density '{other}' (use compact|cozy|relaxed)").into()
                            )
                        }
                    };
                }
                other => return Err(format!("unknown config key: {other}").into()),
            }
            config.save()?;
            println!("Config updated: {key}");
        }
        ConfigAction::List => {
            println!("default_duration = {}", config.default_duration);
            println!("view_mode = {}", view_mode_str(config.view_mode));
            println!("density = {}", density_str(config.density));
        }
    }
    Ok(())
}

fn view_mode_str(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::SevenDay => "7d",
        ViewMode::FourDay => "4d",
    }
}

fn density_str(density: Density) -> &'static str {
    match density {
        Density::Compact => "compact",
        Density::Cozy => "cozy",
        Density::Relaxed => "relaxed",
    }
}
