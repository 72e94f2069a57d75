use clap::{Parser, Subcommand};

mod commands;
mod common;
mod config;
mod storage;

#[derive(Parser)]
#[command(name = "planner-cli", version, about = "Planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Calendar placement and recurrence
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Show scheduled events and recurring occurrences for a window
    Agenda {
        /// First day of the window (YYYY-MM-DD); defaults to the saved view
        #[arg(long)]
        from: Option<String>,
        /// Number of days to show; defaults to the view mode width
        #[arg(long)]
        days: Option<i64>,
        /// Only show tasks whose title contains this text
        #[arg(long)]
        filter: Option<String>,
        /// Emit JSON instead of the text listing
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Write the sample inbox into a fresh state file
    Seed {
        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Agenda {
            from,
            days,
            filter,
            json,
        } => commands::agenda::run(from, days, filter, json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Seed { force } => commands::seed::run(force),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
