// docport/src/main.rs
//! DocPort entry point.
//!
//! Parses arguments, sets up logging and dispatches to the subcommand.

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};

use docport::cli::{Cli, Commands};
use docport::commands;
use docport::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("docport started. Version: {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Normalize(cmd) => commands::normalize::run_normalize(&cmd),
        Commands::Scan(cmd) => commands::scan::run_scan(&cmd),
        Commands::Intake(cmd) => commands::intake::run_intake_command(&cmd),
        Commands::Highlight(cmd) => commands::highlight::run_highlight(&cmd),
    }
}
