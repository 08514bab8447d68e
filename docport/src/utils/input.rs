// docport/src/utils/input.rs
//! Input reading and engine setup shared by every subcommand.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use docport_core::{find_user_config, merge_config, IntakeConfig, IntakeEngine};

use crate::cli::SourceArgs;

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin...");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Loads the effective configuration: the embedded defaults, merged with
/// `--config` (or the first user config found on disk), then the
/// `--enable` / `--disable` overrides.
pub fn load_config(source: &SourceArgs) -> Result<IntakeConfig> {
    let defaults = IntakeConfig::load_default()?;
    let user_path = source.config.clone().or_else(find_user_config);
    let user_config = match user_path {
        Some(path) => {
            info!("Loading custom configuration from: {}", path.display());
            Some(IntakeConfig::load_from_file(&path)?)
        }
        None => None,
    };

    let mut config = merge_config(defaults, user_config);
    config.set_active_rules(&source.enable, &source.disable);
    debug!(
        "Effective configuration: {} alert rules, {} headings.",
        config.alert_rules.len(),
        config.heading_vocabulary.len()
    );
    Ok(config)
}

pub fn build_engine(source: &SourceArgs) -> Result<IntakeEngine> {
    IntakeEngine::new(load_config(source)?)
}

/// Color only goes to an interactive terminal.
pub fn stdout_supports_color() -> bool {
    io::stdout().is_terminal()
}

pub fn stderr_supports_color() -> bool {
    io::stderr().is_terminal()
}
