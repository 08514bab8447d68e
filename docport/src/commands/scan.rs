// docport/src/commands/scan.rs
//! The `scan` command: reviews text for sensitive keywords.
//!
//! Input is normalized first unless `--no-normalize` is given, so evidence
//! snippets read the same as the text a reviewer would see.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::info;
use std::io::{self, Write};

use crate::cli::ScanCommand;
use crate::ui::output_format;
use crate::ui::theme::default_theme_map;
use crate::utils::input::{build_engine, read_input, stdout_supports_color};

pub fn run_scan(cmd: &ScanCommand) -> Result<()> {
    let engine = build_engine(&cmd.source)?;
    let raw = read_input(cmd.source.input_file.as_deref())?;

    let text = if cmd.no_normalize {
        raw
    } else {
        engine.normalize(&raw, false).text
    };
    let alerts = engine.scan(&text);
    info!("Scan finished with {} alerts.", alerts.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&alerts)?)?;
    } else {
        output_format::print_alert_summary(&mut out, &alerts, &default_theme_map(), stdout_supports_color())?;
    }
    out.flush()?;
    Ok(())
}
