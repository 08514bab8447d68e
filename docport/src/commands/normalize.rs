// docport/src/commands/normalize.rs
//! The `normalize` command: prints the canonical form of the input text.
//!
//! With `--trace`, the heading-detection trace is written to stderr as JSON
//! so stdout stays pipeable.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::info;
use std::io::{self, Write};

use crate::cli::NormalizeCommand;
use crate::ui::output_format;
use crate::ui::theme::default_theme_map;
use crate::utils::input::{build_engine, read_input, stderr_supports_color};

pub fn run_normalize(cmd: &NormalizeCommand) -> Result<()> {
    let engine = build_engine(&cmd.source)?;
    let raw = read_input(cmd.source.input_file.as_deref())?;

    let normalized = engine.normalize(&raw, cmd.trace);
    info!(
        "Normalized {} chars into {} chars.",
        raw.chars().count(),
        normalized.text.chars().count()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", normalized.text).context("Failed to write normalized text")?;
    out.flush()?;

    let stderr = io::stderr();
    let mut err = stderr.lock();
    if normalized.truncated {
        output_format::print_warn_message(
            &mut err,
            &format!("Text exceeded {} characters and was truncated.", engine.compiled().max_chars),
            &default_theme_map(),
            stderr_supports_color(),
        )?;
    }
    if let Some(trace) = &normalized.trace {
        writeln!(err, "{}", serde_json::to_string_pretty(trace)?)?;
    }
    Ok(())
}
