// docport/src/commands/highlight.rs
//! The `highlight` command: prints normalized text with every alert keyword
//! marked by severity. Colors are used on a terminal; otherwise keywords are
//! wrapped in `[[...]]`.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use std::io::{self, Write};

use docport_core::highlight_segments;

use crate::cli::HighlightCommand;
use crate::ui::output_format;
use crate::ui::theme::default_theme_map;
use crate::utils::input::{build_engine, read_input, stdout_supports_color};

pub fn run_highlight(cmd: &HighlightCommand) -> Result<()> {
    let engine = build_engine(&cmd.source)?;
    let raw = read_input(cmd.source.input_file.as_deref())?;

    let text = engine.normalize(&raw, false).text;
    let alerts = engine.scan(&text);
    let segments = highlight_segments(&text, &alerts);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output_format::print_segments(&mut out, &segments, &default_theme_map(), stdout_supports_color())?;
    out.flush()?;
    Ok(())
}
