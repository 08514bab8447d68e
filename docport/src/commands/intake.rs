// docport/src/commands/intake.rs
//! The `intake` command: runs the whole intake over extracted text and
//! prints the report as JSON. No structurer is attached on the command line,
//! so `structured` is always `null` here.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use std::io::{self, Write};

use docport_core::{run_intake, IntakeRequest};

use crate::cli::IntakeCommand;
use crate::utils::input::{build_engine, read_input};

pub fn run_intake_command(cmd: &IntakeCommand) -> Result<()> {
    let engine = build_engine(&cmd.source)?;
    let raw_text = read_input(cmd.source.input_file.as_deref())?;

    let request = IntakeRequest {
        raw_text,
        page_count: cmd.pages,
        warnings: cmd.warnings.clone(),
        diagnostics: cmd.trace,
        source_id: cmd.source.input_file.as_ref().map(|p| p.display().to_string()),
    };
    let report = run_intake(&engine, request, None);

    let json = if cmd.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}
