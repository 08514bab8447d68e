// docport/src/cli.rs
//! This file defines the command-line interface (CLI) for the docport
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "docport",
    author = "DocPort Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Normalize referral-letter text and review it for sensitive content",
    long_about = "DocPort normalizes raw OCR or extracted text from referral letters into a canonical form (cell rows reshaped, headings joined with their content, residual cell prefixes and blank runs removed, length bounded) and reviews it for configured groups of sensitive medical keywords. Alerts are advisory: they flag what may need a second look, not what is guaranteed to be present or absent.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `docport` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalizes raw extracted text and prints the canonical form.
    #[command(about = "Normalizes raw extracted text and prints the canonical form.")]
    Normalize(NormalizeCommand),

    /// Reviews text for sensitive keywords and prints advisory alerts.
    #[command(about = "Reviews text for sensitive keywords and prints advisory alerts.")]
    Scan(ScanCommand),

    /// Runs a full intake and prints the report as JSON.
    #[command(about = "Runs a full intake (normalize + review) and prints the report as JSON.")]
    Intake(IntakeCommand),

    /// Prints normalized text with alert keywords highlighted.
    #[command(about = "Prints normalized text with alert keywords highlighted by severity.")]
    Highlight(HighlightCommand),
}

/// Input and configuration arguments shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom YAML configuration file.
    #[arg(long, short = 'c', value_name = "FILE", env = "DOCPORT_CONFIG", help = "Merge a custom YAML configuration over the defaults.")]
    pub config: Option<PathBuf>,

    /// Rule ids to force on.
    #[arg(long, value_delimiter = ',', value_name = "RULES", help = "Comma-separated alert rule ids to enable.")]
    pub enable: Vec<String>,

    /// Rule ids to turn off.
    #[arg(long, value_delimiter = ',', value_name = "RULES", help = "Comma-separated alert rule ids to disable.")]
    pub disable: Vec<String>,
}

/// Arguments for the `normalize` command.
#[derive(Parser, Debug)]
pub struct NormalizeCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the heading-detection trace to stderr.
    #[arg(long, help = "Print the heading-detection trace as JSON to stderr.")]
    pub trace: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit alerts as JSON.
    #[arg(long, help = "Print alerts as a JSON array instead of a summary.")]
    pub json: bool,

    /// Scan the input as given, without normalizing it first.
    #[arg(long = "no-normalize", help = "Scan the input as given, skipping normalization.")]
    pub no_normalize: bool,
}

/// Arguments for the `intake` command.
#[derive(Parser, Debug)]
pub struct IntakeCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of pages the text was extracted from.
    #[arg(long, value_name = "N", default_value_t = 1, help = "Number of pages the text was extracted from.")]
    pub pages: usize,

    /// Upstream warnings to carry into the report.
    #[arg(long = "warning", value_name = "TEXT", help = "Add an upstream warning to the report (repeatable).")]
    pub warnings: Vec<String>,

    /// Include the heading-detection trace in the report.
    #[arg(long, help = "Include the heading-detection trace in the report.")]
    pub trace: bool,

    /// Pretty-print the JSON report.
    #[arg(long, help = "Pretty-print the JSON report.")]
    pub pretty: bool,
}

/// Arguments for the `highlight` command.
#[derive(Parser, Debug)]
pub struct HighlightCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_parses_rule_lists() {
        let cli = Cli::try_parse_from([
            "docport", "scan", "--disable", "treatment,diagnosis", "--enable", "malignancy", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan(cmd) => {
                assert_eq!(cmd.source.disable, vec!["treatment", "diagnosis"]);
                assert_eq!(cmd.source.enable, vec!["malignancy"]);
                assert!(cmd.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
