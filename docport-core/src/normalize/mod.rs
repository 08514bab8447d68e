//! Text normalization pipeline.
//!
//! Rewrites raw extracted text into the canonical form fed to structured
//! field extraction and to alert scanning. Stages run in a fixed order:
//!
//! 1. cell rows are reshaped into `key: value` prose (`cells`),
//! 2. bare headings are merged with the following line (`joiner`),
//! 3. residual cell prefixes are stripped and blank-line runs collapsed (`cleanup`),
//! 4. the result is trimmed and bounded to the configured length (`bound`).
//!
//! The pipeline is pure and deterministic. Running it on its own output
//! changes nothing, truncated output included: the marker is appended to the
//! cut line itself, and its colon keeps that line from joining a heading.

pub mod bound;
pub mod cells;
pub mod cleanup;
pub mod heading_key;
pub mod joiner;
pub mod trace;

use log::debug;
use serde::Serialize;

use crate::compiler::CompiledConfig;
use crate::phi_log::loggable;

pub use heading_key::{normalize_key, HeadingVocabulary};
pub use trace::{DebugTrace, HeadingProbe, JoinRecord};

/// Output of one normalization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    pub text: String,
    /// Present only when diagnostics were requested.
    pub trace: Option<DebugTrace>,
    pub truncated: bool,
}

/// Runs the full normalization pass over `raw`.
pub fn normalize_text(raw: &str, compiled: &CompiledConfig, diagnostics: bool) -> Normalized {
    let unified = cleanup::unify_line_endings(raw);
    let marker = compiled.truncation_marker.as_str();

    let reshaped: Vec<String> = unified
        .split('\n')
        .map(|line| {
            // The cut tail of already-bounded text keeps its shape.
            if line.ends_with(marker) {
                return line.to_string();
            }
            cells::reshape_cell_row(line).unwrap_or_else(|| line.to_string())
        })
        .collect();

    let mut trace = diagnostics.then(DebugTrace::default);
    let joined = joiner::join_headings(&reshaped, &compiled.vocabulary, trace.as_mut()).join("\n");

    let stripped = cleanup::strip_residual_prefixes(&joined);
    let collapsed = cleanup::collapse_blank_lines(&stripped);
    let (text, truncated) = bound::bound_length(collapsed.trim(), compiled.max_chars, &compiled.truncation_marker);

    debug!(
        "Normalized {} lines into {} chars (truncated: {}): {}",
        reshaped.len(),
        text.chars().count(),
        truncated,
        loggable(&text)
    );

    Normalized { text, trace, truncated }
}
