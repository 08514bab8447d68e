//! Diagnostic trace for the heading joiner.
//!
//! Only materialized when a caller asks for diagnostics. Recording never
//! changes the normalized text.

use serde::{Deserialize, Serialize};

/// Everything the joiner looked at while normalizing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugTrace {
    /// Short, colon-free lines evaluated as possible headings.
    pub heading_candidates: Vec<HeadingProbe>,
    /// Heading/body pairs that were merged.
    pub joins: Vec<JoinRecord>,
}

/// One heading-candidacy evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingProbe {
    /// Index of the line after cell reshaping.
    pub line_index: usize,
    pub raw: String,
    /// The line with cell prefixes removed and whitespace trimmed.
    pub stripped: String,
    pub key: String,
    pub in_vocabulary: bool,
    /// `U+XXXX` for every character of `stripped`, for spotting look-alikes.
    pub code_points: Vec<String>,
}

/// A successful heading/body merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRecord {
    pub line_index: usize,
    pub heading: String,
    pub body: String,
}

impl DebugTrace {
    pub(crate) fn record_probe(&mut self, line_index: usize, raw: &str, stripped: &str, key: &str, in_vocabulary: bool) {
        self.heading_candidates.push(HeadingProbe {
            line_index,
            raw: raw.to_string(),
            stripped: stripped.to_string(),
            key: key.to_string(),
            in_vocabulary,
            code_points: stripped.chars().map(|c| format!("U+{:04X}", c as u32)).collect(),
        });
    }

    pub(crate) fn record_join(&mut self, line_index: usize, heading: &str, body: &str) {
        self.joins.push(JoinRecord {
            line_index,
            heading: heading.to_string(),
            body: body.to_string(),
        });
    }
}
