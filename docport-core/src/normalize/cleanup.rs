//! Whole-text cleanup passes run after line-level processing.

use lazy_static::lazy_static;
use regex::Regex;

use super::cells::strip_cell_prefix;

lazy_static! {
    static ref BLANK_LINE_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Removes cell prefixes left at the start of any line.
pub fn strip_residual_prefixes(text: &str) -> String {
    text.split('\n').map(strip_cell_prefix).collect::<Vec<_>>().join("\n")
}

/// Caps runs of blank lines at one.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
