//! Heading-continuation joiner.
//!
//! OCR and text-layer extraction often put a section heading on its own line
//! with the content on the next one. The joiner walks the lines with one line
//! of lookahead and merges such pairs into `heading: content`, so downstream
//! field extraction sees a labelled line. The cursor advances by two after a
//! merge and by one otherwise.

use log::debug;

use super::cells::strip_cell_prefix;
use super::heading_key::{normalize_key, HeadingVocabulary};
use super::trace::DebugTrace;

/// Headings are shorter than this many characters.
pub const HEADING_MAX_CHARS: usize = 15;

fn has_colon(s: &str) -> bool {
    s.contains(':') || s.contains('：')
}

/// Returns the trimmed body if `line` may continue a heading.
///
/// A continuation is at least two characters long, carries no colon and is
/// not a heading itself.
fn continuation<'a>(line: &'a str, vocabulary: &HeadingVocabulary) -> Option<&'a str> {
    let body = strip_cell_prefix(line).trim();
    if body.chars().count() <= 1 || has_colon(body) {
        return None;
    }
    if vocabulary.contains_key(&normalize_key(body)) {
        return None;
    }
    Some(body)
}

/// Merges bare heading lines with the line that follows them.
pub fn join_headings(
    lines: &[String],
    vocabulary: &HeadingVocabulary,
    mut trace: Option<&mut DebugTrace>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut cursor = 0;

    while cursor < lines.len() {
        let current = &lines[cursor];
        let stripped = strip_cell_prefix(current).trim();
        let heading_shaped = stripped.chars().count() < HEADING_MAX_CHARS && !has_colon(stripped);

        if heading_shaped && !stripped.is_empty() {
            let key = normalize_key(stripped);
            let is_heading = vocabulary.contains_key(&key);

            if let Some(t) = trace.as_deref_mut() {
                t.record_probe(cursor, current, stripped, &key, is_heading);
            }

            let body = lines
                .get(cursor + 1)
                .filter(|_| is_heading)
                .and_then(|next| continuation(next, vocabulary));

            if let Some(body) = body {
                debug!("Joined heading '{}' at line {} with its continuation.", key, cursor);
                if let Some(t) = trace.as_deref_mut() {
                    t.record_join(cursor, &key, body);
                }
                out.push(format!("{key}: {body}"));
                cursor += 2;
                continue;
            }
        }

        out.push(current.clone());
        cursor += 1;
    }

    out
}
