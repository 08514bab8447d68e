//! Heading-key normalization.
//!
//! A heading key is a comparison-only form of a line: Unicode compatibility
//! normalized (NFKC), trimmed, and stripped of every space and invisible
//! mark. Full-width, half-width and spaced variants of the same label map to
//! the same key. Keys are never displayed.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Characters removed from anywhere inside a key.
const REMOVED_CHARS: [char; 6] = [
    ' ',        // space
    '\u{3000}', // ideographic space
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{FEFF}', // byte order mark / zero width no-break space
];

/// Canonicalizes `s` into a comparable heading key. Total over all inputs.
///
/// NFKC rather than NFKD: both fold the same compatibility variants, so
/// membership answers are identical, but the joiner emits the key as the
/// heading text and only the composed form displays cleanly.
pub fn normalize_key(s: &str) -> String {
    let compatible: String = s.nfkc().collect();
    compatible
        .trim()
        .chars()
        .filter(|c| !REMOVED_CHARS.contains(c))
        .collect()
}

/// The set of canonical section headings, stored pre-normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingVocabulary {
    keys: HashSet<String>,
}

impl HeadingVocabulary {
    /// Builds the vocabulary, passing every label through [`normalize_key`] once.
    /// Labels that normalize to nothing are ignored.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = labels
            .into_iter()
            .map(|label| normalize_key(label.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        Self { keys }
    }

    /// Membership test for an already-normalized key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
