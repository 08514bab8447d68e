//! Length bounding. Lengths are counted in characters, not bytes.

/// Cuts `text` to `max_chars` characters and appends `marker` when it is
/// longer. Returns the bounded text and whether it was cut.
pub fn bound_length(text: &str, max_chars: usize, marker: &str) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (format!("{}{}", &text[..cut], marker), true),
        None => (text.to_string(), false),
    }
}
