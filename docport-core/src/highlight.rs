//! Splits text into plain and highlighted segments for review displays.
//!
//! Every occurrence of every evidence keyword is marked. Overlapping marks
//! merge into one segment that carries the highest severity involved.

use serde::Serialize;

use crate::alerts::Alert;
use crate::config::Severity;

/// A run of text, highlighted when `severity` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub severity: Option<Severity>,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), severity: None }
    }
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    start: usize,
    end: usize,
    severity: Severity,
}

fn collect_marks(text: &str, alerts: &[Alert]) -> Vec<Mark> {
    let mut marks = Vec::new();
    for alert in alerts {
        for evidence in &alert.evidence {
            let keyword = if evidence.keyword.is_empty() { &alert.keyword } else { &evidence.keyword };
            if keyword.is_empty() {
                continue;
            }
            let mut from = 0;
            while let Some(offset) = text[from..].find(keyword.as_str()) {
                let start = from + offset;
                marks.push(Mark { start, end: start + keyword.len(), severity: alert.severity });
                from = start + text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    marks
}

fn merge_marks(mut marks: Vec<Mark>) -> Vec<Mark> {
    marks.sort_by_key(|m| m.start);
    let mut merged: Vec<Mark> = Vec::with_capacity(marks.len());
    for mark in marks {
        match merged.last_mut() {
            Some(last) if mark.start < last.end => {
                last.end = last.end.max(mark.end);
                last.severity = last.severity.max(mark.severity);
            }
            _ => merged.push(mark),
        }
    }
    merged
}

/// Cuts `text` into segments whose concatenation is `text` itself.
pub fn highlight_segments(text: &str, alerts: &[Alert]) -> Vec<Segment> {
    if text.is_empty() || alerts.is_empty() {
        return vec![Segment::plain(text)];
    }

    let marks = merge_marks(collect_marks(text, alerts));
    if marks.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::with_capacity(marks.len() * 2 + 1);
    let mut cursor = 0;
    for mark in marks {
        if cursor < mark.start {
            segments.push(Segment::plain(&text[cursor..mark.start]));
        }
        segments.push(Segment {
            text: text[mark.start..mark.end].to_string(),
            severity: Some(mark.severity),
        });
        cursor = mark.end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::Evidence;

    fn alert(severity: Severity, keyword: &str) -> Alert {
        Alert {
            id: keyword.to_string(),
            label: keyword.to_string(),
            severity,
            keyword: keyword.to_string(),
            evidence: vec![Evidence { page: 1, snippet: String::new(), keyword: keyword.to_string() }],
        }
    }

    #[test]
    fn no_alerts_is_one_plain_segment() {
        assert_eq!(highlight_segments("本文", &[]), vec![Segment::plain("本文")]);
    }

    #[test]
    fn marks_every_occurrence() {
        let segments = highlight_segments("入院後に再入院", &[alert(Severity::Low, "入院")]);
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["入院", "後に再", "入院"]);
        assert_eq!(segments[0].severity, Some(Severity::Low));
        assert_eq!(segments[1].severity, None);
    }

    #[test]
    fn overlaps_merge_with_highest_severity() {
        let alerts = [alert(Severity::Low, "検査結果"), alert(Severity::High, "結果陽性")];
        let segments = highlight_segments("HIV検査結果陽性", &alerts);
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["HIV", "検査結果陽性"]);
        assert_eq!(segments[1].severity, Some(Severity::High));
        assert_eq!(texts.concat(), "HIV検査結果陽性");
    }
}
