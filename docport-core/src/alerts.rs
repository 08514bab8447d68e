//! Advisory sensitive-keyword alerts.
//!
//! Scans normalized referral text for the configured keyword groups and
//! reports which groups *may* be present, with a few snippets of evidence
//! each. Alerts are hints for the human reviewer. They never assert that
//! sensitive content is definitely there, and a missing alert proves nothing.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::{AlertRule, Severity};
use crate::phi_log::loggable;

/// Evidence entries kept per rule and scan.
pub const MAX_EVIDENCE_PER_RULE: usize = 3;
/// Characters of context on each side of a match.
pub const SNIPPET_RADIUS: usize = 30;
/// Page attribution is not tracked past normalization.
pub const EVIDENCE_PAGE: u32 = 1;

const ELLIPSIS: &str = "…";

/// A snippet of text around one keyword match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub page: u32,
    pub snippet: String,
    pub keyword: String,
}

/// One alert rule that matched, with its evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub label: String,
    pub severity: Severity,
    /// The keyword of the first evidence entry.
    pub keyword: String,
    pub evidence: Vec<Evidence>,
}

/// Cuts `SNIPPET_RADIUS` characters either side of the byte range
/// `start..end`, marking each clipped side with an ellipsis.
fn snippet_around(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(SNIPPET_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(SNIPPET_RADIUS)
        .map_or(text.len(), |(i, _)| end + i);

    let mut snippet = String::with_capacity(to - from + 2 * ELLIPSIS.len());
    if from > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&text[from..to]);
    if to < text.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Collects up to `MAX_EVIDENCE_PER_RULE` entries for one rule.
///
/// Every occurrence of every keyword counts, with the search resuming one
/// character after each match start. A start position already recorded by
/// another keyword of the same rule is not recorded twice.
fn collect_evidence(text: &str, rule: &AlertRule) -> Vec<Evidence> {
    let mut evidence = Vec::new();
    let mut seen_starts = HashSet::new();

    'keywords: for keyword in rule.keywords.iter().filter(|k| !k.is_empty()) {
        let mut from = 0;
        while let Some(offset) = text[from..].find(keyword.as_str()) {
            let start = from + offset;
            if seen_starts.insert(start) {
                evidence.push(Evidence {
                    page: EVIDENCE_PAGE,
                    snippet: snippet_around(text, start, start + keyword.len()),
                    keyword: keyword.clone(),
                });
                if evidence.len() >= MAX_EVIDENCE_PER_RULE {
                    break 'keywords;
                }
            }
            from = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }

    evidence
}

/// Scans `text` against `rules`, returning alerts in rule order.
///
/// Rules without any match produce no alert. Empty text yields no alerts.
pub fn scan(text: &str, rules: &[AlertRule]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for rule in rules {
        let evidence = collect_evidence(text, rule);
        let Some(first) = evidence.first() else {
            continue;
        };
        debug!(
            "Rule '{}' may apply: {} evidence entries, first snippet {}",
            rule.id,
            evidence.len(),
            loggable(&first.snippet)
        );
        alerts.push(Alert {
            id: rule.id.clone(),
            label: rule.label.clone(),
            severity: rule.severity,
            keyword: first.keyword.clone(),
            evidence,
        });
    }

    alerts
}
