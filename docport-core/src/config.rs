//! Configuration management for `docport-core`.
//!
//! This module defines the static configuration the intake pipeline runs on:
//! the heading vocabulary used by the heading joiner, the sensitive-keyword
//! alert rules, and the length bound applied to normalized text. It handles
//! YAML (de)serialization and provides utilities for loading, merging,
//! filtering and validating these configs.
//!
//! Configuration is read once and is immutable afterwards. Changing a heading
//! label or an alert keyword is a configuration change, never a code change.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::IntakeError;
use crate::normalize::cells::strip_cell_prefix;

/// Maximum number of characters kept in normalized text.
pub const DEFAULT_MAX_CHARS: usize = 8000;

/// Appended directly to the cut line of text that exceeded the length bound.
///
/// The marker shares the cut line and carries a full-width colon, so on a
/// later pass that line is neither a heading nor a heading body.
pub const DEFAULT_TRUNCATION_MARKER: &str = "…（以下省略：文字数上限）";

/// How strongly an alert rule asks the reviewer to look twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        f.write_str(s)
    }
}

/// A sensitive-topic keyword group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AlertRule {
    /// Unique identifier for the rule (e.g., "infectious_disease").
    pub id: String,
    /// Human-readable label shown to the reviewer.
    pub label: String,
    pub severity: Severity,
    /// Literal trigger keywords, scanned in this order.
    pub keywords: Vec<String>,
    /// Explicit override for enabling/disabling the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Length bound settings. `None` means "use the built-in default".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NormalizationConfig {
    pub max_chars: Option<usize>,
    pub truncation_marker: Option<String>,
}

impl NormalizationConfig {
    pub fn max_chars(&self) -> usize {
        self.max_chars.unwrap_or(DEFAULT_MAX_CHARS)
    }

    pub fn truncation_marker(&self) -> &str {
        self.truncation_marker.as_deref().unwrap_or(DEFAULT_TRUNCATION_MARKER)
    }
}

/// Top-level intake configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IntakeConfig {
    /// Canonical section headings recognised by the heading joiner.
    pub heading_vocabulary: Vec<String>,
    /// Alert rules, in the order alerts are reported.
    pub alert_rules: Vec<AlertRule>,
    pub normalization: NormalizationConfig,
}

impl IntakeConfig {
    /// Loads an intake configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading intake config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: IntakeConfig = serde_yml::from_str(&text)
            .map_err(|e| IntakeError::ConfigParse(path.display().to_string(), e))?;

        info!(
            "Loaded {} alert rules and {} headings from file {}.",
            config.alert_rules.len(),
            config.heading_vocabulary.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the built-in configuration embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default intake config from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: IntakeConfig = serde_yml::from_str(default_yaml)
            .map_err(|e| IntakeError::ConfigParse("<embedded>".to_string(), e))?;

        debug!(
            "Loaded {} default alert rules, {} default headings.",
            config.alert_rules.len(),
            config.heading_vocabulary.len()
        );
        Ok(config)
    }

    /// Filters alert rules using enable/disable id lists.
    ///
    /// A rule is dropped when its id is disabled, or when it is switched off
    /// in configuration (`enabled: false`) and not explicitly enabled here.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();
        let known: HashSet<&str> = self.alert_rules.iter().map(|r| r.id.as_str()).collect();

        for id in enable_set.difference(&known) {
            warn!("Rule '{}' in `enable` list does not exist.", id);
        }
        for id in disable_set.difference(&known) {
            warn!("Rule '{}' in `disable` list does not exist.", id);
        }

        debug!("Alert rules before filtering: {}", self.alert_rules.len());
        self.alert_rules.retain(|rule| {
            let id = rule.id.as_str();
            !disable_set.contains(id) && (rule.enabled != Some(false) || enable_set.contains(id))
        });
        debug!("Alert rules after filtering: {}", self.alert_rules.len());
    }

    /// Checks rule and limit integrity, reporting every problem at once.
    pub fn validate(&self) -> Result<(), IntakeError> {
        let mut ids = HashSet::new();
        let mut errors = Vec::new();

        for rule in &self.alert_rules {
            if rule.id.trim().is_empty() {
                errors.push("An alert rule has an empty `id` field.".to_string());
            } else if !ids.insert(rule.id.as_str()) {
                errors.push(format!("Duplicate alert rule id found: '{}'.", rule.id));
            }
            if rule.label.trim().is_empty() {
                errors.push(format!("Alert rule '{}' has an empty `label`.", rule.id));
            }
            if rule.keywords.iter().all(|k| k.is_empty()) {
                errors.push(format!("Alert rule '{}' has no non-empty keywords.", rule.id));
            }
        }

        if self.normalization.max_chars == Some(0) {
            errors.push("`normalization.max_chars` must be greater than 0.".to_string());
        }
        if let Some(marker) = self.normalization.truncation_marker.as_deref() {
            errors.extend(marker_problems(marker));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::InvalidConfig(errors.join("\n")))
        }
    }
}

/// A marker must keep its cut line inert for later passes: one line, with a
/// colon, no edge whitespace and no leading cell prefix.
fn marker_problems(marker: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if marker.is_empty() {
        problems.push("`normalization.truncation_marker` cannot be empty.".to_string());
        return problems;
    }
    if marker.contains(['\n', '\r']) {
        problems.push("`normalization.truncation_marker` must not contain line breaks.".to_string());
    }
    if !marker.contains([':', '：']) {
        problems.push("`normalization.truncation_marker` must contain a colon (`:` or `：`).".to_string());
    }
    if marker.trim() != marker || strip_cell_prefix(marker) != marker {
        problems.push(
            "`normalization.truncation_marker` must not start or end with whitespace or start with a cell prefix."
                .to_string(),
        );
    }
    problems
}

/// Merges a user configuration over the defaults.
///
/// User rules replace default rules with the same id in place; new ids are
/// appended. User headings extend the default vocabulary.
pub fn merge_config(default_config: IntakeConfig, user_config: Option<IntakeConfig>) -> IntakeConfig {
    let Some(user) = user_config else {
        debug!("merge_config called without user config.");
        return default_config;
    };

    let mut merged = default_config;
    debug!(
        "Merging user config: {} rules, {} headings.",
        user.alert_rules.len(),
        user.heading_vocabulary.len()
    );

    for user_rule in user.alert_rules {
        match merged.alert_rules.iter_mut().find(|r| r.id == user_rule.id) {
            Some(existing) => {
                debug!("Overriding alert rule '{}'.", user_rule.id);
                *existing = user_rule;
            }
            None => merged.alert_rules.push(user_rule),
        }
    }

    for heading in user.heading_vocabulary {
        if !merged.heading_vocabulary.contains(&heading) {
            merged.heading_vocabulary.push(heading);
        }
    }

    if let Some(max_chars) = user.normalization.max_chars {
        debug!("Overriding max_chars with user value: {}", max_chars);
        merged.normalization.max_chars = Some(max_chars);
    }
    if let Some(marker) = user.normalization.truncation_marker {
        merged.normalization.truncation_marker = Some(marker);
    }

    debug!("Final alert rule count after merge: {}", merged.alert_rules.len());
    merged
}

/// Locations searched for a user config when none is given explicitly.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".docport").join("config.yaml")),
        dirs::config_dir().map(|p| p.join("docport").join("config.yaml")),
        Some(PathBuf::from("./config/docport.yaml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Returns the first existing candidate config path, if any.
pub fn find_user_config() -> Option<PathBuf> {
    config_candidate_paths().into_iter().find(|p| p.is_file())
}
