// docport-core/src/engine.rs
//! The intake engine: one compiled configuration, driving both the
//! normalization pipeline and the alert scanner.
//!
//! An engine holds only read-only state behind an `Arc`, so a single
//! instance can serve any number of concurrent requests without locking.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::alerts::{self, Alert};
use crate::compiler::{get_or_compile, CompiledConfig};
use crate::config::IntakeConfig;
use crate::normalize::{normalize_text, DebugTrace, Normalized};

/// Normalized text together with the alerts found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutput {
    pub normalized_text: String,
    pub alerts: Vec<Alert>,
    pub trace: Option<DebugTrace>,
}

#[derive(Debug, Clone)]
pub struct IntakeEngine {
    compiled: Arc<CompiledConfig>,
    config: IntakeConfig,
}

impl IntakeEngine {
    pub fn new(config: IntakeConfig) -> Result<Self> {
        let compiled = get_or_compile(&config).context("Failed to compile intake configuration")?;
        Ok(Self { compiled, config })
    }

    /// Builds an engine over the embedded default configuration.
    pub fn with_default_config() -> Result<Self> {
        Self::new(IntakeConfig::load_default()?)
    }

    /// Normalizes raw extracted text. With `diagnostics`, the result carries
    /// a [`crate::normalize::DebugTrace`]; the text is the same either way.
    pub fn normalize(&self, raw: &str, diagnostics: bool) -> Normalized {
        normalize_text(raw, &self.compiled, diagnostics)
    }

    /// Scans text for the configured alert rules, in configuration order.
    pub fn scan(&self, text: &str) -> Vec<Alert> {
        alerts::scan(text, &self.compiled.rules)
    }

    /// Normalizes `raw` and scans the result.
    pub fn process(&self, raw: &str, diagnostics: bool) -> PipelineOutput {
        let normalized = self.normalize(raw, diagnostics);
        let alerts = self.scan(&normalized.text);
        PipelineOutput {
            normalized_text: normalized.text,
            alerts,
            trace: normalized.trace,
        }
    }

    pub fn compiled(&self) -> &CompiledConfig {
        &self.compiled
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }
}
