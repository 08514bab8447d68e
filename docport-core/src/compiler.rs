//! compiler.rs - Compiles and caches intake configurations.
//!
//! Compilation validates an `IntakeConfig`, pre-normalizes its heading
//! vocabulary and drops unusable keywords, producing a read-only
//! `CompiledConfig`. Results are kept in a global, shared cache so each
//! distinct configuration is compiled once per process.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{AlertRule, IntakeConfig};
use crate::errors::IntakeError;
use crate::normalize::HeadingVocabulary;

/// A validated configuration, ready for the pipeline and the scanner.
#[derive(Debug)]
pub struct CompiledConfig {
    pub vocabulary: HeadingVocabulary,
    /// Active alert rules in configuration order, empty keywords removed.
    pub rules: Vec<AlertRule>,
    pub max_chars: usize,
    pub truncation_marker: String,
}

lazy_static! {
    /// Compiled configurations keyed by a hash of their source config.
    static ref COMPILED_CONFIG_CACHE: RwLock<HashMap<u64, Arc<CompiledConfig>>> = RwLock::new(HashMap::new());
}

fn hash_config(config: &IntakeConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

/// Validates and compiles `config` without touching the cache.
pub fn compile_config(config: &IntakeConfig) -> Result<CompiledConfig, IntakeError> {
    config.validate()?;

    let vocabulary = HeadingVocabulary::from_labels(&config.heading_vocabulary);
    let rules: Vec<AlertRule> = config
        .alert_rules
        .iter()
        .map(|rule| AlertRule {
            keywords: rule.keywords.iter().filter(|k| !k.is_empty()).cloned().collect(),
            ..rule.clone()
        })
        .collect();

    debug!(
        "Compiled intake config: {} heading keys, {} alert rules.",
        vocabulary.len(),
        rules.len()
    );

    Ok(CompiledConfig {
        vocabulary,
        rules,
        max_chars: config.normalization.max_chars(),
        truncation_marker: config.normalization.truncation_marker().to_string(),
    })
}

/// Gets a `CompiledConfig` from the cache, compiling it if not found.
pub fn get_or_compile(config: &IntakeConfig) -> Result<Arc<CompiledConfig>, IntakeError> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_CONFIG_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(compiled) = cache.get(&cache_key) {
            debug!("Serving compiled config from cache for key: {}", cache_key);
            return Ok(Arc::clone(compiled));
        }
    }

    debug!("Compiled config not found in cache. Compiling now.");
    let compiled = Arc::new(compile_config(config)?);
    COMPILED_CONFIG_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(cache_key, Arc::clone(&compiled));

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Severity;

    #[test]
    fn drops_empty_keywords_and_keeps_order() {
        let config = IntakeConfig {
            heading_vocabulary: vec!["主 訴".into()],
            alert_rules: vec![
                AlertRule { id: "b".into(), label: "B".into(), severity: Severity::Low, keywords: vec!["".into(), "x".into()], ..Default::default() },
                AlertRule { id: "a".into(), label: "A".into(), severity: Severity::High, keywords: vec!["y".into()], ..Default::default() },
            ],
            ..Default::default()
        };
        let compiled = compile_config(&config).unwrap();
        assert!(compiled.vocabulary.contains_key("主訴"));
        assert_eq!(compiled.rules[0].id, "b");
        assert_eq!(compiled.rules[0].keywords, vec!["x".to_string()]);
        assert_eq!(compiled.max_chars, crate::config::DEFAULT_MAX_CHARS);
    }

    #[test]
    fn cache_shares_compiled_config() {
        let config = IntakeConfig::load_default().unwrap();
        let first = get_or_compile(&config).unwrap();
        let second = get_or_compile(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = IntakeConfig {
            alert_rules: vec![AlertRule { id: "x".into(), label: "X".into(), ..Default::default() }],
            ..Default::default()
        };
        assert!(matches!(compile_config(&config), Err(IntakeError::InvalidConfig(_))));
    }
}
