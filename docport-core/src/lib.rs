// docport-core/src/lib.rs
//! # DocPort Core Library
//!
//! `docport-core` is the text core of the DocPort referral intake service. It
//! takes the raw text extracted from an uploaded referral letter (by OCR or
//! from a document text layer) and
//!
//! * rewrites it into a canonical form for structured field extraction:
//!   spreadsheet cell rows become `key: value` prose, bare section headings
//!   are merged with their content line, leftover cell prefixes and blank-line
//!   runs are cleaned up, and the result is bounded in length;
//! * scans it for configured groups of sensitive medical keywords, producing
//!   advisory alerts with evidence snippets for the human reviewer.
//!
//! Credential issuance, authentication, OCR and the structuring model live
//! outside this crate. The latter two are reached through the
//! [`TextRecognizer`] and [`Structurer`] traits.
//!
//! ## Modules
//!
//! * `config`: `IntakeConfig`, alert rules and the heading vocabulary; loading, merging, validation.
//! * `compiler`: validated, pre-normalized `CompiledConfig`s behind a shared cache.
//! * `normalize`: the normalization pipeline and its stages.
//! * `alerts`: the sensitive-keyword alert scanner.
//! * `highlight`: segmentation of text by alert keyword for review displays.
//! * `engine`: `IntakeEngine`, one compiled config driving normalization and scanning.
//! * `intake`: report assembly and collaborator seams.
//! * `phi_log`: keeps document content out of debug logs.
//!
//! ## Usage Example
//!
//! ```rust
//! use docport_core::IntakeEngine;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = IntakeEngine::with_default_config()?;
//!
//!     let normalized = engine.normalize("A:主訴 | B:右下腹部痛\n既往歴\n虫垂炎にて手術", false);
//!     assert_eq!(normalized.text, "主訴: 右下腹部痛\n既往歴: 虫垂炎にて手術");
//!
//!     let alerts = engine.scan(&normalized.text);
//!     assert_eq!(alerts[0].id, "treatment");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Normalization and scanning are total and never fail. Configuration
//! loading reports `IntakeError`s wrapped in `anyhow::Error`.
//!
//! License: MIT OR Apache-2.0

pub mod alerts;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod highlight;
pub mod intake;
pub mod normalize;
pub mod phi_log;

pub use config::{
    config_candidate_paths,
    find_user_config,
    merge_config,
    AlertRule,
    IntakeConfig,
    NormalizationConfig,
    Severity,
    DEFAULT_MAX_CHARS,
    DEFAULT_TRUNCATION_MARKER,
};

pub use errors::IntakeError;

pub use compiler::{compile_config, get_or_compile, CompiledConfig};

pub use engine::{IntakeEngine, PipelineOutput};

pub use normalize::{normalize_key, normalize_text, DebugTrace, HeadingVocabulary, Normalized};

pub use alerts::{scan, Alert, Evidence};

pub use highlight::{highlight_segments, Segment};

pub use intake::{
    recognize_pages,
    run_intake,
    IntakeMeta,
    IntakeReport,
    IntakeRequest,
    PageImage,
    StructuredRecord,
    Structurer,
    TextRecognizer,
};
