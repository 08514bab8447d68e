// docport-core/src/intake.rs
//! Assembles the review report for one uploaded document.
//!
//! The surrounding service extracts raw text (text layer or OCR), hands it
//! here, and sends the resulting [`IntakeReport`] back to the reviewer. The
//! optical recognizer and the structuring model are collaborators reached
//! through the [`TextRecognizer`] and [`Structurer`] traits. Their failures
//! degrade the report (empty text, `structured: null`), they never fail it.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::alerts::Alert;
use crate::engine::IntakeEngine;
use crate::normalize::DebugTrace;

pub const EMPTY_TEXT_WARNING: &str = "テキストを抽出できませんでした。スキャンPDF（画像PDF）の可能性があります。\
内容をご確認の上、送信可否を判断してください。";

/// The record produced by the structuring collaborator. Every field may be
/// missing; the reviewer fills or corrects them before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredRecord {
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub birth_date: Option<String>,
    pub referrer_hospital: Option<String>,
    pub referrer_doctor: Option<String>,
    pub referral_to_hospital: Option<String>,
    pub referral_date: Option<String>,
    pub chief_complaint: Option<String>,
    pub suspected_diagnosis: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
}

/// Turns normalized text into a structured record.
///
/// `Ok(None)` means the collaborator answered but found nothing usable.
pub trait Structurer: Send + Sync {
    fn structure(&self, normalized: &str) -> Result<Option<StructuredRecord>>;
}

/// A rasterized page handed to a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number.
    pub number: u32,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Reads text off one page image.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, page: &PageImage) -> Result<String>;
}

/// Recognizes every page and joins the texts with line breaks.
///
/// A page that fails contributes no text and one warning; the remaining
/// pages are still read.
pub fn recognize_pages(recognizer: &dyn TextRecognizer, pages: &[PageImage]) -> (String, Vec<String>) {
    let mut texts = Vec::with_capacity(pages.len());
    let mut warnings = Vec::new();

    for page in pages {
        match recognizer.recognize(page) {
            Ok(text) => texts.push(text),
            Err(e) => {
                warn!("Text recognition failed for page {}: {:#}", page.number, e);
                warnings.push(format!("{}ページ目のテキストを読み取れませんでした。", page.number));
            }
        }
    }

    (texts.join("\n").trim().to_string(), warnings)
}

/// Everything known about one document before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeRequest {
    pub raw_text: String,
    pub page_count: usize,
    /// Warnings raised by extraction, e.g. on partially unreadable files.
    pub warnings: Vec<String>,
    pub diagnostics: bool,
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeMeta {
    pub request_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub page_count: usize,
    pub char_count: usize,
    pub normalized_char_count: usize,
    pub truncated: bool,
    /// SHA-256 of the raw text, hex encoded.
    pub content_sha256: String,
    pub processed_at: String,
}

/// The review payload returned for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeReport {
    pub text: String,
    pub text_normalized: String,
    pub meta: IntakeMeta,
    pub warnings: Vec<String>,
    pub alerts: Vec<Alert>,
    pub structured: Option<StructuredRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugTrace>,
}

pub fn content_sha256(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// One advisory line listing each alert's representative keyword.
fn alert_summary_warning(alerts: &[Alert]) -> String {
    let keywords: Vec<&str> = alerts.iter().map(|a| a.keyword.as_str()).collect();
    format!(
        "要配慮情報の可能性があります：{} 等のキーワードが含まれています。送信前に内容をご確認ください。",
        keywords.join(", ")
    )
}

fn run_structurer(structurer: &dyn Structurer, normalized: &str) -> Option<StructuredRecord> {
    match structurer.structure(normalized) {
        Ok(record) => record,
        Err(e) => {
            warn!("Structuring call failed, continuing without a record: {:#}", e);
            None
        }
    }
}

/// Normalizes, scans and (optionally) structures one document.
pub fn run_intake(
    engine: &IntakeEngine,
    request: IntakeRequest,
    structurer: Option<&dyn Structurer>,
) -> IntakeReport {
    let request_id = Uuid::new_v4();
    info!("Starting intake {}.", request_id);

    let normalized = engine.normalize(&request.raw_text, request.diagnostics);
    let alerts = engine.scan(&normalized.text);

    let structured = match structurer {
        Some(s) if !normalized.text.is_empty() => run_structurer(s, &normalized.text),
        _ => None,
    };

    let mut warnings = request.warnings;
    if request.raw_text.trim().is_empty() {
        warnings.push(EMPTY_TEXT_WARNING.to_string());
    }
    if !alerts.is_empty() {
        warnings.push(alert_summary_warning(&alerts));
    }
    if normalized.truncated {
        warnings.push(format!(
            "抽出テキストが{}文字を超えたため、以降を省略しました。",
            engine.compiled().max_chars
        ));
    }

    let meta = IntakeMeta {
        request_id,
        source_id: request.source_id,
        page_count: request.page_count,
        char_count: request.raw_text.chars().count(),
        normalized_char_count: normalized.text.chars().count(),
        truncated: normalized.truncated,
        content_sha256: content_sha256(&request.raw_text),
        processed_at: Utc::now().to_rfc3339(),
    };

    debug!(
        "Intake {} produced {} alerts, {} warnings, structured: {}.",
        request_id,
        alerts.len(),
        warnings.len(),
        structured.is_some()
    );

    IntakeReport {
        text: request.raw_text,
        text_normalized: normalized.text,
        meta,
        warnings,
        alerts,
        structured,
        debug: normalized.trace,
    }
}
