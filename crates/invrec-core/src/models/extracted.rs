//! Unvalidated output of the extraction pipeline.

use serde::{Deserialize, Serialize};

use super::document::{Currency, Document, DocumentType, LineItem, Locale};

/// Structured result of running extraction over recognized text.
///
/// Every field except `currency` is optional: absence signals that the
/// operator must fill the field in manually before submission. The draft is
/// ephemeral: once submitted (possibly after manual edits) its items are
/// copied into a persisted [`Document`] and the draft is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// ISO `YYYY-MM-DD` on success; the raw matched substring when no known
    /// format applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    /// Always resolved; falls back to the locale default.
    pub currency: Currency,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LineItem>,

    /// Locale whose ruleset produced this draft.
    pub locale: Locale,

    /// Recognition confidence the pipeline was given (0-100).
    pub confidence: f32,
}

impl ExtractedDocument {
    /// Draft with no recognized fields, as produced below the parse
    /// confidence threshold.
    pub fn empty(locale: Locale, currency: Currency, confidence: f32) -> Self {
        Self {
            invoice_number: None,
            issue_date: None,
            due_date: None,
            supplier: None,
            currency,
            items: Vec::new(),
            locale,
            confidence,
        }
    }

    /// Names of the fields the operator still has to enter by hand.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.invoice_number.is_none() {
            missing.push("invoice_number");
        }
        if self.issue_date.is_none() {
            missing.push("issue_date");
        }
        if self.due_date.is_none() {
            missing.push("due_date");
        }
        if self.supplier.is_none() {
            missing.push("supplier");
        }
        if self.items.is_empty() {
            missing.push("items");
        }
        missing
    }

    /// Submit the draft as a persisted document of the given type.
    pub fn into_document(self, doc_type: DocumentType) -> Document {
        Document::new(doc_type, self.items)
    }
}
