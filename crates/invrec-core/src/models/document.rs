//! Persisted document models.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Locale tag selecting an extraction ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Macedonian documents (Cyrillic script, `ден` amounts, `N/YYYY` numbers).
    Mk,
    /// English documents.
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Mk => "mk",
            Locale::En => "en",
        }
    }

    /// Currency assumed when the text names none.
    pub fn default_currency(&self) -> Currency {
        match self {
            Locale::Mk => Currency::Mkd,
            Locale::En => Currency::Usd,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Mkd,
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mkd => "MKD",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kind of a persisted document within a reconciled pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Order,
    Invoice,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Order => f.write_str("order"),
            DocumentType::Invoice => f.write_str("invoice"),
        }
    }
}

/// A single line item on an order or invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service name, trimmed and non-empty. Duplicate names are
    /// permitted at extraction time.
    pub name: String,

    /// Quantity (> 0).
    pub quantity: Decimal,

    /// Unit price (>= 0).
    pub unit_price: Decimal,

    /// VAT percentage applied to this item (0-100).
    pub vat_percent: Decimal,
}

impl LineItem {
    /// Key used to match order and invoice items: case-folded, trimmed name.
    pub fn match_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Reference to a stored source file (scan or photo) linked to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: Uuid,

    /// Original upload name.
    pub name: String,

    /// Addressable path returned by the storage backend.
    pub storage_path: String,
}

/// A persisted order or invoice, immutable after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub doc_type: DocumentType,

    pub created_at: DateTime<Utc>,

    pub items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef>,
}

impl Document {
    pub fn new(doc_type: DocumentType, items: Vec<LineItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            doc_type,
            created_at: Utc::now(),
            items,
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.files = files;
        self
    }
}

/// Link between one order and one invoice, created lazily the first time the
/// pair is reconciled. Unique per (order_id, invoice_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPair {
    pub id: Uuid,
    pub order_id: Uuid,
    pub invoice_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_key_folds_case_and_whitespace() {
        let a = LineItem {
            name: "Widget".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ONE,
            vat_percent: Decimal::ZERO,
        };
        let b = LineItem {
            name: "  widget  ".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ONE,
            vat_percent: Decimal::ZERO,
        };
        assert_eq!(a.match_key(), b.match_key());
    }

    #[test]
    fn test_default_currency_per_locale() {
        assert_eq!(Locale::Mk.default_currency(), Currency::Mkd);
        assert_eq!(Locale::En.default_currency(), Currency::Usd);
    }

    #[test]
    fn test_document_with_files() {
        let doc = Document::new(DocumentType::Invoice, Vec::new()).with_files(vec![FileRef {
            id: Uuid::new_v4(),
            name: "scan.jpg".to_string(),
            storage_path: "documents/scan.jpg".to_string(),
        }]);
        assert_eq!(doc.files.len(), 1);
        assert_eq!(doc.files[0].name, "scan.jpg");
    }

    #[test]
    fn test_document_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&DocumentType::Order).unwrap(),
            "\"ORDER\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::Invoice).unwrap(),
            "\"INVOICE\""
        );
    }
}
