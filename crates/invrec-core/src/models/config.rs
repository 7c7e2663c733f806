//! Configuration structures for the extraction pipeline and the
//! reconciliation engine.
//!
//! All tuning knobs live here and are passed in explicitly; the pipeline and
//! engine hold no ambient state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for the invrec pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvrecConfig {
    /// Extraction pipeline configuration.
    pub pipeline: PipelineConfig,

    /// Reconciliation configuration.
    pub reconcile: ReconcileConfig,
}

/// Extraction pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Below this recognition confidence (0-100) no field parsing is
    /// attempted at all; the operator enters everything manually.
    pub min_parse_confidence: f32,

    /// Below this recognition confidence (0-100) line items are not
    /// extracted. Low-quality OCR must not fabricate numbers.
    pub min_item_confidence: f32,

    /// Hard cap on extracted line items per document.
    pub max_items: usize,

    /// VAT percentage applied to items when the document carries none.
    pub default_vat_percent: Decimal,

    /// Minimum character length for a candidate item line.
    pub min_item_line_len: usize,

    /// Minimum character length for a supplier candidate line.
    pub min_supplier_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_parse_confidence: 30.0,
            min_item_confidence: 40.0,
            max_items: 20,
            default_vat_percent: Decimal::new(18, 0),
            min_item_line_len: 5,
            min_supplier_len: 6,
        }
    }
}

/// Reconciliation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Numeric epsilon below which two monetary/quantity values compare
    /// equal.
    pub tolerance: Decimal,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(1, 2),
        }
    }
}

impl InvrecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
