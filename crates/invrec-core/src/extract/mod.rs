//! Extraction pipeline: recognized text to a structured document draft.

mod detect;
mod fields;
mod items;
mod locale;
mod normalize;
mod patterns;

pub use detect::detect_locale;
pub use locale::{LocaleRules, NumberRule, ParsedItem, rules_for};
pub use normalize::{normalize_date, normalize_number, parse_number};

use tracing::debug;

use crate::models::config::PipelineConfig;
use crate::models::document::Locale;
use crate::models::extracted::ExtractedDocument;

/// Composes locale detection, field extraction and line-item extraction
/// into one call over recognized text.
///
/// The pipeline is pure and deterministic: identical text and confidence
/// always yield the same draft, and extraction never fails. Missing fields
/// stay `None` and signal manual entry.
pub struct ExtractionPipeline {
    config: PipelineConfig,
}

impl ExtractionPipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with explicit settings.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Turn recognized text plus its confidence score into a draft document.
    pub fn extract(&self, text: &str, confidence: f32) -> ExtractedDocument {
        let locale = detect_locale(text);
        let rules = rules_for(locale);

        if confidence < self.config.min_parse_confidence {
            debug!(
                confidence,
                threshold = self.config.min_parse_confidence,
                "confidence below parse threshold, deferring to manual entry"
            );
            return ExtractedDocument::empty(locale, rules.default_currency(), confidence);
        }

        let lines = split_lines(text);
        let header = fields::extract_fields(text, &lines, rules, &self.config);
        let items = items::extract_items(
            text,
            &lines,
            confidence,
            header.supplier.as_deref(),
            rules,
            &self.config,
        );

        debug!(
            %locale,
            items = items.len(),
            "extraction complete"
        );

        ExtractedDocument {
            invoice_number: header.invoice_number,
            issue_date: header.issue_date,
            due_date: header.due_date,
            supplier: header.supplier,
            currency: header.currency,
            items,
            locale,
            confidence,
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use crate::models::document::{Currency, Locale};

    use super::*;

    const MK_INVOICE: &str = "\
Комерц ДОО Скопје
ул. Партизанска 12
Фактура бр. 123/2017
Датум: 15.03.2024
Бр. ОПИС КОЛ ЦЕНА
01 Производ 1 2 100,00 ден 200,00 ден
Вкупно: 200,00 ден
ДДВ 18%";

    #[test]
    fn test_full_mk_extraction() {
        let pipeline = ExtractionPipeline::new();
        let doc = pipeline.extract(MK_INVOICE, 85.0);

        assert_eq!(doc.locale, Locale::Mk);
        assert_eq!(doc.invoice_number, Some("123/2017".to_string()));
        assert_eq!(doc.issue_date, Some("2024-03-15".to_string()));
        assert_eq!(doc.supplier, Some("Комерц ДОО Скопје".to_string()));
        assert_eq!(doc.currency, Currency::Mkd);
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].quantity, Decimal::from(2));
        assert_eq!(doc.items[0].vat_percent, Decimal::from(18));
    }

    #[test]
    fn test_full_en_extraction() {
        let text = "\
ACME SUPPLIES LTD
123 Main Street
Invoice #INV-2024-001
Date: 03/15/2024
Item Qty Price Amount
Widget A 2 49.99 99.98
Total: 99.98 USD";

        let pipeline = ExtractionPipeline::new();
        let doc = pipeline.extract(text, 90.0);

        assert_eq!(doc.locale, Locale::En);
        assert_eq!(doc.invoice_number, Some("INV-2024-001".to_string()));
        assert_eq!(doc.issue_date, Some("2024-03-15".to_string()));
        assert_eq!(doc.supplier, Some("ACME SUPPLIES LTD".to_string()));
        assert_eq!(doc.currency, Currency::Usd);
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn test_below_parse_threshold_yields_empty_draft() {
        let pipeline = ExtractionPipeline::new();
        let doc = pipeline.extract(MK_INVOICE, 10.0);

        assert_eq!(doc.invoice_number, None);
        assert_eq!(doc.supplier, None);
        assert!(doc.items.is_empty());
        // Currency still resolves to the locale default.
        assert_eq!(doc.currency, Currency::Mkd);
        assert_eq!(doc.locale, Locale::Mk);
    }

    #[test]
    fn test_item_gate_between_thresholds() {
        // Above the parse threshold but below the item threshold: header
        // fields come through, items are left for manual entry.
        let pipeline = ExtractionPipeline::new();
        let doc = pipeline.extract(MK_INVOICE, 35.0);

        assert_eq!(doc.invoice_number, Some("123/2017".to_string()));
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let pipeline = ExtractionPipeline::new();
        let a = pipeline.extract(MK_INVOICE, 85.0);
        let b = pipeline.extract(MK_INVOICE, 85.0);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}
