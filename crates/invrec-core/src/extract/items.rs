//! Line-item extraction from tabular text regions.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::PipelineConfig;
use crate::models::document::LineItem;

use super::locale::LocaleRules;
use super::patterns::{CONTACT_MARKER, NUMERIC_LINE};

/// Extract up to `max_items` line items from recognized text.
///
/// Below the item confidence threshold nothing is extracted at all:
/// low-quality OCR must not fabricate quantities or prices, the operator
/// enters the rows manually.
pub fn extract_items(
    text: &str,
    lines: &[&str],
    confidence: f32,
    supplier: Option<&str>,
    rules: &dyn LocaleRules,
    config: &PipelineConfig,
) -> Vec<LineItem> {
    if confidence < config.min_item_confidence {
        debug!(
            confidence,
            threshold = config.min_item_confidence,
            "confidence below item threshold, skipping item extraction"
        );
        return Vec::new();
    }

    let vat_percent = rules
        .document_vat(text)
        .unwrap_or(config.default_vat_percent);

    let header_idx = lines.iter().position(|l| rules.is_table_header(l));
    let table_region: &[&str] = match header_idx {
        Some(idx) => &lines[idx + 1..],
        None => &[],
    };

    let mut items = scan(table_region, supplier, vat_percent, rules, config);

    // Recovery pass: some layouts carry no recognizable header row.
    if items.is_empty() {
        debug!("no items in table region, scanning all lines");
        items = scan(lines, supplier, vat_percent, rules, config);
    }

    debug!(count = items.len(), "line items extracted");
    items
}

fn scan(
    lines: &[&str],
    supplier: Option<&str>,
    vat_percent: Decimal,
    rules: &dyn LocaleRules,
    config: &PipelineConfig,
) -> Vec<LineItem> {
    let mut items = Vec::new();

    for line in lines {
        if items.len() == config.max_items {
            break;
        }
        if excluded(line, supplier, rules, config) {
            continue;
        }
        if let Some(parsed) = rules.parse_item_line(line) {
            items.push(LineItem {
                name: parsed.name,
                quantity: parsed.quantity,
                unit_price: parsed.unit_price,
                vat_percent,
            });
        }
    }

    items
}

fn excluded(
    line: &str,
    supplier: Option<&str>,
    rules: &dyn LocaleRules,
    config: &PipelineConfig,
) -> bool {
    if line.chars().count() < config.min_item_line_len {
        return true;
    }
    if rules.is_boilerplate(line) || rules.is_table_header(line) {
        return true;
    }
    if NUMERIC_LINE.is_match(line) || CONTACT_MARKER.is_match(line) {
        return true;
    }
    supplier == Some(line)
}
