//! Header field extraction: document number, dates, supplier, currency.

use tracing::debug;

use crate::models::config::PipelineConfig;
use crate::models::document::{Currency, Locale};

use super::locale::LocaleRules;
use super::normalize::normalize_date;
use super::patterns::{CONTACT_MARKER, DATE_ANY, DUE_DATE_LABELED, NUMERIC_LINE};

/// Currency synonym table, checked in order: codes, symbols, native words.
const CURRENCY_SYNONYMS: &[(Currency, &[&str])] = &[
    (Currency::Mkd, &["mkd", "ден", "денар"]),
    (Currency::Eur, &["eur", "€", "евро", "euro"]),
    (Currency::Usd, &["usd", "$", "долар", "dollar"]),
    (Currency::Gbp, &["gbp", "£", "фунта", "pound"]),
];

/// Header fields recovered from recognized text.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub invoice_number: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub supplier: Option<String>,
    pub currency: Currency,
}

/// Extract all header fields. Absence of a field is never an error; it means
/// the operator enters the value manually.
pub fn extract_fields(
    text: &str,
    lines: &[&str],
    rules: &dyn LocaleRules,
    config: &PipelineConfig,
) -> ExtractedFields {
    let invoice_number = extract_document_number(text, rules);
    let (issue_date, due_date) = extract_dates(text, rules.locale());
    let supplier = extract_supplier(lines, rules, config);
    let currency = extract_currency(text, rules);

    debug!(
        number = invoice_number.as_deref().unwrap_or("-"),
        supplier = supplier.as_deref().unwrap_or("-"),
        %currency,
        "header fields extracted"
    );

    ExtractedFields {
        invoice_number,
        issue_date,
        due_date,
        supplier,
        currency,
    }
}

/// First capturing rule in the locale's ordered list wins.
fn extract_document_number(text: &str, rules: &dyn LocaleRules) -> Option<String> {
    for rule in rules.document_number_rules() {
        if let Some(caps) = rule.pattern.captures(text) {
            debug!(rule = rule.name, "document number matched");
            return Some(caps[1].to_string());
        }
    }
    None
}

/// First date-shaped substring becomes the issue date. The due date prefers
/// a labeled match (due/dospelost/плаќање), falling back to the second
/// date-shaped substring.
fn extract_dates(text: &str, locale: Locale) -> (Option<String>, Option<String>) {
    let mut dates = DATE_ANY.find_iter(text).map(|m| m.as_str());

    let issue = dates.next().map(|raw| normalize_date(raw, locale));
    if issue.is_none() {
        return (None, None);
    }

    let due = DUE_DATE_LABELED
        .captures(text)
        .map(|caps| normalize_date(&caps[1], locale))
        .or_else(|| dates.next().map(|raw| normalize_date(raw, locale)));

    (issue, due)
}

/// Scan only the lines preceding the first table-header line, reject
/// obvious non-names, and let the locale pick among the survivors.
fn extract_supplier(
    lines: &[&str],
    rules: &dyn LocaleRules,
    config: &PipelineConfig,
) -> Option<String> {
    let header_idx = lines.iter().position(|l| rules.is_table_header(l));
    let region = &lines[..header_idx.unwrap_or(lines.len())];

    let candidates: Vec<&str> = region
        .iter()
        .copied()
        .filter(|line| qualifies_as_supplier(line, rules, config))
        .collect();

    rules.choose_supplier(&candidates)
}

fn qualifies_as_supplier(line: &str, rules: &dyn LocaleRules, config: &PipelineConfig) -> bool {
    if line.chars().count() < config.min_supplier_len {
        return false;
    }
    if line.starts_with(|c: char| c.is_ascii_digit()) || NUMERIC_LINE.is_match(line) {
        return false;
    }
    if CONTACT_MARKER.is_match(line) {
        return false;
    }
    !rules.is_supplier_label(line)
}

/// Single pass over the synonym table; no match falls back to the locale
/// default.
fn extract_currency(text: &str, rules: &dyn LocaleRules) -> Currency {
    let lower = text.to_lowercase();
    for (currency, synonyms) in CURRENCY_SYNONYMS {
        if synonyms.iter().any(|s| lower.contains(s)) {
            return *currency;
        }
    }
    rules.default_currency()
}
