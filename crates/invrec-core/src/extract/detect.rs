//! Locale detection for recognized text.

use crate::models::document::Locale;

use super::patterns::{MK_DATE_SHAPE, MK_NUMBER_SHAPE};

/// Macedonian markers: currency words, document headers and table labels.
const MK_MARKERS: &[&str] = &[
    "ден",
    "денар",
    "фактура",
    "вкупно",
    "ддв",
    "број",
    "купувач",
    "добавувач",
    "за плаќање",
    "цена",
    "количина",
    "опис",
    "данок",
];

/// English invoice/business keywords.
const EN_MARKERS: &[&str] = &[
    "invoice",
    "total",
    "subtotal",
    "vat",
    "amount due",
    "qty",
    "unit price",
    "bill to",
    "payment terms",
    "due date",
];

/// Classify recognized text into the locale whose ruleset applies.
///
/// Decision policy, first match wins:
/// 1. Macedonian keyword markers or any Cyrillic script character;
/// 2. a dotted day-first date together with an `N/YYYY` document number
///    (Macedonian layout recognized from transliterated/degraded scans);
/// 3. English keyword markers;
/// 4. `en` as the default.
///
/// Pure and deterministic for identical input.
pub fn detect_locale(text: &str) -> Locale {
    let lower = text.to_lowercase();

    if MK_MARKERS.iter().any(|m| lower.contains(m)) || has_cyrillic(text) {
        return Locale::Mk;
    }

    if MK_DATE_SHAPE.is_match(text) && MK_NUMBER_SHAPE.is_match(text) {
        return Locale::Mk;
    }

    if EN_MARKERS.iter().any(|m| lower.contains(m)) {
        return Locale::En;
    }

    Locale::En
}

fn has_cyrillic(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_text_is_mk() {
        assert_eq!(detect_locale("Фактура бр. 123/2017"), Locale::Mk);
    }

    #[test]
    fn test_mk_keyword_without_cyrillic_context() {
        assert_eq!(detect_locale("Vkupno: 1.200,00 ден"), Locale::Mk);
    }

    #[test]
    fn test_date_and_number_shape_is_mk() {
        // Latin-only degraded scan, Macedonian layout
        assert_eq!(detect_locale("Nalog 123/2024 od 15.03.2024"), Locale::Mk);
    }

    #[test]
    fn test_english_keywords() {
        assert_eq!(
            detect_locale("INVOICE #INV-2024-001\nTotal: 99.98 USD"),
            Locale::En
        );
    }

    #[test]
    fn test_default_is_en() {
        assert_eq!(detect_locale("lorem ipsum dolor"), Locale::En);
    }

    #[test]
    fn test_deterministic() {
        let text = "Some scanned text 15.03.2024";
        assert_eq!(detect_locale(text), detect_locale(text));
    }
}
