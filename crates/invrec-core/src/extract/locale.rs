//! Locale strategy: one extraction ruleset per supported locale.
//!
//! Every locale-dependent decision of the pipeline is answered by a
//! [`LocaleRules`] implementation; adding a locale means one implementation
//! plus one registry entry in [`rules_for`].

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::document::{Currency, Locale};

use super::normalize::parse_number;
use super::patterns;

/// A named document-number rule. Rules are evaluated in list order and the
/// first one producing a capture wins; there is no scoring.
pub struct NumberRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
}

/// One parsed line item candidate, before the document-level VAT is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Per-locale extraction ruleset.
pub trait LocaleRules: Sync {
    fn locale(&self) -> Locale;

    fn default_currency(&self) -> Currency {
        self.locale().default_currency()
    }

    /// Ordered document-number rules; first capture wins.
    fn document_number_rules(&self) -> &[NumberRule];

    /// True when the line is a tabular column-header line.
    fn is_table_header(&self, line: &str) -> bool;

    /// True when the line is totals/VAT/payment boilerplate.
    fn is_boilerplate(&self, line: &str) -> bool;

    /// True when the line is a bare form label rather than a value.
    fn is_supplier_label(&self, line: &str) -> bool;

    /// Document-level VAT percentage, when the text declares one.
    fn document_vat(&self, text: &str) -> Option<Decimal>;

    /// Pick the supplier among qualifying header-region lines.
    fn choose_supplier(&self, candidates: &[&str]) -> Option<String>;

    /// Parse one candidate line into an item.
    fn parse_item_line(&self, line: &str) -> Option<ParsedItem>;
}

/// Ruleset lookup table.
pub fn rules_for(locale: Locale) -> &'static dyn LocaleRules {
    match locale {
        Locale::Mk => &MkRules,
        Locale::En => &EnRules,
    }
}

lazy_static! {
    static ref MK_NUMBER_RULES: Vec<NumberRule> = vec![NumberRule {
        name: "slash-year",
        pattern: &patterns::MK_NUMBER,
    }];
    static ref EN_NUMBER_RULES: Vec<NumberRule> = vec![
        NumberRule {
            name: "labeled-code",
            pattern: &patterns::EN_NUMBER_CODE,
        },
        NumberRule {
            name: "labeled-digits",
            pattern: &patterns::EN_NUMBER_BARE,
        },
    ];
}

/// Macedonian ruleset: Cyrillic headers, `ден` amounts, `.`-thousands /
/// `,`-decimal numbers.
pub struct MkRules;

impl LocaleRules for MkRules {
    fn locale(&self) -> Locale {
        Locale::Mk
    }

    fn document_number_rules(&self) -> &[NumberRule] {
        &MK_NUMBER_RULES
    }

    fn is_table_header(&self, line: &str) -> bool {
        patterns::MK_TABLE_HEADER.is_match(line)
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        patterns::MK_BOILERPLATE.is_match(line)
    }

    fn is_supplier_label(&self, line: &str) -> bool {
        patterns::MK_SUPPLIER_LABEL.is_match(line)
    }

    fn document_vat(&self, text: &str) -> Option<Decimal> {
        let caps = patterns::MK_VAT.captures(text)?;
        parse_number(&caps[1], Locale::Mk)
    }

    fn choose_supplier(&self, candidates: &[&str]) -> Option<String> {
        // An addressed document names the supplier after the "до:" marker.
        for line in candidates {
            if let Some((_, after)) = line.split_once("до:") {
                let after = after.trim();
                if !after.is_empty() {
                    return Some(after.to_string());
                }
            }
        }
        candidates.first().map(|s| s.to_string())
    }

    fn parse_item_line(&self, line: &str) -> Option<ParsedItem> {
        // Tabular rows read "01 Производ 1 2 100,00 ден 200,00 ден": row
        // index first, quantity and unit price are always the last two
        // numbers before the currency token.
        let currency = patterns::MK_CURRENCY_TOKEN.find(line)?;
        let before_currency = &line[..currency.start()];

        let tokens: Vec<&str> = before_currency.split_whitespace().collect();
        let numbers: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| patterns::NUMERIC_TOKEN.is_match(t))
            .map(|(i, _)| i)
            .collect();

        if numbers.len() < 3 {
            return None;
        }

        let qty_idx = numbers[numbers.len() - 2];
        let price_idx = numbers[numbers.len() - 1];

        let quantity = leading_int(tokens[qty_idx]).unwrap_or(1);
        let unit_price =
            parse_number(tokens[price_idx], Locale::Mk).unwrap_or(Decimal::ZERO);

        // Name: the non-numeric tokens between the row index and the quantity.
        let name = tokens[numbers[0] + 1..qty_idx]
            .iter()
            .filter(|t| !patterns::NUMERIC_TOKEN.is_match(t))
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        accept(name, Decimal::from(quantity.max(1)), unit_price)
    }
}

/// English ruleset: `,`-thousands / `.`-decimal numbers, quantity/price told
/// apart by magnitude.
pub struct EnRules;

impl LocaleRules for EnRules {
    fn locale(&self) -> Locale {
        Locale::En
    }

    fn document_number_rules(&self) -> &[NumberRule] {
        &EN_NUMBER_RULES
    }

    fn is_table_header(&self, line: &str) -> bool {
        patterns::EN_TABLE_HEADER.is_match(line)
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        patterns::EN_BOILERPLATE.is_match(line)
    }

    fn is_supplier_label(&self, line: &str) -> bool {
        patterns::EN_SUPPLIER_LABEL.is_match(line)
    }

    fn document_vat(&self, text: &str) -> Option<Decimal> {
        let caps = patterns::EN_VAT.captures(text)?;
        parse_number(&caps[1].replace(',', "."), Locale::En)
    }

    fn choose_supplier(&self, candidates: &[&str]) -> Option<String> {
        // Company-shaped lines first: a legal-entity suffix, then an
        // all-caps letterhead line, then the first qualifying line.
        if let Some(line) = candidates
            .iter()
            .find(|l| patterns::EN_LEGAL_SUFFIX.is_match(l))
        {
            return Some(line.to_string());
        }
        if let Some(line) = candidates.iter().find(|l| is_all_caps(l)) {
            return Some(line.to_string());
        }
        candidates.first().map(|s| s.to_string())
    }

    fn parse_item_line(&self, line: &str) -> Option<ParsedItem> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let mut numbers: Vec<(usize, Decimal)> = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if let Some(value) = numeric_value(token) {
                numbers.push((i, value));
            }
        }

        if numbers.is_empty() {
            return None;
        }

        let n = numbers.len();
        let first = numbers[0].1;
        let hundred = Decimal::from(100);

        let (quantity, unit_price) = if n == 1 {
            (Decimal::ONE, numbers[0].1)
        } else if n >= 3 && first >= Decimal::ONE && first <= hundred && numbers[1].1 > first {
            (first, numbers[1].1)
        } else if first <= hundred && numbers[n - 1].1 > first {
            let price = if n >= 3 { numbers[n - 2].1 } else { numbers[n - 1].1 };
            (first, price)
        } else {
            let price = if n >= 3 { numbers[n - 2].1 } else { numbers[n - 1].1 };
            (Decimal::ONE, price)
        };

        // Name: the span before the first number, or between the first two
        // numbers when the line leads with its row index.
        let mut name = tokens[..numbers[0].0].join(" ").trim().to_string();
        if name.is_empty() && n >= 2 {
            name = tokens[numbers[0].0 + 1..numbers[1].0]
                .join(" ")
                .trim()
                .to_string();
        }

        let quantity = if quantity <= Decimal::ZERO {
            Decimal::ONE
        } else {
            quantity
        };

        accept(name, quantity, unit_price)
    }
}

fn accept(name: String, quantity: Decimal, unit_price: Decimal) -> Option<ParsedItem> {
    if name.chars().count() > 2 && unit_price > Decimal::ZERO {
        Some(ParsedItem {
            name,
            quantity,
            unit_price,
        })
    } else {
        None
    }
}

/// Leading-digits integer parse, tolerant of trailing OCR noise ("2," -> 2).
fn leading_int(token: &str) -> Option<i64> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Numeric value of an `en` token, repairing OCR glyph corruption of
/// currency signs (a stray leading letter, e.g. "S100.00") and stripping
/// real currency symbols and trailing separators.
fn numeric_value(token: &str) -> Option<Decimal> {
    let token = token
        .trim_start_matches(['$', '€', '£'])
        .trim_end_matches([',', ';', ':']);

    let repaired = match token.strip_prefix(|c: char| c.is_ascii_alphabetic()) {
        Some(rest) if rest.len() > 1 && patterns::NUMERIC_TOKEN.is_match(rest) => rest,
        _ => token,
    };

    if !patterns::NUMERIC_TOKEN.is_match(repaired) {
        return None;
    }
    parse_number(repaired, Locale::En)
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(|c| c.is_alphabetic()) && line == line.to_uppercase()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mk_item_line() {
        let item = MkRules
            .parse_item_line("01 Кутија мала 2 100,00 ден 200,00 ден")
            .unwrap();
        assert_eq!(item.name, "Кутија мала");
        assert_eq!(item.quantity, Decimal::from(2));
        assert_eq!(item.unit_price, Decimal::new(10000, 2));
    }

    #[test]
    fn test_mk_item_name_drops_stray_numeric_tokens() {
        // A numeric token inside the name span (OCR debris) is not part of
        // the name.
        let item = MkRules
            .parse_item_line("01 Производ 1 2 100,00 ден 200,00 ден")
            .unwrap();
        assert_eq!(item.name, "Производ");
        assert_eq!(item.quantity, Decimal::from(2));
    }

    #[test]
    fn test_mk_item_line_thousands_separator() {
        let item = MkRules
            .parse_item_line("02 Опрема 5 1.250,50 ден 6.252,50 ден")
            .unwrap();
        assert_eq!(item.quantity, Decimal::from(5));
        assert_eq!(item.unit_price, Decimal::new(125050, 2));
    }

    #[test]
    fn test_mk_item_line_requires_three_numbers() {
        assert_eq!(MkRules.parse_item_line("Производ 100,00 ден"), None);
    }

    #[test]
    fn test_en_item_qty_then_price() {
        let item = EnRules.parse_item_line("Widget A 2 49.99 99.98").unwrap();
        assert_eq!(item.name, "Widget A");
        assert_eq!(item.quantity, Decimal::from(2));
        assert_eq!(item.unit_price, Decimal::new(4999, 2));
    }

    #[test]
    fn test_en_item_glyph_repair() {
        // OCR reads "$12.50" as "S12.50"
        let item = EnRules.parse_item_line("Gadget 3 S12.50 37.50").unwrap();
        assert_eq!(item.quantity, Decimal::from(3));
        assert_eq!(item.unit_price, Decimal::new(1250, 2));
    }

    #[test]
    fn test_en_item_single_number_is_price() {
        let item = EnRules.parse_item_line("Delivery fee 25.00").unwrap();
        assert_eq!(item.name, "Delivery fee");
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.unit_price, Decimal::new(2500, 2));
    }

    #[test]
    fn test_en_item_two_numbers() {
        let item = EnRules.parse_item_line("Cable 2 15.00").unwrap();
        assert_eq!(item.quantity, Decimal::from(2));
        assert_eq!(item.unit_price, Decimal::new(1500, 2));
    }

    #[test]
    fn test_en_item_large_first_number_defaults_quantity() {
        let item = EnRules
            .parse_item_line("Premium service 500.00 500.00")
            .unwrap();
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.unit_price, Decimal::new(50000, 2));
    }

    #[test]
    fn test_en_supplier_prefers_legal_suffix() {
        let candidates = vec!["123 Main Street", "Acme Supplies Ltd"];
        assert_eq!(
            EnRules.choose_supplier(&candidates),
            Some("Acme Supplies Ltd".to_string())
        );
    }

    #[test]
    fn test_en_supplier_prefers_all_caps() {
        let candidates = vec!["123 Main Street", "NORTHWIND TRADERS"];
        assert_eq!(
            EnRules.choose_supplier(&candidates),
            Some("NORTHWIND TRADERS".to_string())
        );
    }

    #[test]
    fn test_mk_supplier_addressed_marker() {
        let candidates = vec!["Испратено до: Комерц ДОО Скопје"];
        assert_eq!(
            MkRules.choose_supplier(&candidates),
            Some("Комерц ДОО Скопје".to_string())
        );
    }

    #[test]
    fn test_document_vat() {
        assert_eq!(
            MkRules.document_vat("ДДВ 18%"),
            Some(Decimal::from(18))
        );
        assert_eq!(
            EnRules.document_vat("VAT: 20%"),
            Some(Decimal::from(20))
        );
        assert_eq!(EnRules.document_vat("no rate here"), None);
    }

    #[test]
    fn test_number_rule_order() {
        let rules = EnRules.document_number_rules();
        assert_eq!(rules[0].name, "labeled-code");
        assert_eq!(rules[1].name, "labeled-digits");
    }
}
