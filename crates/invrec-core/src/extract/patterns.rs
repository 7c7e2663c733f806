//! Common regex patterns for field and line-item extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Document number patterns
    pub static ref MK_NUMBER: Regex = Regex::new(
        r"(?i)(?:Фактура|Ф-ра|Број|Бр\.?)?\s*(\d{1,6}/\d{2,4})\b"
    ).unwrap();

    pub static ref EN_NUMBER_CODE: Regex = Regex::new(
        r"(?i)(?:invoice|inv\.?|number|no\.?|#)[\s#:]*([A-Za-z][A-Za-z0-9]*[-/][A-Za-z0-9/-]+)"
    ).unwrap();

    pub static ref EN_NUMBER_BARE: Regex = Regex::new(
        r"(?i)(?:invoice|inv\.?|number|no\.?|#)[\s#:]*(\d+)"
    ).unwrap();

    // Any date-shaped token, scanned in document order
    pub static ref DATE_ANY: Regex = Regex::new(
        r"\b(\d{1,2}[.\-/]\d{1,2}[.\-/]\d{2,4}|\d{4}[.\-/]\d{1,2}[.\-/]\d{1,2})\b"
    ).unwrap();

    // Labeled due date, tried before the positional second-date rule
    pub static ref DUE_DATE_LABELED: Regex = Regex::new(
        r"(?i)(?:due(?:\s+date)?|dospelost|достасување|доспевање|плаќање|payment)[\s:]*(\d{1,2}[.\-/]\d{1,2}[.\-/]\d{2,4})"
    ).unwrap();

    // Date normalization shapes (fully anchored, applied to one token)
    pub static ref DATE_DMY_FULL: Regex = Regex::new(
        r"^(\d{1,2})[.\-](\d{1,2})[.\-](\d{4})$"
    ).unwrap();

    pub static ref DATE_YMD_FULL: Regex = Regex::new(
        r"^(\d{4})[.\-/](\d{1,2})[.\-/](\d{1,2})$"
    ).unwrap();

    pub static ref DATE_DMY_SHORT: Regex = Regex::new(
        r"^(\d{1,2})[.\-](\d{1,2})[.\-](\d{2})$"
    ).unwrap();

    pub static ref DATE_SLASH: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$"
    ).unwrap();

    // Locale detection shapes: dotted day-first date + `N/YYYY` document number
    pub static ref MK_DATE_SHAPE: Regex = Regex::new(
        r"\b\d{1,2}\.\d{1,2}\.\d{4}\b"
    ).unwrap();

    pub static ref MK_NUMBER_SHAPE: Regex = Regex::new(
        r"\b\d{1,6}/\d{4}\b"
    ).unwrap();

    // Table header lines (column keywords)
    pub static ref MK_TABLE_HEADER: Regex = Regex::new(
        r"(?i)Бр\.|ОПИС|КОЛ|ЦЕНА|Артикол"
    ).unwrap();

    pub static ref EN_TABLE_HEADER: Regex = Regex::new(
        r"(?i)\b(?:item|description|qty|quantity|unit\s+price|price|amount)\b"
    ).unwrap();

    // Totals/VAT/payment boilerplate that never holds an item
    pub static ref MK_BOILERPLATE: Regex = Regex::new(
        r"(?i)вкупно|основа|основица|ддв|наплата|за\s+плаќање|итог|цена\s+без|износ|издавање|доспевање|фактура|купувач|добавувач|налог|намена|датум"
    ).unwrap();

    pub static ref EN_BOILERPLATE: Regex = Regex::new(
        r"(?i)\btotal\b|subtotal|\bsum\b|\bvat\b|\btax\b|payment|balance|amount\s+due|\bgrand\b|\binvoice\b|\bdate\b|bill\s+to|ship\s+to"
    ).unwrap();

    // Labels rejected while scanning for the supplier line
    pub static ref MK_SUPPLIER_LABEL: Regex = Regex::new(
        r"(?i)^(?:Назив|Адреса|Град|Тел|Phone|Email|Датум|Фактура)\s*:?\s*$"
    ).unwrap();

    pub static ref EN_SUPPLIER_LABEL: Regex = Regex::new(
        r"(?i)^(?:invoice|date|due|bill\s+to|ship\s+to|tel|phone|fax|e-?mail|page|vat|order|po\b)"
    ).unwrap();

    // Supplier preference hints for `en`
    pub static ref EN_LEGAL_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:ltd|inc|llc|corp|gmbh|plc|doo|co)\b\.?"
    ).unwrap();

    // Document-level VAT percentage
    pub static ref MK_VAT: Regex = Regex::new(
        r"(?i)ДДВ\s*:?\s*(\d{1,2}(?:[.,]\d+)?)\s*%"
    ).unwrap();

    pub static ref EN_VAT: Regex = Regex::new(
        r"(?i)VAT\s*:?\s*(\d{1,2}(?:[.,]\d+)?)\s*%"
    ).unwrap();

    // Line-item tokenization
    pub static ref MK_CURRENCY_TOKEN: Regex = Regex::new(
        r"(?i)\s+ден\b"
    ).unwrap();

    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"^\d[\d.,]*$"
    ).unwrap();

    // Lines that are only digits, whitespace and punctuation
    pub static ref NUMERIC_LINE: Regex = Regex::new(
        r"^[\d\s.,\-]+$"
    ).unwrap();

    // Email/domain markers disqualifying a line
    pub static ref CONTACT_MARKER: Regex = Regex::new(
        r"(?i)@|www\.|http|\.com\b"
    ).unwrap();
}
