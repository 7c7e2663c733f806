//! Locale-aware number and date normalization.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::document::Locale;

use super::patterns::{DATE_DMY_FULL, DATE_DMY_SHORT, DATE_SLASH, DATE_YMD_FULL};

/// Separator pair for a locale: (thousands, decimal).
fn separators(locale: Locale) -> (char, char) {
    match locale {
        Locale::Mk => ('.', ','),
        Locale::En => (',', '.'),
    }
}

/// Strip the thousands separator and canonicalize the decimal separator
/// to `.`.
pub fn normalize_number(raw: &str, locale: Locale) -> String {
    let (thousands, decimal) = separators(locale);
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if ch == thousands {
            continue;
        }
        if ch == decimal {
            out.push('.');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Parse a locale-formatted numeric token.
pub fn parse_number(raw: &str, locale: Locale) -> Option<Decimal> {
    Decimal::from_str(&normalize_number(raw, locale)).ok()
}

/// Normalize a date-shaped token to ISO `YYYY-MM-DD`.
///
/// Formats are tried in order: `DD.MM.YYYY`, `YYYY.MM.DD` (the year-first
/// shape is identified by its four-digit leading group), `DD.MM.YY`
/// (two-digit years are taken as 2000s), then slash dates whose day/month
/// order depends on the locale (`en` writes the month first). No calendar
/// validation is performed beyond the structural shape.
///
/// Input matching no known format is returned unchanged; callers treat the
/// raw value as a request for manual review, not an error.
pub fn normalize_date(raw: &str, locale: Locale) -> String {
    let raw = raw.trim();

    if let Some(caps) = DATE_DMY_FULL.captures(raw) {
        return iso(&caps[3], &caps[2], &caps[1]);
    }

    if let Some(caps) = DATE_YMD_FULL.captures(raw) {
        return iso(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = DATE_DMY_SHORT.captures(raw) {
        return iso(&format!("20{}", &caps[3]), &caps[2], &caps[1]);
    }

    if let Some(caps) = DATE_SLASH.captures(raw) {
        let year = if caps[3].len() == 2 {
            format!("20{}", &caps[3])
        } else {
            caps[3].to_string()
        };
        return match locale {
            Locale::En => iso(&year, &caps[1], &caps[2]),
            Locale::Mk => iso(&year, &caps[2], &caps[1]),
        };
    }

    raw.to_string()
}

fn iso(year: &str, month: &str, day: &str) -> String {
    format!("{year}-{month:0>2}-{day:0>2}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_date_dotted() {
        assert_eq!(normalize_date("15.03.2024", Locale::Mk), "2024-03-15");
        assert_eq!(normalize_date("1.3.2024", Locale::Mk), "2024-03-01");
        assert_eq!(normalize_date("15-03-2024", Locale::En), "2024-03-15");
    }

    #[test]
    fn test_normalize_date_year_first() {
        assert_eq!(normalize_date("2024.03.15", Locale::Mk), "2024-03-15");
        assert_eq!(normalize_date("2024-3-5", Locale::En), "2024-03-05");
    }

    #[test]
    fn test_normalize_date_two_digit_year() {
        assert_eq!(normalize_date("15.03.24", Locale::Mk), "2024-03-15");
    }

    #[test]
    fn test_normalize_date_slash_order_by_locale() {
        // `en` writes the month first, `mk` the day
        assert_eq!(normalize_date("03/15/2024", Locale::En), "2024-03-15");
        assert_eq!(normalize_date("15/03/2024", Locale::Mk), "2024-03-15");
    }

    #[test]
    fn test_normalize_date_unparseable_passthrough() {
        assert_eq!(normalize_date("March 15th", Locale::En), "March 15th");
        assert_eq!(normalize_date("15..2024", Locale::Mk), "15..2024");
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("1.234,56", Locale::Mk), "1234.56");
        assert_eq!(normalize_number("100,00", Locale::Mk), "100.00");
        assert_eq!(normalize_number("1,234.56", Locale::En), "1234.56");
        assert_eq!(normalize_number("99.98", Locale::En), "99.98");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(
            parse_number("1.234,56", Locale::Mk),
            Some(Decimal::new(123456, 2))
        );
        assert_eq!(
            parse_number("1,234.56", Locale::En),
            Some(Decimal::new(123456, 2))
        );
        assert_eq!(parse_number("abc", Locale::En), None);
    }
}
