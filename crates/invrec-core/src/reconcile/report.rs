//! Validation report model: results, summary and document totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::document::LineItem;

/// Discrepancy category, each aggregated into its own status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Items,
    Vat,
    Dates,
    Totals,
}

/// Severity of a single discrepancy: errors must be fixed, warnings should
/// be reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Aggregated status of one category, or of the whole pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Valid,
    Warning,
    Error,
}

/// A single discrepancy found while reconciling a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub category: Category,
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    pub fn error(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Per-category statuses plus the overall verdict; one per pair, fully
/// replaced on every reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub items_status: Status,
    pub vat_status: Status,
    pub dates_status: Status,
    pub totals_status: Status,
    pub final_status: Status,
}

impl ValidationSummary {
    /// Aggregate a result set: a category is `error` if it holds any error,
    /// else `warning` if it holds any warning, else `valid`; the final
    /// status applies the same rule across categories.
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let status_of = |category: Category| {
            let mut status = Status::Valid;
            for result in results.iter().filter(|r| r.category == category) {
                match result.severity {
                    Severity::Error => return Status::Error,
                    Severity::Warning => status = Status::Warning,
                }
            }
            status
        };

        let items_status = status_of(Category::Items);
        let vat_status = status_of(Category::Vat);
        let dates_status = status_of(Category::Dates);
        let totals_status = status_of(Category::Totals);

        let categories = [items_status, vat_status, dates_status, totals_status];
        let final_status = if categories.contains(&Status::Error) {
            Status::Error
        } else if categories.contains(&Status::Warning) {
            Status::Warning
        } else {
            Status::Valid
        };

        Self {
            items_status,
            vat_status,
            dates_status,
            totals_status,
            final_status,
        }
    }
}

/// Subtotal, VAT total and grand total computed from a document's items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub vat_total: Decimal,
    pub grand_total: Decimal,
}

impl DocumentTotals {
    pub fn from_items(items: &[LineItem]) -> Self {
        let mut totals = Self::default();
        for item in items {
            let line = item.quantity * item.unit_price;
            let vat = line * item.vat_percent / Decimal::from(100);
            totals.subtotal += line;
            totals.vat_total += vat;
            totals.grand_total += line + vat;
        }
        totals
    }
}

/// Full outcome of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
    pub order_totals: DocumentTotals,
    pub invoice_totals: DocumentTotals,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn result(category: Category, severity: Severity) -> ValidationResult {
        ValidationResult {
            category,
            message: String::new(),
            severity,
        }
    }

    #[test]
    fn test_empty_results_are_valid() {
        let summary = ValidationSummary::from_results(&[]);
        assert_eq!(summary.final_status, Status::Valid);
        assert_eq!(summary.items_status, Status::Valid);
    }

    #[test]
    fn test_final_is_error_iff_any_category_errors() {
        let summary = ValidationSummary::from_results(&[
            result(Category::Items, Severity::Warning),
            result(Category::Vat, Severity::Error),
        ]);
        assert_eq!(summary.items_status, Status::Warning);
        assert_eq!(summary.vat_status, Status::Error);
        assert_eq!(summary.final_status, Status::Error);
    }

    #[test]
    fn test_final_is_warning_without_errors() {
        let summary = ValidationSummary::from_results(&[
            result(Category::Dates, Severity::Warning),
        ]);
        assert_eq!(summary.dates_status, Status::Warning);
        assert_eq!(summary.final_status, Status::Warning);
        assert_eq!(summary.items_status, Status::Valid);
    }

    #[test]
    fn test_error_dominates_warning_within_category() {
        let summary = ValidationSummary::from_results(&[
            result(Category::Items, Severity::Warning),
            result(Category::Items, Severity::Error),
        ]);
        assert_eq!(summary.items_status, Status::Error);
    }

    #[test]
    fn test_totals_computation() {
        let items = vec![
            LineItem {
                name: "Box".to_string(),
                quantity: Decimal::from(10),
                unit_price: Decimal::from(5),
                vat_percent: Decimal::from(18),
            },
            LineItem {
                name: "Lid".to_string(),
                quantity: Decimal::from(2),
                unit_price: Decimal::new(250, 2),
                vat_percent: Decimal::from(5),
            },
        ];
        let totals = DocumentTotals::from_items(&items);
        assert_eq!(totals.subtotal, Decimal::new(5500, 2));
        assert_eq!(totals.vat_total, Decimal::new(925, 2));
        assert_eq!(totals.grand_total, Decimal::new(6425, 2));
    }
}
