//! Deterministic reconciliation of a purchase order against an invoice.

mod report;

pub use report::{
    Category, DocumentTotals, Severity, Status, ValidationReport, ValidationResult,
    ValidationSummary,
};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ReconcileError;
use crate::models::document::{Document, DocumentPair, DocumentType, LineItem};
use crate::store::DocumentStore;

/// Compares two structured documents under a fixed numeric tolerance and
/// produces a severity-graded report.
///
/// `compare` is pure: identical inputs always yield an identical report, so
/// unrelated pairs may be reconciled fully in parallel.
pub struct ReconciliationEngine {
    tolerance: Decimal,
}

impl ReconciliationEngine {
    /// Create an engine with the standard 0.01 tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: Decimal::new(1, 2),
        }
    }

    /// Override the comparison tolerance.
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Compare an order against an invoice. `now` is injected so the date
    /// checks stay deterministic and testable.
    pub fn compare(
        &self,
        order: &Document,
        invoice: &Document,
        now: DateTime<Utc>,
    ) -> ValidationReport {
        let mut results = Vec::new();

        let (order_keys, order_map) = item_map(&order.items);
        let (invoice_keys, invoice_map) = item_map(&invoice.items);

        // Items: every order item must appear in the invoice; matched items
        // must agree on quantity and unit price.
        for key in &order_keys {
            let order_item = order_map[key];
            match invoice_map.get(key) {
                None => results.push(ValidationResult::error(
                    Category::Items,
                    format!(
                        "Item \"{}\" from order is missing in invoice",
                        order_item.name
                    ),
                )),
                Some(invoice_item) => {
                    if (order_item.quantity - invoice_item.quantity).abs() > self.tolerance {
                        results.push(ValidationResult::warning(
                            Category::Items,
                            format!(
                                "Quantity mismatch for \"{}\": order {} vs invoice {}",
                                order_item.name, order_item.quantity, invoice_item.quantity
                            ),
                        ));
                    }
                    if (order_item.unit_price - invoice_item.unit_price).abs() > self.tolerance {
                        results.push(ValidationResult::warning(
                            Category::Items,
                            format!(
                                "Unit price mismatch for \"{}\": order {} vs invoice {}",
                                order_item.name, order_item.unit_price, invoice_item.unit_price
                            ),
                        ));
                    }
                }
            }
        }

        for key in &invoice_keys {
            if !order_map.contains_key(key) {
                results.push(ValidationResult::warning(
                    Category::Items,
                    format!(
                        "Extra item \"{}\" in invoice not found in order",
                        invoice_map[key].name
                    ),
                ));
            }
        }

        // VAT: matched items must carry the same rate.
        for key in &order_keys {
            if let Some(invoice_item) = invoice_map.get(key) {
                let order_item = order_map[key];
                if (order_item.vat_percent - invoice_item.vat_percent).abs() > self.tolerance {
                    results.push(ValidationResult::error(
                        Category::Vat,
                        format!(
                            "VAT mismatch for \"{}\": order {}% vs invoice {}%",
                            order_item.name, order_item.vat_percent, invoice_item.vat_percent
                        ),
                    ));
                }
            }
        }

        // Totals: subtotal, VAT total and grand total must each agree.
        let order_totals = DocumentTotals::from_items(&order.items);
        let invoice_totals = DocumentTotals::from_items(&invoice.items);

        let totals_checks = [
            ("Subtotal", order_totals.subtotal, invoice_totals.subtotal),
            ("VAT total", order_totals.vat_total, invoice_totals.vat_total),
            (
                "Grand total",
                order_totals.grand_total,
                invoice_totals.grand_total,
            ),
        ];
        for (label, order_value, invoice_value) in totals_checks {
            if (order_value - invoice_value).abs() > self.tolerance {
                results.push(ValidationResult::error(
                    Category::Totals,
                    format!(
                        "{} mismatch: order {:.2} vs invoice {:.2}",
                        label, order_value, invoice_value
                    ),
                ));
            }
        }

        // Dates: creation timestamps, not user-entered document dates.
        if invoice.created_at < order.created_at {
            results.push(ValidationResult::error(
                Category::Dates,
                format!(
                    "Invoice date ({}) is before order date ({})",
                    invoice.created_at.format("%Y-%m-%d"),
                    order.created_at.format("%Y-%m-%d")
                ),
            ));
        }
        if invoice.created_at > now {
            results.push(ValidationResult::warning(
                Category::Dates,
                format!(
                    "Invoice date ({}) is in the future",
                    invoice.created_at.format("%Y-%m-%d")
                ),
            ));
        }
        if order.created_at > now {
            results.push(ValidationResult::warning(
                Category::Dates,
                format!(
                    "Order date ({}) is in the future",
                    order.created_at.format("%Y-%m-%d")
                ),
            ));
        }

        let summary = ValidationSummary::from_results(&results);
        debug!(
            results = results.len(),
            final_status = ?summary.final_status,
            "comparison complete"
        );

        ValidationReport {
            results,
            summary,
            order_totals,
            invoice_totals,
        }
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Item lookup by case-folded, trimmed name, with insertion order retained
/// for deterministic reporting. A repeated name keeps the last occurrence.
fn item_map(items: &[LineItem]) -> (Vec<String>, HashMap<String, &LineItem>) {
    let mut keys = Vec::new();
    let mut map: HashMap<String, &LineItem> = HashMap::new();
    for item in items {
        let key = item.match_key();
        if !map.contains_key(&key) {
            keys.push(key.clone());
        }
        map.insert(key, item);
    }
    (keys, map)
}

/// Outcome of a persisted reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub pair: DocumentPair,
    pub report: ValidationReport,
}

/// Runs the engine over persisted documents and stores the report.
pub struct Reconciler<S: DocumentStore> {
    engine: ReconciliationEngine,
    store: S,
}

impl<S: DocumentStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self {
            engine: ReconciliationEngine::new(),
            store,
        }
    }

    pub fn with_engine(mut self, engine: ReconciliationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reconcile a pair by document ids.
    ///
    /// The pair row is created lazily on the first run. Prior results are
    /// replaced and the summary upserted in one atomic store operation, so
    /// readers never observe a partially-cleared result set.
    pub fn run(
        &self,
        order_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let order = self.load(order_id, DocumentType::Order)?;
        let invoice = self.load(invoice_id, DocumentType::Invoice)?;

        let pair = self.store.find_or_create_pair(order_id, invoice_id)?;
        let report = self.engine.compare(&order, &invoice, Utc::now());
        self.store
            .replace_validation(pair.id, &report.results, &report.summary)?;

        info!(
            pair = %pair.id,
            final_status = ?report.summary.final_status,
            "reconciliation stored"
        );

        Ok(ReconcileOutcome { pair, report })
    }

    fn load(&self, id: Uuid, expected: DocumentType) -> Result<Document, ReconcileError> {
        self.store
            .document(id)?
            .filter(|d| d.doc_type == expected)
            .ok_or(ReconcileError::NotFound { id, expected })
    }
}
