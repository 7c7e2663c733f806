//! Core library for order/invoice reconciliation.
//!
//! This crate provides:
//! - Extraction of structured order/invoice drafts from recognized text
//!   (locale detection, ordered field rules, line-item segmentation)
//! - A deterministic reconciliation engine comparing an order against an
//!   invoice under explicit tolerances
//! - Persistence and recognizer seams for the surrounding application

pub mod error;
pub mod extract;
pub mod models;
pub mod recognize;
pub mod reconcile;
pub mod store;

pub use error::{InvrecError, ReconcileError, Result, StoreError};
pub use extract::{ExtractionPipeline, detect_locale};
pub use models::config::{InvrecConfig, PipelineConfig, ReconcileConfig};
pub use models::document::{
    Currency, Document, DocumentPair, DocumentType, FileRef, LineItem, Locale,
};
pub use models::extracted::ExtractedDocument;
pub use recognize::{FileStorage, RecognizedText, Recognizer};
pub use reconcile::{
    Category, DocumentTotals, ReconcileOutcome, Reconciler, ReconciliationEngine, Severity,
    Status, ValidationReport, ValidationResult, ValidationSummary,
};
pub use store::{DocumentStore, MemoryStore};
