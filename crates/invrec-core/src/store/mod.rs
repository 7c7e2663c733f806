//! Persistence seam: document, pair and validation storage.
//!
//! Schema and migrations belong to the surrounding application; the core
//! only depends on the operations below.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::document::{Document, DocumentPair, DocumentType};
use crate::reconcile::{ValidationResult, ValidationSummary};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage operations the reconciliation flow depends on.
///
/// `replace_validation` must appear atomic to readers: no observer may see
/// the old results removed while the new ones are still absent. The same
/// guarantee serializes concurrent re-runs of one pair.
pub trait DocumentStore {
    /// Persist a submitted document.
    fn insert_document(&self, document: Document) -> Result<()>;

    /// Load one document by id.
    fn document(&self, id: Uuid) -> Result<Option<Document>>;

    /// List documents of one type, newest first.
    fn documents(&self, doc_type: DocumentType) -> Result<Vec<Document>>;

    /// Look up the unique pair for (order, invoice), if reconciled before.
    fn find_pair(&self, order_id: Uuid, invoice_id: Uuid) -> Result<Option<DocumentPair>>;

    /// Get the unique pair for (order, invoice), creating it on first use.
    fn find_or_create_pair(&self, order_id: Uuid, invoice_id: Uuid) -> Result<DocumentPair>;

    /// Delete all prior results for the pair, insert the new set and upsert
    /// the summary, atomically.
    fn replace_validation(
        &self,
        pair_id: Uuid,
        results: &[ValidationResult],
        summary: &ValidationSummary,
    ) -> Result<()>;

    /// Results of the latest run for a pair.
    fn validation_results(&self, pair_id: Uuid) -> Result<Vec<ValidationResult>>;

    /// Summary of the latest run for a pair.
    fn validation_summary(&self, pair_id: Uuid) -> Result<Option<ValidationSummary>>;
}

#[derive(Default)]
struct Inner {
    documents: Vec<Document>,
    pairs: Vec<DocumentPair>,
    results: HashMap<Uuid, Vec<ValidationResult>>,
    summaries: HashMap<Uuid, ValidationSummary>,
}

/// In-memory store backed by a single `RwLock`.
///
/// One write lock covers the delete + insert + upsert of a validation run,
/// which both serializes concurrent re-runs of the same pair and keeps the
/// replacement atomic for readers.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn insert_document(&self, document: Document) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.documents.push(document);
        Ok(())
    }

    fn document(&self, id: Uuid) -> Result<Option<Document>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.documents.iter().find(|d| d.id == id).cloned())
    }

    fn documents(&self, doc_type: DocumentType) -> Result<Vec<Document>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut documents: Vec<Document> = inner
            .documents
            .iter()
            .filter(|d| d.doc_type == doc_type)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    fn find_pair(&self, order_id: Uuid, invoice_id: Uuid) -> Result<Option<DocumentPair>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .pairs
            .iter()
            .find(|p| p.order_id == order_id && p.invoice_id == invoice_id)
            .cloned())
    }

    fn find_or_create_pair(&self, order_id: Uuid, invoice_id: Uuid) -> Result<DocumentPair> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(pair) = inner
            .pairs
            .iter()
            .find(|p| p.order_id == order_id && p.invoice_id == invoice_id)
        {
            return Ok(pair.clone());
        }
        let pair = DocumentPair {
            id: Uuid::new_v4(),
            order_id,
            invoice_id,
            created_at: Utc::now(),
        };
        inner.pairs.push(pair.clone());
        Ok(pair)
    }

    fn replace_validation(
        &self,
        pair_id: Uuid,
        results: &[ValidationResult],
        summary: &ValidationSummary,
    ) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        if !inner.pairs.iter().any(|p| p.id == pair_id) {
            return Err(StoreError::PairNotFound(pair_id));
        }
        inner.results.insert(pair_id, results.to_vec());
        inner.summaries.insert(pair_id, summary.clone());
        Ok(())
    }

    fn validation_results(&self, pair_id: Uuid) -> Result<Vec<ValidationResult>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.results.get(&pair_id).cloned().unwrap_or_default())
    }

    fn validation_summary(&self, pair_id: Uuid) -> Result<Option<ValidationSummary>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.summaries.get(&pair_id).cloned())
    }
}
