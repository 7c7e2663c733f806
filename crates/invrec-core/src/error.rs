//! Error types for the invrec-core library.

use thiserror::Error;
use uuid::Uuid;

use crate::models::document::DocumentType;

/// Main error type for the invrec library.
#[derive(Error, Debug)]
pub enum InvrecError {
    /// Reconciliation error.
    #[error("reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Text recognition error from the external recognizer.
    #[error("recognition error: {0}")]
    Recognize(String),

    /// File storage error from the external storage backend.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while reconciling a document pair.
///
/// Extraction has no error type: every extracted field is optional and
/// absence means manual entry, not failure.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The referenced document does not exist, or is not of the expected
    /// type (order vs. invoice mismatch).
    #[error("{expected} {id} not found")]
    NotFound { id: Uuid, expected: DocumentType },

    /// Persistence failed while loading documents or storing the report.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors related to the persistence seam.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A lock guarding the store was poisoned.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Referenced pair does not exist.
    #[error("pair {0} not found")]
    PairNotFound(Uuid),
}

/// Result type for the invrec library.
pub type Result<T> = std::result::Result<T, InvrecError>;
