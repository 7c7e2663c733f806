//! External collaborator interfaces: text recognition and file storage.
//!
//! Both are consumed seams. Recognition is the only long-running operation
//! around the core; it is delegated entirely and treated as a black box
//! returning text plus a confidence score.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output of the external text-recognition primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedText {
    /// Raw recognized text, line-oriented.
    pub text: String,

    /// Expected accuracy of the recognized text, 0-100.
    pub confidence: f32,
}

/// Black-box text recognizer over scanned images.
pub trait Recognizer {
    /// Recognize text in an image.
    fn recognize(&self, image: &[u8]) -> Result<RecognizedText>;
}

/// Addressable storage for uploaded source files. Used by the surrounding
/// upload flow, never by extraction or reconciliation.
pub trait FileStorage {
    /// Store raw bytes under `name`, returning an addressable path.
    fn store(&self, bytes: &[u8], name: &str) -> Result<String>;
}
