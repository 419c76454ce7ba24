//! Work units and run reports for the lifecycle engine.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::DocumentError;

/// One unit of rotation work: a single document drawn from a single file.
///
/// A job exclusively owns its byte buffers. `replacement` stays `None` for
/// documents the engine does not touch (unrecognized kinds) and for
/// documents whose transform failed, which is how original content survives
/// every failure mode: staging always has bytes to write.
#[derive(Debug)]
pub struct RotationJob {
    /// File this document came from.
    pub file: PathBuf,
    /// Whether the document carries the secret-bearing kind.
    pub is_api_key: bool,
    /// Resource name, when the document parsed far enough to know it.
    pub name: String,
    /// Resource namespace, when known.
    pub namespace: String,
    /// The document's exact original bytes.
    pub original: Vec<u8>,
    /// Rewritten bytes carrying the new ciphertext; `None` means the
    /// original bytes are written through unchanged.
    pub replacement: Option<Vec<u8>>,
    /// Terminal error, if the transform or the staged write failed.
    pub error: Option<DocumentError>,
}

impl RotationJob {
    /// Creates a copy-through job for a document the engine will not
    /// rewrite.
    #[must_use]
    pub fn copy_through(file: &std::path::Path, document: &[u8]) -> Self {
        Self {
            file: file.to_path_buf(),
            is_api_key: false,
            name: String::new(),
            namespace: String::new(),
            original: document.to_vec(),
            replacement: None,
            error: None,
        }
    }
}

/// Report row for one secret-bearing document.
#[derive(Debug, Clone, Serialize)]
pub struct RotationRecord {
    /// Resource name.
    pub name: String,
    /// Resource namespace.
    pub namespace: String,
    /// File the document came from.
    pub file: PathBuf,
    /// Whether the document's ciphertext was rewritten.
    pub rotated: bool,
    /// Error text for failed documents.
    pub error: Option<String>,
}

/// A file the engine could not process or rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// The file.
    pub file: PathBuf,
    /// What went wrong.
    pub error: String,
}

/// Aggregate result of one rotation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RotationReport {
    /// Total documents seen, of every kind.
    pub processed: usize,
    /// Documents that finished without error.
    pub succeeded: usize,
    /// Documents that recorded an error.
    pub failed: usize,
    /// Per-document detail for every secret-bearing document.
    pub records: Vec<RotationRecord>,
    /// Files that could not be read, split or rewritten.
    pub failed_files: Vec<FileFailure>,
}

/// Report row for one decrypted API key.
#[derive(Debug, Clone, Serialize)]
pub struct DecryptRow {
    /// Resource name.
    pub name: String,
    /// The recovered plaintext, or the decryption error text.
    pub data: String,
}

/// Aggregate result of one batch decryption run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecryptReport {
    /// One row per API key document found under the root.
    pub rows: Vec<DecryptRow>,
}
