//! # Kanali Rotate
//!
//! The credential lifecycle engine for Kanali config trees:
//!
//! - **Document scanner**: recursive discovery of `.yaml`/`.yml`/`.json`
//!   files in deterministic order, and splitting of multi-document streams
//!   on the `---` separator convention
//! - **Rotation coordinator**: re-encrypts every `ApiKey` document under a
//!   root from an old RSA keypair to a new one, rewriting each file through
//!   a staged copy committed by atomic rename
//! - **Decryption batch runner**: recovers every `ApiKey` plaintext under a
//!   root for operator inspection
//!
//! Failure is isolated at the narrowest scope that can contain it: a
//! document that fails to parse, validate, decrypt or re-encrypt keeps its
//! original bytes and is reported, without blocking sibling documents; a
//! file whose staged copy cannot be written keeps its original on disk and
//! its staged remnant for diagnostics, without blocking the rest of the
//! run. No content is ever lost to a partial failure.
//!
//! Work fans out over a bounded worker pool, one file per task; results are
//! aggregated by a single join loop so reports are ordered and complete.

pub mod decrypt;
pub mod error;
mod pool;
pub mod rotate;
pub mod scanner;
pub mod types;

pub use decrypt::DecryptRunner;
pub use error::{DocumentError, EngineError};
pub use rotate::Rotator;
pub use scanner::{discover, probe_kind, split};
pub use types::{
    DecryptReport, DecryptRow, FileFailure, RotationJob, RotationRecord, RotationReport,
};

/// Suffix appended to a file's name for its staged rewrite.
pub const STAGED_SUFFIX: &str = "_staged";
