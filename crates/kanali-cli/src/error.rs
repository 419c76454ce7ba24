//! CLI error types.
//!
//! Everything surfaced here ends the process with a non-zero exit. Failures
//! of individual documents or files never reach this type; they live in the
//! run reports.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Key material or arguments were unusable before any file was touched.
    #[error("setup error: {0}")]
    Setup(String),

    /// The engine run itself failed.
    #[error(transparent)]
    Engine(#[from] kanali_rotate::EngineError),

    /// An output file already exists and `--force` was not given.
    #[error("{path} exists, pass --force to overwrite it")]
    OutputExists {
        /// The file that would have been overwritten.
        path: PathBuf,
    },

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Wraps a pre-run failure as a setup error.
    #[must_use]
    pub fn setup(error: impl std::fmt::Display) -> Self {
        Self::Setup(error.to_string())
    }
}
