//! # Kanali CLI
//!
//! Library backing the `kanalictl` binary: argument parsing, command
//! handlers, and table/JSON output rendering for the credential lifecycle
//! engine.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
