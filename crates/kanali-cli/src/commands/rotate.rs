//! Rotate command implementation.

use std::io::Write;

use kanali_rotate::Rotator;
use tracing::debug;

use crate::cli::RotateArgs;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for the rotate command.
pub struct RotateCommand;

impl RotateCommand {
    /// Rotates every API key under the given path from the old keypair to
    /// the new one and renders the report.
    ///
    /// Both keys must load before any file is touched. Document and file
    /// failures are confined to the report; the process still exits zero so
    /// partially successful work is never discarded.
    ///
    /// # Errors
    ///
    /// Returns an error when either key is unusable, discovery fails, or
    /// the report cannot be written.
    pub async fn execute<W: Write>(
        out: &mut W,
        format: &OutputFormat,
        args: &RotateArgs,
    ) -> Result<(), CliError> {
        let old_key = kanali_crypto::load_private_key(&args.old_key).map_err(CliError::setup)?;
        let new_key = kanali_crypto::load_public_key(&args.new_key).map_err(CliError::setup)?;
        debug!(path = %args.path.display(), "running rotation");

        let report = Rotator::new(old_key, new_key).run(&args.path).await?;
        format.write(out, &report)?;
        Ok(())
    }
}
