//! Decrypt command implementation.

use std::io::Write;

use kanali_rotate::DecryptRunner;
use tracing::debug;

use crate::cli::DecryptArgs;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for the decrypt command.
pub struct DecryptCommand;

impl DecryptCommand {
    /// Decrypts every API key under the given path and renders the report.
    ///
    /// Key loading failures are setup errors and end the process non-zero;
    /// per-document decryption failures are report rows and do not.
    ///
    /// # Errors
    ///
    /// Returns an error when the private key is unusable, discovery fails,
    /// or the report cannot be written.
    pub async fn execute<W: Write>(
        out: &mut W,
        format: &OutputFormat,
        args: &DecryptArgs,
    ) -> Result<(), CliError> {
        let key = kanali_crypto::load_private_key(&args.key).map_err(CliError::setup)?;
        debug!(path = %args.path.display(), "running batch decryption");

        let report = DecryptRunner::new(key).run(&args.path).await?;
        format.write(out, &report)?;
        Ok(())
    }
}
