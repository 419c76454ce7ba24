//! Generate apikey command implementation.

use std::ffi::OsStr;
use std::fs;
use std::io::Write;

use kanali_crypto::{encrypt, generate};
use kanali_spec::{ApiKey, KeyName};
use tracing::debug;

use crate::cli::GenerateApikeyArgs;
use crate::error::CliError;
use crate::output::{GeneratedKey, OutputFormat};

/// Handler for the generate apikey command.
pub struct GenerateApikeyCommand;

impl GenerateApikeyCommand {
    /// Generates an API key, encrypts it under the given public key, and
    /// renders the plaintext (once) plus the config document carrying the
    /// ciphertext.
    ///
    /// # Errors
    ///
    /// Returns an error when the name, key material or requested length is
    /// unusable, or when the out-file exists without `--force`.
    pub async fn execute<W: Write>(
        out: &mut W,
        format: &OutputFormat,
        args: &GenerateApikeyArgs,
    ) -> Result<(), CliError> {
        let name = KeyName::new(&args.name).map_err(CliError::setup)?;
        let public_key = kanali_crypto::load_public_key(&args.key).map_err(CliError::setup)?;

        let secret =
            generate(args.data.as_deref().unwrap_or(""), args.length).map_err(CliError::setup)?;
        let ciphertext = encrypt(&secret, Some(&public_key)).map_err(CliError::setup)?;

        let resource = ApiKey::new(name, &args.namespace, ciphertext);
        debug!(name = %resource.metadata.name, "generated api key resource");

        let written_to = match &args.out_file {
            Some(path) => {
                if path.exists() && !args.force {
                    return Err(CliError::OutputExists { path: path.clone() });
                }
                fs::write(path, render_resource(path, &resource)?)?;
                Some(path.clone())
            }
            None => None,
        };

        let generated = GeneratedKey {
            api_key: secret.display(),
            resource: args.show_resource.then(|| resource.clone()),
            written_to,
        };
        format.write(out, &generated)?;
        Ok(())
    }
}

/// Serializes the resource for the out-file: pretty JSON when the file's
/// extension says so, YAML otherwise.
fn render_resource(path: &std::path::Path, resource: &ApiKey) -> Result<Vec<u8>, CliError> {
    if path.extension().and_then(OsStr::to_str) == Some("json") {
        let mut bytes = serde_json::to_vec_pretty(resource)
            .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
        bytes.push(b'\n');
        Ok(bytes)
    } else {
        serde_yaml::to_string(resource)
            .map(String::into_bytes)
            .map_err(|e| CliError::Format(format!("YAML serialization failed: {e}")))
    }
}
