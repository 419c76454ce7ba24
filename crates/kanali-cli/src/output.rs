//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;
use std::path::PathBuf;

use kanali_rotate::{DecryptReport, RotationReport};
use kanali_spec::ApiKey;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

impl TableDisplay for RotationReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "{:<8}  {:<8}  {:<8}",
            "TOTAL", "SUCCESS", "ERROR"
        )?;
        writeln!(writer, "{}", "─".repeat(28))?;
        writeln!(
            writer,
            "{:<8}  {:<8}  {:<8}",
            self.processed, self.succeeded, self.failed
        )?;
        writeln!(writer)?;

        if self.records.is_empty() {
            writeln!(writer, "no API keys found")?;
        } else {
            writeln!(
                writer,
                "{:<24}  {:<16}  {:<36}  {:<8}  {}",
                "NAME", "NAMESPACE", "FILE", "ROTATED", "ERROR"
            )?;
            writeln!(writer, "{}", "─".repeat(104))?;
            for record in &self.records {
                writeln!(
                    writer,
                    "{:<24}  {:<16}  {:<36}  {:<8}  {}",
                    record.name,
                    record.namespace,
                    record.file.display(),
                    record.rotated,
                    record.error.as_deref().unwrap_or("none")
                )?;
            }
        }

        if !self.failed_files.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Files needing manual attention:")?;
            for failure in &self.failed_files {
                writeln!(writer, "  {}: {}", failure.file.display(), failure.error)?;
            }
        }

        Ok(())
    }
}

impl TableDisplay for DecryptReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.rows.is_empty() {
            writeln!(writer, "no API keys found")?;
            return Ok(());
        }

        writeln!(writer, "{:<32}  {}", "API KEY NAME", "RESULT")?;
        writeln!(writer, "{}", "─".repeat(72))?;
        for row in &self.rows {
            writeln!(writer, "{:<32}  {}", row.name, row.data)?;
        }
        writeln!(writer)?;
        writeln!(writer, "Total: {} API key(s)", self.rows.len())?;
        Ok(())
    }
}

/// Result of generating a new API key.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedKey {
    /// The plaintext key, shown exactly once.
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// The config document carrying the encrypted key, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ApiKey>,
    /// Where the config document was written, when requested.
    #[serde(rename = "writtenTo", skip_serializing_if = "Option::is_none")]
    pub written_to: Option<PathBuf>,
}

impl TableDisplay for GeneratedKey {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "Here is your api key (you will only see this once): {}",
            self.api_key
        )?;
        if let Some(resource) = &self.resource {
            let yaml = serde_yaml::to_string(resource)
                .map_err(|e| CliError::Format(format!("YAML serialization failed: {e}")))?;
            writeln!(writer)?;
            writeln!(writer, "Corresponding config document:")?;
            write!(writer, "{yaml}")?;
        }
        if let Some(path) = &self.written_to {
            writeln!(writer)?;
            writeln!(
                writer,
                "Corresponding config document written to {}",
                path.display()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanali_rotate::{DecryptRow, RotationRecord};
    use kanali_spec::KeyName;

    fn sample_report() -> RotationReport {
        RotationReport {
            processed: 3,
            succeeded: 2,
            failed: 1,
            records: vec![
                RotationRecord {
                    name: "good-key".to_string(),
                    namespace: "default".to_string(),
                    file: PathBuf::from("keys.yaml"),
                    rotated: true,
                    error: None,
                },
                RotationRecord {
                    name: "stale-key".to_string(),
                    namespace: "default".to_string(),
                    file: PathBuf::from("keys.yaml"),
                    rotated: false,
                    error: Some("decryption failed: decryption error".to_string()),
                },
            ],
            failed_files: vec![],
        }
    }

    #[test]
    fn rotation_report_table_output() {
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&sample_report()).expect("format");

        assert!(output.contains("TOTAL"));
        assert!(output.contains("good-key"));
        assert!(output.contains("none"));
        assert!(output.contains("decryption failed"));
    }

    #[test]
    fn rotation_report_json_output() {
        let fmt = OutputFormat::new(Format::Json);
        let output = fmt.to_string(&sample_report()).expect("format");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(parsed["processed"], 3);
        assert_eq!(parsed["records"][1]["rotated"], false);
    }

    #[test]
    fn empty_decrypt_report_says_so() {
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt
            .to_string(&DecryptReport::default())
            .expect("format");
        assert!(output.contains("no API keys found"));
    }

    #[test]
    fn decrypt_report_table_output() {
        let report = DecryptReport {
            rows: vec![DecryptRow {
                name: "my-key".to_string(),
                data: "s3cr3tV4lue".to_string(),
            }],
        };
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&report).expect("format");

        assert!(output.contains("API KEY NAME"));
        assert!(output.contains("my-key"));
        assert!(output.contains("s3cr3tV4lue"));
        assert!(output.contains("Total: 1 API key(s)"));
    }

    #[test]
    fn generated_key_table_shows_the_key_once() {
        let name = KeyName::new("my-key").expect("valid name");
        let generated = GeneratedKey {
            api_key: "pla1nt3xt".to_string(),
            resource: Some(ApiKey::new(name, "default", "beef")),
            written_to: Some(PathBuf::from("key.yaml")),
        };
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&generated).expect("format");

        assert!(output.contains("you will only see this once"));
        assert!(output.contains("pla1nt3xt"));
        assert!(output.contains("kind: ApiKey"));
        assert!(output.contains("written to key.yaml"));
    }

    #[test]
    fn generated_key_json_uses_wire_names() {
        let generated = GeneratedKey {
            api_key: "pla1nt3xt".to_string(),
            resource: None,
            written_to: None,
        };
        let fmt = OutputFormat::new(Format::Json);
        let output = fmt.to_string(&generated).expect("format");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(parsed["apiKey"], "pla1nt3xt");
        assert!(parsed.get("resource").is_none());
    }
}
