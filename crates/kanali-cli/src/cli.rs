//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// kanalictl - manage API key credentials for the Kanali gateway.
#[derive(Parser, Debug, Clone)]
#[command(name = "kanalictl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate resources.
    Generate {
        /// Generate subcommand to execute.
        #[command(subcommand)]
        command: GenerateCommands,
    },

    /// Decrypt every API key found under a file or directory.
    Decrypt(DecryptArgs),

    /// Rotate every API key found under a file or directory to a new
    /// keypair.
    Rotate(RotateArgs),
}

/// Generate subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum GenerateCommands {
    /// Generate an API key along with the config document carrying its
    /// encrypted form.
    Apikey(GenerateApikeyArgs),
}

/// Arguments for the generate apikey command.
#[derive(Parser, Debug, Clone)]
pub struct GenerateApikeyArgs {
    /// Unique name for the API key.
    #[arg(long)]
    pub name: String,

    /// Namespace for the API key resource.
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Existing alphanumeric key data to use instead of generating.
    #[arg(long)]
    pub data: Option<String>,

    /// Length of the generated key.
    #[arg(long, default_value_t = 32)]
    pub length: usize,

    /// Path to the RSA public key, or literal PEM text.
    #[arg(long, env = "KANALI_RSA_PUBLIC_KEY")]
    pub key: String,

    /// Write the config document to this file (.yaml or .json).
    #[arg(long)]
    pub out_file: Option<PathBuf>,

    /// Print the config document as well as the key.
    #[arg(long)]
    pub show_resource: bool,

    /// Overwrite an existing out-file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the decrypt command.
#[derive(Parser, Debug, Clone)]
pub struct DecryptArgs {
    /// Path to the PKCS#1 RSA private key.
    #[arg(long)]
    pub key: PathBuf,

    /// File or directory holding API key documents.
    pub path: PathBuf,
}

/// Arguments for the rotate command.
#[derive(Parser, Debug, Clone)]
pub struct RotateArgs {
    /// Path to the PKCS#1 RSA private key the secrets are currently
    /// encrypted under.
    #[arg(long)]
    pub old_key: PathBuf,

    /// Path to the RSA public key to re-encrypt under, or literal PEM text.
    #[arg(long)]
    pub new_key: String,

    /// File or directory holding API key documents.
    pub path: PathBuf,
}
