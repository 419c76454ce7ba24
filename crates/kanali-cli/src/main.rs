//! kanalictl binary entrypoint.
//!
//! This is the main entry point for the `kanalictl` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kanali_cli::cli::{Cli, Commands, GenerateCommands};
use kanali_cli::commands::{DecryptCommand, GenerateApikeyCommand, RotateCommand};
use kanali_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), kanali_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Generate {
            command: GenerateCommands::Apikey(args),
        } => {
            GenerateApikeyCommand::execute(&mut stdout, &format, &args).await?;
        }
        Commands::Decrypt(args) => {
            DecryptCommand::execute(&mut stdout, &format, &args).await?;
        }
        Commands::Rotate(args) => {
            RotateCommand::execute(&mut stdout, &format, &args).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_decrypt_with_missing_key_fails() {
        let cli = Cli::parse_from([
            "kanalictl",
            "decrypt",
            "--key",
            "/nonexistent/key.pem",
            "/tmp",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_rotate_with_missing_keys_fails() {
        let cli = Cli::parse_from([
            "kanalictl",
            "rotate",
            "--old-key",
            "/nonexistent/old.pem",
            "--new-key",
            "/nonexistent/new.pub",
            "/tmp",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_generate_with_bad_name_fails() {
        let cli = Cli::parse_from([
            "kanalictl",
            "generate",
            "apikey",
            "--name",
            "Not Valid",
            "--key",
            "/nonexistent/key.pub",
        ]);
        let result = run(cli).await;
        assert!(result.is_err());
    }
}
