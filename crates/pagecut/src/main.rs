//! pagecut CLI - Confluence page-tree tools.
//!
//! Provides commands for:
//! - `delete`: Recursively delete a page tree (children before parent)
//! - `copy`: Recursively copy a page tree to a destination space

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::{CopyArgs, DeleteArgs};
use output::Output;

/// pagecut - Confluence page-tree tools.
#[derive(Parser)]
#[command(name = "pagecut", version, about)]
struct Cli {
    /// Log level.
    #[arg(long, value_enum, default_value = "debug", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recursively delete a page tree.
    Delete(DeleteArgs),
    /// Recursively copy a page tree.
    Copy(CopyArgs),
}

/// Log level for the `--log-level` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Filter directive for this level, with noisy HTTP internals capped.
    fn filter(self) -> String {
        let level = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        format!("{level},ureq=warn,rustls=warn")
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level.filter()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Delete(args) => args.execute(),
        Commands::Copy(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_level_filter_caps_http_internals() {
        assert_eq!(LogLevel::Debug.filter(), "debug,ureq=warn,rustls=warn");
        assert_eq!(LogLevel::Error.filter(), "error,ureq=warn,rustls=warn");
    }

    #[test]
    fn test_cli_parses_delete_with_dry_run() {
        let cli = Cli::try_parse_from([
            "pagecut", "delete", "--src-id", "123", "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(matches!(cli.command, Commands::Delete(_)));
    }

    #[test]
    fn test_cli_parses_copy_with_destination() {
        let cli = Cli::try_parse_from([
            "pagecut",
            "copy",
            "--src-id",
            "123",
            "--dst-space",
            "ARCHIVE",
            "--log-level",
            "info",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(matches!(cli.command, Commands::Copy(_)));
    }
}
