//! QuickNotes CLI: entry point.
//!
//! # Commands
//!
//! - `quicknotes serve [--host H] [--port P]`: run the HTTP API
//! - `quicknotes status`: show provider configuration
//! - `quicknotes summarize (--text T | --file F) [--provider P]`: one-shot summary

mod serve;
mod status;
mod summarize;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// QuickNotes: study notes and quiz questions from any LLM provider
#[derive(Parser)]
#[command(name = "quicknotes", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides QUICKNOTES_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides QUICKNOTES_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Summarize text once and print the result as JSON
    Summarize {
        /// Text to summarize
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Provider to use instead of AI_PROVIDER
        #[arg(long)]
        provider: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs, "info");
            serve::run(host, port).await
        }
        Commands::Status => status::run(),
        Commands::Summarize {
            text,
            file,
            provider,
            logs,
        } => {
            init_logging(logs, "warn");
            summarize::run(text, file, provider).await
        }
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins over both defaults.
fn init_logging(verbose: bool, quiet_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(
                "quicknotes_server=debug,quicknotes_providers=debug,tower_http=debug,info",
            )
        } else {
            EnvFilter::new(quiet_level)
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_summarize_requires_input() {
        assert!(Cli::try_parse_from(["quicknotes", "summarize"]).is_err());
        let both = ["quicknotes", "summarize", "-t", "x", "-f", "notes.txt"];
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn test_serve_overrides() {
        let args = ["quicknotes", "serve", "--host", "0.0.0.0", "-p", "9000"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Serve { host, port, logs } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
                assert!(!logs);
            }
            _ => panic!("expected serve"),
        }
    }
}
