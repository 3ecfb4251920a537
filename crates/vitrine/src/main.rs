//! Vitrine CLI - server-rendered storefront.
//!
//! Provides commands for:
//! - `serve`: Start the storefront server

mod commands;
mod error;
mod output;

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// Environment file loaded from the working directory before configuration.
const ENV_FILENAME: &str = ".env";

/// Log directives used when `RUST_LOG` is unset: warnings plus the access log.
const DEFAULT_LOG_DIRECTIVES: &str = "warn,vitrine_server=info";

/// Log directives used with `--verbose`.
const VERBOSE_LOG_DIRECTIVES: &str = "info,vitrine=debug,vitrine_content=debug";

/// Vitrine - server-rendered storefront.
#[derive(Parser)]
#[command(name = "vitrine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the storefront server.
    Serve(ServeArgs),
}

/// Build the log filter: `--verbose` wins, then `RUST_LOG`, then the defaults.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_LOG_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
    }
}

/// Load `KEY=value` pairs from `path` into the process environment.
///
/// Variables already set are left untouched. Returns `false` when the file
/// does not exist.
fn load_env_file(path: &Path) -> Result<bool, CliError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Loaded before logging and the runtime start, so `.env` may set RUST_LOG.
    let env_file = load_env_file(Path::new(ENV_FILENAME));

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .init();

    let result = env_file.and_then(|loaded| {
        if loaded {
            tracing::debug!(path = ENV_FILENAME, "Loaded environment file");
        }
        match cli.command {
            Commands::Serve(args) => tokio::runtime::Runtime::new()
                .map_err(CliError::from)
                .and_then(|rt| rt.block_on(args.execute())),
        }
    });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
