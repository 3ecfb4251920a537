//! CLI error types.

use vitrine_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load environment file: {0}")]
    Env(#[from] dotenvy::Error),

    #[error("{0}")]
    Server(String),
}
