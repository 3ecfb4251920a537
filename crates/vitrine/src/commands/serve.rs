//! `vitrine serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use vitrine_config::{CliSettings, Config};
use vitrine_server::{run_server, server_config_from_vitrine_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover vitrine.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    pub(crate) host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    /// Template directory (overrides config).
    #[arg(long)]
    pub(crate) views_dir: Option<PathBuf>,

    /// Enable verbose output (debug logging).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            views_dir: self.views_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Loaded configuration");

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content API: {}",
            config.prismic_resolved.endpoint
        ));

        let views = &config.views_resolved;
        if views.dir.is_dir() {
            output.info(&format!("Views directory: {}", views.dir.display()));
        } else {
            output.warning(&format!(
                "Views directory not found: {} (pages will fail to render)",
                views.dir.display()
            ));
        }

        match &views.static_dir {
            Some(dir) => output.info(&format!("Static files: {}", dir.display())),
            None => output.info("Static files: disabled"),
        }

        let server_config = server_config_from_vitrine_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
