//! HTTP server for the Vitrine storefront.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - Server-rendered storefront pages built from content API documents
//! - Static files from an optional assets directory under `/static`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::time::Duration;
//! use vitrine_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 3000,
//!         endpoint: "https://shop.cdn.prismic.io/api/v2".to_owned(),
//!         access_token: "token".to_owned(),
//!         timeout: Duration::from_secs(30),
//!         views_dir: PathBuf::from("views"),
//!         static_dir: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (vitrine-server)
//!                        │
//!                        ├─► Page routes ──► blocking pool
//!                        │       │
//!                        │       ├─► ContentApi (open, defaults, page fetches)
//!                        │       └─► Renderer (minijinja + helpers)
//!                        │
//!                        └─► Static files (tower-http, optional)
//! ```

mod app;
mod defaults;
mod error;
mod handlers;
mod middleware;
mod pages;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use state::AppState;
use vitrine_content::{ContentApi, PrismicClient};
use vitrine_render::Renderer;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content API endpoint.
    pub endpoint: String,
    /// Content API access token.
    pub access_token: String,
    /// Timeout for each content API request.
    pub timeout: Duration,
    /// Directory holding page templates.
    pub views_dir: PathBuf,
    /// Directory served under `/static` (`None` disables static files).
    pub static_dir: Option<PathBuf>,
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api: Arc<dyn ContentApi> = Arc::new(PrismicClient::with_timeout(
        &config.endpoint,
        &config.access_token,
        config.timeout,
    ));
    let renderer = Renderer::from_dir(&config.views_dir);

    let state = Arc::new(AppState::new(api, renderer)?);
    let app = app::create_router(state, config.static_dir.as_deref());

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        views = %config.views_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Vitrine config.
#[must_use]
pub fn server_config_from_vitrine_config(config: &vitrine_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        endpoint: config.prismic_resolved.endpoint.clone(),
        access_token: config.prismic_resolved.access_token.clone(),
        timeout: config.prismic_resolved.timeout,
        views_dir: config.views_resolved.dir.clone(),
        static_dir: config.views_resolved.static_dir.clone(),
    }
}
