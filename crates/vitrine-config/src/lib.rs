//! Configuration management for Vitrine.
//!
//! Parses `vitrine.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Without a config
//! file, the content API settings come from `PRISMIC_ENDPOINT` and
//! `PRISMIC_ACCESS_TOKEN`.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `prismic.endpoint`
//! - `prismic.access_token`
//!
//! Path fields (`views.dir`, `views.static_dir`) also expand a leading `~`.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override views directory.
    pub views_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vitrine.toml";

/// Environment variable holding the content API endpoint.
pub const ENDPOINT_VAR: &str = "PRISMIC_ENDPOINT";

/// Environment variable holding the content API access token.
pub const ACCESS_TOKEN_VAR: &str = "PRISMIC_ACCESS_TOKEN";

/// Default content API timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content API configuration (values may reference env vars).
    prismic: PrismicConfigRaw,
    /// Template configuration (paths are relative strings from TOML).
    views: ViewsConfigRaw,

    /// Resolved content API configuration (set after loading).
    #[serde(skip)]
    pub prismic_resolved: PrismicConfig,
    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub views_resolved: ViewsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Raw content API configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct PrismicConfigRaw {
    endpoint: String,
    access_token: String,
    timeout_secs: Option<u64>,
}

impl Default for PrismicConfigRaw {
    fn default() -> Self {
        Self {
            endpoint: format!("${{{ENDPOINT_VAR}}}"),
            access_token: format!("${{{ACCESS_TOKEN_VAR}}}"),
            timeout_secs: None,
        }
    }
}

/// Resolved content API configuration.
#[derive(Debug, Clone)]
pub struct PrismicConfig {
    /// API root URL.
    pub endpoint: String,
    /// Repository access token.
    pub access_token: String,
    /// Timeout for each outbound request.
    pub timeout: Duration,
}

impl Default for PrismicConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Raw template configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ViewsConfigRaw {
    dir: Option<String>,
    static_dir: Option<String>,
}

/// Resolved template configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ViewsConfig {
    /// Directory holding page templates.
    pub dir: PathBuf,
    /// Directory served under `/static` (`None` disables static files).
    pub static_dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`prismic.access_token`").
        field: String,
        /// Error message (e.g., "${`PRISMIC_ACCESS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vitrine.toml` in current directory and parents,
    /// falling back to defaults plus the `PRISMIC_*` environment variables.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// a referenced environment variable is unset, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path, &env_lookup)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered, &env_lookup)?
        } else {
            let mut config = Self::default_with_cwd();
            config.finish(&std::env::current_dir().unwrap_or_default(), &env_lookup)?;
            config
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(views_dir) = &settings.views_dir {
            self.views_resolved.dir.clone_from(views_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            prismic: PrismicConfigRaw::default(),
            views: ViewsConfigRaw::default(),
            prismic_resolved: PrismicConfig::default(),
            views_resolved: ViewsConfig {
                dir: base.join("views"),
                static_dir: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(
        path: &Path,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.finish(config_dir, lookup)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variables, then resolve paths against `base`.
    fn finish(
        &mut self,
        base: &Path,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        self.expand_env_vars(lookup)?;
        self.resolve_paths(base);
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_prismic()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate content API configuration.
    fn validate_prismic(&self) -> Result<(), ConfigError> {
        let prismic = &self.prismic_resolved;
        require_non_empty(&prismic.endpoint, "prismic.endpoint")?;
        require_http_url(&prismic.endpoint, "prismic.endpoint")?;
        require_non_empty(&prismic.access_token, "prismic.access_token")?;

        if prismic.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "prismic.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(
        &mut self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env_with(&self.server.host, "server.host", lookup)?;

        self.prismic_resolved = PrismicConfig {
            endpoint: expand::expand_env_with(&self.prismic.endpoint, "prismic.endpoint", lookup)?,
            access_token: expand::expand_env_with(
                &self.prismic.access_token,
                "prismic.access_token",
                lookup,
            )?,
            timeout: Duration::from_secs(self.prismic.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: &str| config_dir.join(shellexpand::tilde(path).as_ref());

        self.views_resolved = ViewsConfig {
            dir: resolve(self.views.dir.as_deref().unwrap_or("views")),
            static_dir: self.views.static_dir.as_deref().map(resolve),
        };
    }
}

/// Look up a variable in the process environment.
fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}
