//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! command-line overrides and default values.

use crate::config::{AppConfig, ServerOverrides};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use fal_mcp_domain::constants::FAL_KEY_ENV;
use fal_mcp_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Command-line overrides
    overrides: ServerOverrides,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            overrides: ServerOverrides::default(),
        }
    }

    /// Set the configuration file path
    ///
    /// Unlike the default search locations, an explicit path must exist.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Apply command-line overrides on top of every other source
    pub fn with_overrides(mut self, overrides: ServerOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else the first default location found)
    /// 3. Environment variables with prefix (e.g., `FAL_MCP__SERVER__PORT`)
    /// 4. `FAL_KEY`, mapped to `fal.api_key`
    /// 5. Command-line overrides
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = self.config_file()? {
            figment = figment.merge(Toml::file(&config_path));
            log_config_loaded(&config_path, true);
        }

        figment = figment
            .merge(Env::prefixed(&self.env_prefix).split(CONFIG_ENV_SEPARATOR))
            .merge(
                Env::raw()
                    .only(&[FAL_KEY_ENV])
                    .map(|_| CONFIG_API_KEY_PATH.into()),
            )
            .merge(Serialized::default("server", &self.overrides));

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Resolve the configuration file to read, if any
    ///
    /// An explicit path that does not exist is an error; otherwise the
    /// default locations are searched and a miss is not.
    pub fn config_file(&self) -> Result<Option<PathBuf>> {
        match &self.config_path {
            Some(path) if path.exists() => Ok(Some(path.clone())),
            Some(path) => {
                log_config_loaded(path, false);
                Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )))
            }
            None => Ok(Self::find_default_config_path()),
        }
    }

    /// Get the explicitly configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first default configuration file that exists
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_fal_config(config)?;
    validate_logging_config(config)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    let server = &config.server;
    if server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    server
        .host
        .parse::<IpAddr>()
        .config_context(format!("Invalid server host '{}'", server.host))?;
    if server.idle_timeout_secs == 0 {
        return Err(Error::configuration("Session idle timeout cannot be 0"));
    }
    if server.heartbeat_secs == 0 {
        return Err(Error::configuration("SSE heartbeat interval cannot be 0"));
    }
    if server.session_queue_capacity == 0 {
        return Err(Error::configuration("Session queue capacity cannot be 0"));
    }
    if server.max_message_bytes == 0 {
        return Err(Error::configuration("Maximum message size cannot be 0"));
    }
    Ok(())
}

fn validate_fal_config(config: &AppConfig) -> Result<()> {
    let fal = &config.fal;
    for (name, url) in [
        ("api_url", &fal.api_url),
        ("queue_url", &fal.queue_url),
        ("direct_url", &fal.direct_url),
        ("rest_url", &fal.rest_url),
    ] {
        if url.trim().is_empty() {
            return Err(Error::configuration(format!("fal.{name} cannot be empty")));
        }
        reqwest::Url::parse(url).config_context(format!("Invalid fal.{name} '{url}'"))?;
    }
    if fal.request_timeout_secs == 0 {
        return Err(Error::configuration("Request timeout cannot be 0"));
    }
    if fal.poll_interval_ms == 0 {
        return Err(Error::configuration("Poll interval cannot be 0"));
    }
    if fal.poll_timeout_secs == 0 {
        return Err(Error::configuration("Poll timeout cannot be 0"));
    }
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level).map(|_| ())
}
