//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::fal::FalConfig;
pub use super::logging::LoggingConfig;
pub use super::server::{ServerConfig, ServerOverrides, TransportMode};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server and transport configuration
    pub server: ServerConfig,
    /// fal.ai client configuration
    pub fal: FalConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}
