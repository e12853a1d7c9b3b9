//! Configuration
//!
//! Layered configuration built with Figment. Sources, later overriding
//! earlier:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config` or `fal-mcp.toml` in the usual places)
//! 3. `FAL_MCP__SECTION__KEY` environment variables
//! 4. `FAL_KEY` (mapped to `fal.api_key`)
//! 5. Command-line overrides

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, FalConfig, LoggingConfig, ServerConfig, ServerOverrides, TransportMode,
};
