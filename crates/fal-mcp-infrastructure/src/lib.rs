//! # fal.ai MCP Server - Infrastructure Layer
//!
//! Cross-cutting technical concerns for the fal.ai MCP server:
//!
//! - [`config`]: layered configuration (defaults, TOML, environment, CLI)
//! - [`logging`]: tracing subscriber setup, stderr only
//! - [`fal`]: the reqwest-backed [`FalApi`](fal_mcp_domain::ports::FalApi) client
//! - [`error_ext`]: context helpers mapping foreign errors into the domain error

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod fal;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use fal::FalClient;
pub use logging::init_logging;
