//! # fal.ai MCP Server
//!
//! A Model Context Protocol server exposing fal.ai generative media models
//! as tools: catalogue browsing, synchronous and queued generation, queue
//! management and file uploads.
//!
//! This crate is the public facade. It re-exports the layers and ships the
//! `fal-mcp` binary.
//!
//! ## Example
//!
//! ```no_run
//! use fal_mcp::infrastructure::config::ServerOverrides;
//!
//! # async fn start() -> fal_mcp::domain::Result<()> {
//! // Stdio transport, configuration from fal-mcp.toml and the environment
//! fal_mcp::run(None, ServerOverrides::default()).await
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Tool schemas, requests and responses, error taxonomy, ports
//! - `infrastructure` - Configuration, logging and the fal.ai HTTP client
//! - `server` - Tool registry, dispatcher, MCP protocol and transports

/// Domain layer - tool model and error types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use fal_mcp_domain::*;
}

/// Server layer - MCP protocol server, tools and transports
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use fal_mcp_server::*;
}

/// Infrastructure layer - config, logging and the fal.ai client
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use fal_mcp_infrastructure::*;
}

// Re-export main entry point at the crate root
pub use server::run;

// Re-export server types for convenience
pub use server::{McpServer, McpServerBuilder};
