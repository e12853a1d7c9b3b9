//! # fal.ai MCP Server
//!
//! MCP protocol server exposing the fal.ai generative media API as tools.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fal_mcp_server::run;
//! use fal_mcp_infrastructure::config::ServerOverrides;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Default config sources (fal-mcp.toml, FAL_MCP__* and FAL_KEY)
//!     run(None, ServerOverrides::default()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ToolRegistry`](tools::ToolRegistry) | Name → descriptor + handler, closed before serving |
//! | [`Dispatcher`](tools::Dispatcher) | Validate, invoke, package; never fails |
//! | [`McpServer`] | JSON-RPC methods over the dispatcher |
//! | [`McpServerBuilder`] | Builder for server configuration |
//! | [`transport`] | Stdio and SSE transports |

// Allow Rust 2024 compatibility issues from Rocket's EventStream macro
#![allow(rust_2024_compatibility)]

pub mod args;
pub mod builder;
pub mod constants;
pub mod handlers;
pub mod init;
pub mod mcp_server;
pub mod session;
pub mod tools;
pub mod transport;

// Re-export core types for public API
pub use builder::McpServerBuilder;
pub use init::run;
pub use mcp_server::McpServer;
