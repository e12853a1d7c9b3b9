//! MCP Transport Layer
//!
//! Transport implementations for the MCP protocol.
//!
//! ## Available Transports
//!
//! | Transport | Description | Use Case |
//! |-----------|-------------|----------|
//! | [`stdio`] | Newline-delimited JSON-RPC on stdin/stdout | CLI tools, IDE integrations |
//! | [`sse`] | HTTP server with Server-Sent Events | Network clients, many sessions |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fal_mcp_server::transport::{SseTransport, TransportConfig, serve_stdio};
//!
//! // Stdio transport
//! serve_stdio(&server, DEFAULT_MAX_MESSAGE_BYTES).await?;
//!
//! // SSE transport
//! let sse = SseTransport::new(TransportConfig::sse(8000), Arc::new(server));
//! sse.start().await?;
//! ```

pub mod config;
pub mod sse;
pub mod stdio;
pub mod types;

// Re-export transport types
pub use config::TransportConfig;
pub use sse::{SseState, SseTransport};
pub use stdio::{serve_io, serve_stdio};
pub use types::{FrameError, McpError, McpRequest, McpResponse};

// Re-export TransportMode from infrastructure config (single source of truth)
pub use fal_mcp_infrastructure::config::TransportMode;
