//! Transport Configuration Module
//!
//! Configuration types and utilities for MCP server transports.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use fal_mcp_domain::error::Result;
use fal_mcp_infrastructure::config::{ServerConfig, TransportMode};
use fal_mcp_infrastructure::constants::{
    DEFAULT_HEARTBEAT_SECS, DEFAULT_HOST, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_MESSAGE_BYTES,
    DEFAULT_PORT, DEFAULT_SESSION_QUEUE_CAPACITY,
};
use fal_mcp_infrastructure::error_ext::ErrorContext;

/// Transport configuration for MCP server
///
/// The canonical `TransportMode` is defined in `fal_mcp_infrastructure::config`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Transport mode
    pub mode: TransportMode,
    /// SSE bind address
    pub host: String,
    /// SSE bind port
    pub port: u16,
    /// Idle time after which an SSE session is torn down
    pub idle_timeout: Duration,
    /// Interval between keep-alive comments on an SSE stream
    pub heartbeat: Duration,
    /// Capacity of each session's outbound queue
    pub session_queue_capacity: usize,
    /// Largest accepted inbound message body
    pub max_message_bytes: u64,
}

/// Returns default TransportConfig with Stdio mode
impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Stdio,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            heartbeat: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            session_queue_capacity: DEFAULT_SESSION_QUEUE_CAPACITY,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl TransportConfig {
    /// Create stdio transport config
    pub fn stdio() -> Self {
        Self::default()
    }

    /// Create SSE transport config bound to localhost
    pub fn sse(port: u16) -> Self {
        Self {
            mode: TransportMode::Sse,
            host: "127.0.0.1".to_string(),
            port,
            ..Self::default()
        }
    }

    /// Create transport config from server configuration
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            mode: config.transport,
            host: config.host.clone(),
            port: config.port,
            idle_timeout: config.idle_timeout(),
            heartbeat: config.heartbeat(),
            session_queue_capacity: config.session_queue_capacity,
            max_message_bytes: config.max_message_bytes,
        }
    }

    /// Socket address the SSE transport binds
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .config_context(format!("Invalid bind address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
