//! Server and transport configuration types

use crate::constants::{
    DEFAULT_HEARTBEAT_SECS, DEFAULT_HOST, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_MESSAGE_BYTES,
    DEFAULT_PORT, DEFAULT_SESSION_QUEUE_CAPACITY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Transport the server speaks
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Newline-delimited JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Server-Sent Events over HTTP, many concurrent sessions
    Sse,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Sse => f.write_str("sse"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Transport to run
    pub transport: TransportMode,
    /// Bind address (SSE only)
    pub host: String,
    /// Bind port (SSE only)
    pub port: u16,
    /// Idle time after which an SSE session is torn down
    pub idle_timeout_secs: u64,
    /// Interval between keep-alive comments on an SSE stream; a failed
    /// write is how a dropped client is noticed
    pub heartbeat_secs: u64,
    /// Capacity of each session's outbound queue
    pub session_queue_capacity: usize,
    /// Largest accepted inbound message body
    pub max_message_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportMode::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            session_queue_capacity: DEFAULT_SESSION_QUEUE_CAPACITY,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl ServerConfig {
    /// Idle timeout as a [`Duration`]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Heartbeat interval as a [`Duration`]
    pub fn heartbeat(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }
}

/// Command-line overrides applied on top of every other source
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerOverrides {
    /// `--transport`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportMode>,
    /// `--host`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// `--port`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}
