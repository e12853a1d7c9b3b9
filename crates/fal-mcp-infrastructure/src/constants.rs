//! Infrastructure layer constants
//!
//! Domain-level names (such as the credential variable) live in
//! `fal_mcp_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "fal-mcp.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "fal-mcp";

/// Environment variable prefix for configuration (`FAL_MCP__SERVER__PORT`)
pub const CONFIG_ENV_PREFIX: &str = "FAL_MCP__";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Config key the credential variable is mapped to
pub const CONFIG_API_KEY_PATH: &str = "fal.api_key";

// ============================================================================
// SERVER CONSTANTS
// ============================================================================

/// Default bind address for the SSE transport
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port for the SSE transport
pub const DEFAULT_PORT: u16 = 8000;

/// Default idle timeout of an SSE session (5 minutes)
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default interval between SSE keep-alive comments
pub const DEFAULT_HEARTBEAT_SECS: u64 = 5;

/// Default capacity of a session's outbound queue
pub const DEFAULT_SESSION_QUEUE_CAPACITY: usize = 64;

/// Default limit on a single inbound message body (10 MiB)
pub const DEFAULT_MAX_MESSAGE_BYTES: u64 = 10 * 1024 * 1024;

// ============================================================================
// FAL.AI CONSTANTS
// ============================================================================

/// Model catalogue API
pub const FAL_API_URL: &str = "https://fal.ai/api";

/// Queue submission API
pub const FAL_QUEUE_URL: &str = "https://queue.fal.run";

/// Synchronous run API
pub const FAL_DIRECT_URL: &str = "https://fal.run";

/// REST API (storage)
pub const FAL_REST_URL: &str = "https://rest.alpha.fal.ai";

/// Storage backend requested when initiating uploads
pub const FAL_STORAGE_TYPE: &str = "fal-cdn-v3";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default delay between queue status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default upper bound on waiting for a queued job
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 600;

/// User agent sent to fal.ai
pub const USER_AGENT: &str = concat!("fal-mcp/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "FAL_MCP_LOG";

/// Default log file prefix for rotated file output
pub const DEFAULT_LOG_FILE_PREFIX: &str = "fal-mcp";
