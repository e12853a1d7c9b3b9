//! Server-specific constants
//!
//! Contains constants specific to the MCP server implementation,
//! including JSON-RPC error codes and protocol-related values.

// ============================================================================
// JSON-RPC ERROR CODES (Standard)
// ============================================================================

/// JSON-RPC Method not found error code
pub const JSONRPC_METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC Parse error code
pub const JSONRPC_PARSE_ERROR: i32 = -32700;

/// JSON-RPC Invalid request error code
pub const JSONRPC_INVALID_REQUEST: i32 = -32600;

/// JSON-RPC Invalid params error code
pub const JSONRPC_INVALID_PARAMS: i32 = -32602;

/// Server-defined error code for a failing tool handler
pub const JSONRPC_HANDLER_ERROR: i32 = -32000;

/// JSON-RPC version string
pub const JSONRPC_VERSION: &str = "2.0";

// ============================================================================
// MCP PROTOCOL
// ============================================================================

/// Protocol version answered when the client asks for one we do not speak
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Protocol versions echoed back during `initialize`
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "fal.ai MCP Server";

// ============================================================================
// SSE TRANSPORT
// ============================================================================

/// Route opening an event stream
pub const SSE_PATH: &str = "/sse";

/// Route receiving client messages
pub const MESSAGES_PATH: &str = "/messages";

/// SSE event carrying the per-session POST endpoint
pub const SSE_ENDPOINT_EVENT: &str = "endpoint";

/// SSE event carrying a JSON-RPC response
pub const SSE_MESSAGE_EVENT: &str = "message";
