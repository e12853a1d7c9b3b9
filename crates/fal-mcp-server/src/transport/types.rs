//! Transport layer types
//!
//! JSON-RPC messages shared by the stdio and SSE transports, plus frame
//! decoding that recovers the request id from malformed frames where it can.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{JSONRPC_INVALID_REQUEST, JSONRPC_PARSE_ERROR, JSONRPC_VERSION};

/// MCP request payload (JSON-RPC format)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version, must be "2.0" when present
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// JSON-RPC method
    pub method: String,
    /// Request parameters
    #[serde(default)]
    pub params: Option<Value>,
    /// Request ID; absent for notifications
    #[serde(default)]
    pub id: Option<Value>,
}

impl McpRequest {
    /// Create a request with an id
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            method: method.into(),
            params,
            id: Some(id.into()),
        }
    }

    /// Whether this is a notification (no response expected)
    pub fn is_notification(&self) -> bool {
        self.id.as_ref().is_none_or(Value::is_null)
    }

    /// Decode one JSON-RPC frame
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] carrying the request id when one could be
    /// recovered from the frame, so the caller can answer with a protocol
    /// error instead of dropping the channel.
    pub fn decode(frame: &str) -> Result<Self, FrameError> {
        let value: Value = serde_json::from_str(frame).map_err(|e| FrameError {
            id: None,
            code: JSONRPC_PARSE_ERROR,
            message: format!("Parse error: {e}"),
        })?;

        let id = recover_id(&value);
        let invalid = |message: String| FrameError {
            id: id.clone(),
            code: JSONRPC_INVALID_REQUEST,
            message,
        };

        if !value.is_object() {
            return Err(invalid("Invalid request: expected a JSON object".to_string()));
        }

        let request: Self = serde_json::from_value(value)
            .map_err(|e| invalid(format!("Invalid request: {e}")))?;

        if let Some(version) = &request.jsonrpc
            && version != JSONRPC_VERSION
        {
            return Err(invalid(format!(
                "Invalid request: unsupported jsonrpc version '{version}'"
            )));
        }

        Ok(request)
    }
}

/// Id of a frame if it is a usable JSON-RPC id (string or number)
fn recover_id(value: &Value) -> Option<Value> {
    value
        .get("id")
        .filter(|id| id.is_string() || id.is_number())
        .cloned()
}

/// A frame that could not be decoded into a request
#[derive(Debug, Clone, PartialEq)]
pub struct FrameError {
    /// Request id, if one could be recovered
    pub id: Option<Value>,
    /// JSON-RPC error code to answer with
    pub code: i32,
    /// What was wrong
    pub message: String,
}

impl FrameError {
    /// Protocol error response for this frame
    pub fn to_response(&self) -> McpResponse {
        McpResponse::error(self.id.clone(), self.code, self.message.clone())
    }
}

/// MCP response payload (JSON-RPC format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    /// JSON-RPC version
    pub jsonrpc: String,
    /// Response result (if successful)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (if failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    /// Request ID
    pub id: Option<Value>,
}

/// MCP error response (JSON-RPC format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self::error_with_data(id, code, message, None)
    }

    /// Create an error response with structured details
    pub fn error_with_data(
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data,
            }),
            id,
        }
    }

    /// Serialize as a single-line frame
    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
