//! MCP Server Implementation
//!
//! JSON-RPC method handling shared by every transport: `initialize`,
//! `ping`, `tools/list`, `tools/call` and notifications. Tool calls go
//! through the [`Dispatcher`].

use std::sync::Arc;

use fal_mcp_domain::value_objects::{
    FailureKind, RequestId, ToolFailure, ToolOutcome, ToolRequest, ToolResponse,
};
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_PROTOCOL_VERSION, JSONRPC_HANDLER_ERROR, JSONRPC_INVALID_PARAMS,
    JSONRPC_METHOD_NOT_FOUND, SERVER_NAME, SUPPORTED_PROTOCOL_VERSIONS,
};
use crate::tools::Dispatcher;
use crate::transport::types::{McpRequest, McpResponse};

const INSTRUCTIONS: &str = "fal.ai MCP Server - Generative media models\n\n\
     Tools:\n\
     - list_models / search_models: Browse the fal.ai model catalogue\n\
     - model_schema: Fetch a model's OpenAPI input/output schema\n\
     - generate: Run a model directly or through the queue\n\
     - get_status / get_result / cancel_request: Manage queued jobs\n\
     - upload_file: Upload a local file to fal.ai storage\n";

/// Server identity reported during `initialize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
    /// Usage instructions for the client
    pub instructions: Option<String>,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Core MCP server implementation
///
/// Cheap to clone; every transport session shares the same dispatcher.
#[derive(Debug, Clone)]
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    info: Arc<ServerInfo>,
}

impl McpServer {
    /// Create a server around a dispatcher
    pub fn new(dispatcher: Dispatcher, info: ServerInfo) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            info: Arc::new(info),
        }
    }

    /// Server identity
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Tool dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one decoded message
    ///
    /// Returns `None` for notifications and anything else without an id.
    pub async fn handle_message(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let McpRequest {
            method, params, id, ..
        } = request;

        let response = match method.as_str() {
            "initialize" => self.handle_initialize(id, params.as_ref()),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, params).await,
            _ => McpResponse::error(
                id,
                JSONRPC_METHOD_NOT_FOUND,
                format!("Unknown method: {method}"),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<&Value>) -> McpResponse {
        let requested = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str);
        let protocol_version = requested
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        info!(
            requested = requested.unwrap_or("none"),
            negotiated = protocol_version,
            "Client initialized"
        );

        McpResponse::success(
            id,
            json!({
                "protocolVersion": protocol_version,
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": self.info.name,
                    "version": self.info.version
                },
                "instructions": self.info.instructions
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> McpResponse {
        let tools: Vec<Value> = self
            .dispatcher
            .registry()
            .list()
            .map(|descriptor| descriptor.to_discovery_json())
            .collect();

        McpResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> McpResponse {
        let (name, arguments) = match parse_tool_call_params(params) {
            Ok(parsed) => parsed,
            Err(message) => return McpResponse::error(id, JSONRPC_INVALID_PARAMS, message),
        };

        let request_id = RequestId::new(id.clone().unwrap_or(Value::Null));
        let response = self
            .dispatcher
            .handle(ToolRequest::new(request_id, name, arguments))
            .await;

        tool_response_to_mcp(id, response)
    }
}

/// Extract `name` and `arguments` from `tools/call` params
fn parse_tool_call_params(
    params: Option<Value>,
) -> Result<(String, Map<String, Value>), &'static str> {
    let Some(Value::Object(mut params)) = params else {
        return Err("Missing params for tools/call");
    };

    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        _ => return Err("Missing 'name' parameter for tools/call"),
    };

    let arguments = match params.remove("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments,
        Some(_) => return Err("'arguments' must be an object"),
    };

    Ok((name, arguments))
}

/// Convert a dispatcher response into a JSON-RPC response
pub fn tool_response_to_mcp(id: Option<Value>, response: ToolResponse) -> McpResponse {
    match response.outcome {
        ToolOutcome::Success(value) => McpResponse::success(id, tool_result_json(value)),
        ToolOutcome::Failure(failure) => tool_failure_to_mcp(id, &failure),
    }
}

/// MCP `CallToolResult` for a successful call
fn tool_result_json(value: Value) -> Value {
    let text = match &value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };

    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": { "result": value },
        "isError": false
    })
}

fn tool_failure_to_mcp(id: Option<Value>, failure: &ToolFailure) -> McpResponse {
    let code = match failure.kind {
        FailureKind::ToolNotFound | FailureKind::InvalidArguments => JSONRPC_INVALID_PARAMS,
        FailureKind::HandlerError => JSONRPC_HANDLER_ERROR,
    };
    let data = serde_json::to_value(failure).ok();
    McpResponse::error_with_data(id, code, failure.message.clone(), data)
}
