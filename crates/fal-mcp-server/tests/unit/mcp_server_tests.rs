//! Tests for MCP method handling

use fal_mcp_server::constants::{
    DEFAULT_PROTOCOL_VERSION, JSONRPC_HANDLER_ERROR, JSONRPC_INVALID_PARAMS,
    JSONRPC_METHOD_NOT_FOUND, SERVER_NAME,
};
use fal_mcp_domain::value_objects::{RequestId, ToolResponse};
use fal_mcp_server::mcp_server::tool_response_to_mcp;
use fal_mcp_server::transport::{McpRequest, McpResponse};
use serde_json::{Value, json};

use crate::test_utils::test_fixtures::test_server;

async fn call(method: &str, params: Option<Value>) -> McpResponse {
    test_server()
        .handle_message(McpRequest::new(1, method, params))
        .await
        .expect("requests with an id get a response")
}

#[tokio::test]
async fn test_initialize_echoes_supported_version() {
    let response = call("initialize", Some(json!({ "protocolVersion": "2025-03-26" }))).await;

    let result = response.result.expect("success");
    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    assert!(result["instructions"].as_str().is_some());
}

#[tokio::test]
async fn test_initialize_falls_back_for_unknown_version() {
    let response = call("initialize", Some(json!({ "protocolVersion": "1999-01-01" }))).await;

    let result = response.result.expect("success");
    assert_eq!(result["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
}

#[tokio::test]
async fn test_ping() {
    let response = call("ping", None).await;
    assert_eq!(response.result, Some(json!({})));
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn test_tools_list_describes_every_tool() {
    let response = call("tools/list", None).await;

    let result = response.result.expect("success");
    let tools = result["tools"].as_array().expect("tools array");
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["echo", "sleep", "fail", "boom"]);

    let echo = &tools[0];
    assert_eq!(echo["inputSchema"]["type"], "object");
    assert_eq!(echo["inputSchema"]["required"], json!(["text"]));
    assert_eq!(echo["inputSchema"]["properties"]["times"]["default"], 1);
}

#[tokio::test]
async fn test_tools_call_success() {
    let response = call(
        "tools/call",
        Some(json!({ "name": "echo", "arguments": { "text": "hey" } })),
    )
    .await;

    let result = response.result.expect("success");
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "hey");
    assert_eq!(result["structuredContent"]["result"], "hey");
}

#[tokio::test]
async fn test_tools_call_without_arguments() {
    let response = call("tools/call", Some(json!({ "name": "fail" }))).await;

    let error = response.error.expect("handler error");
    assert_eq!(error.code, JSONRPC_HANDLER_ERROR);
}

#[tokio::test]
async fn test_tools_call_unknown_tool() {
    let response = call("tools/call", Some(json!({ "name": "nope", "arguments": {} }))).await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_INVALID_PARAMS);
    assert_eq!(error.message, "Unknown tool: nope");
    let data = error.data.expect("failure details");
    assert_eq!(data["kind"], "ToolNotFound");
}

#[tokio::test]
async fn test_tools_call_invalid_arguments() {
    let response = call(
        "tools/call",
        Some(json!({ "name": "echo", "arguments": { "times": 1 } })),
    )
    .await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_INVALID_PARAMS);
    let data = error.data.expect("failure details");
    assert_eq!(data["kind"], "InvalidArguments");
    assert_eq!(data["parameter"], "text");
}

#[tokio::test]
async fn test_tools_call_handler_error_category() {
    let response = call("tools/call", Some(json!({ "name": "fail", "arguments": {} }))).await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_HANDLER_ERROR);
    assert_eq!(error.message, "bad gateway");
    let data = error.data.expect("failure details");
    assert_eq!(data["kind"], "HandlerError");
    assert_eq!(data["category"], "upstream");
}

#[tokio::test]
async fn test_tools_call_missing_name() {
    let response = call("tools/call", Some(json!({ "arguments": {} }))).await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_INVALID_PARAMS);
}

#[tokio::test]
async fn test_tools_call_missing_params() {
    let response = call("tools/call", None).await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_INVALID_PARAMS);
}

#[tokio::test]
async fn test_tools_call_non_object_arguments() {
    let response = call("tools/call", Some(json!({ "name": "echo", "arguments": [1, 2] }))).await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_INVALID_PARAMS);
}

#[tokio::test]
async fn test_unknown_method() {
    let response = call("resources/list", None).await;

    let error = response.error.expect("error");
    assert_eq!(error.code, JSONRPC_METHOD_NOT_FOUND);
    assert_eq!(error.message, "Unknown method: resources/list");
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let server = test_server();

    let notification =
        McpRequest::decode(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .expect("valid frame");
    assert!(server.handle_message(notification).await.is_none());

    // A null id is treated as a notification, even for tools/call
    let null_id = McpRequest::decode(
        r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"boom"},"id":null}"#,
    )
    .expect("valid frame");
    assert!(server.handle_message(null_id).await.is_none());
}

#[tokio::test]
async fn test_non_string_results_are_pretty_printed() {
    let response = tool_response_to_mcp(
        Some(json!(5)),
        ToolResponse::success(RequestId::new(json!(5)), json!({ "url": "https://cdn.test/a.png" })),
    );

    let result = response.result.expect("success");
    let text = result["content"][0]["text"].as_str().expect("text");
    assert!(text.contains("\"url\": \"https://cdn.test/a.png\""));
    assert_eq!(result["structuredContent"]["result"]["url"], "https://cdn.test/a.png");
}
