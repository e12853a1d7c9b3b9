//! End-to-end: stdio frames through the real fal.ai client to a mock API

use std::sync::Arc;

use fal_mcp_domain::ports::FalApi;
use fal_mcp_infrastructure::config::FalConfig;
use fal_mcp_infrastructure::constants::DEFAULT_MAX_MESSAGE_BYTES;
use fal_mcp_infrastructure::fal::FalClient;
use fal_mcp_server::init::create_mcp_server;
use fal_mcp_server::transport::{McpResponse, serve_io};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::test_fixtures::fast_polling;

fn client_for(server: &MockServer, api_key: Option<&str>) -> Arc<dyn FalApi> {
    let config = FalConfig {
        api_key: api_key.map(str::to_string),
        api_url: format!("{}/api", server.uri()),
        queue_url: format!("{}/queue", server.uri()),
        direct_url: format!("{}/run", server.uri()),
        rest_url: format!("{}/rest", server.uri()),
        ..FalConfig::default()
    };
    Arc::new(FalClient::new(config).expect("client builds"))
}

async fn exchange(api: &Arc<dyn FalApi>, input: &str) -> Vec<McpResponse> {
    let server = create_mcp_server(api, fast_polling()).expect("tools register");
    let mut output = Vec::new();
    serve_io(&server, input.as_bytes(), &mut output, DEFAULT_MAX_MESSAGE_BYTES)
        .await
        .expect("clean end of input");

    String::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("JSON-RPC response"))
        .collect()
}

#[tokio::test]
async fn test_list_models_end_to_end() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "fal-ai/flux/dev", "title": "FLUX.1 [dev]" }],
            "has_more": false
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let api = client_for(&mock, None);
    let frame = json!({
        "jsonrpc": "2.0",
        "method": "tools/call",
        "params": { "name": "list_models", "arguments": { "page": 1 } },
        "id": 1
    });
    let responses = exchange(&api, &format!("{frame}\n")).await;

    assert_eq!(responses.len(), 1);
    let result = responses[0].result.as_ref().expect("success");
    assert_eq!(result["isError"], false);
    assert_eq!(
        result["structuredContent"]["result"]["items"][0]["id"],
        "fal-ai/flux/dev"
    );
}

#[tokio::test]
async fn test_upstream_rejection_end_to_end() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run/fal-ai/flux/dev"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(1)
        .mount(&mock)
        .await;

    let api = client_for(&mock, Some("bad-id:bad-secret"));
    let frame = json!({
        "jsonrpc": "2.0",
        "method": "tools/call",
        "params": {
            "name": "generate",
            "arguments": { "model": "fal-ai/flux/dev", "parameters": { "prompt": "x" } }
        },
        "id": 2
    });
    let responses = exchange(&api, &format!("{frame}\n")).await;

    let error = responses[0].error.as_ref().expect("handler error");
    assert_eq!(error.data.as_ref().expect("details")["category"], "auth");
}
