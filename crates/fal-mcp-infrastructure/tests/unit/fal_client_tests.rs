//! fal.ai client tests against a wiremock server

use std::time::Duration;

use fal_mcp_domain::error::HandlerErrorKind;
use fal_mcp_domain::ports::{FalApi, UploadFile};
use fal_mcp_infrastructure::config::FalConfig;
use fal_mcp_infrastructure::fal::FalClient;
use fal_mcp_infrastructure::fal::client::join_url;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "test-id:test-secret";

fn config_for(server: &MockServer, api_key: Option<&str>) -> FalConfig {
    let base = server.uri();
    FalConfig {
        api_key: api_key.map(str::to_string),
        api_url: format!("{base}/api"),
        queue_url: format!("{base}/queue"),
        direct_url: format!("{base}/run"),
        rest_url: format!("{base}/rest"),
        ..FalConfig::default()
    }
}

fn client_for(server: &MockServer, api_key: Option<&str>) -> FalClient {
    FalClient::new(config_for(server, api_key)).unwrap()
}

#[test]
fn test_join_url_normalises_slashes() {
    assert_eq!(join_url("https://fal.run/", "/fal-ai/flux"), "https://fal.run/fal-ai/flux");
    assert_eq!(join_url("https://fal.run", "fal-ai/flux"), "https://fal.run/fal-ai/flux");
}

#[tokio::test]
async fn test_list_models_sends_paging_without_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("page", "2"))
        .and(query_param("total", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": ["a", "b"]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let models = client.list_models(Some(2), Some(5)).await.unwrap();

    assert!(!client.has_credential());
    assert_eq!(models, json!({"items": ["a", "b"]}));
}

#[tokio::test]
async fn test_search_and_schema_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("keywords", "flux dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/openapi/queue/openapi.json"))
        .and(query_param("endpoint_id", "fal-ai/flux/dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"openapi": "3.0.0"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));

    assert_eq!(
        client.search_models("flux dev").await.unwrap(),
        json!({"items": []})
    );
    assert_eq!(
        client.model_schema("fal-ai/flux/dev").await.unwrap()["openapi"],
        "3.0.0"
    );
}

#[tokio::test]
async fn test_run_posts_parameters_with_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run/fal-ai/flux/dev"))
        .and(header("Authorization", "Key test-id:test-secret"))
        .and(body_json(json!({"prompt": "a cat"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"images": [{"url": "https://cdn/x.png"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let output = client
        .run("fal-ai/flux/dev", &json!({"prompt": "a cat"}))
        .await
        .unwrap();

    assert_eq!(output["images"][0]["url"], "https://cdn/x.png");
}

#[tokio::test]
async fn test_run_without_credential_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.run("fal-ai/flux/dev", &json!({})).await.unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::MissingCredential);
    assert_eq!(err.message, "FAL_KEY environment variable not set");
}

#[tokio::test]
async fn test_submit_goes_to_queue() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/queue/fal-ai/flux/dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-1",
            "status_url": "https://queue/status",
            "response_url": "https://queue/response",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let submitted = client
        .submit("fal-ai/flux/dev", &json!({"prompt": "x"}))
        .await
        .unwrap();

    assert_eq!(submitted["request_id"], "req-1");
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue/requests/req-1/status"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let err = client
        .fetch(&format!("{}/queue/requests/req-1/status", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::Auth);
    assert!(err.message.contains("401"));
    assert!(err.message.contains("bad key"));
}

#[tokio::test]
async fn test_server_error_maps_to_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let err = client.run("fal-ai/flux/dev", &json!({})).await.unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::Upstream);
    assert!(err.message.contains("502"));
}

#[tokio::test]
async fn test_invalid_json_maps_to_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.list_models(None, None).await.unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::Upstream);
}

#[tokio::test]
async fn test_cancel_with_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/queue/requests/req-1/cancel"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let result = client
        .cancel(&format!("{}/queue/requests/req-1/cancel", server.uri()))
        .await
        .unwrap();

    assert!(result.is_null());
}

#[tokio::test]
async fn test_slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let client = FalClient::with_http_client(config_for(&server, None), http_client);
    let err = client.list_models(None, None).await.unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::Timeout);
}

#[tokio::test]
async fn test_refused_connection_maps_to_network() {
    let config = FalConfig {
        api_url: "http://127.0.0.1:1".to_string(),
        ..FalConfig::default()
    };
    let client = FalClient::new(config).unwrap();

    let err = client.list_models(None, None).await.unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::Network);
}

#[tokio::test]
async fn test_upload_initiates_then_puts_bytes() {
    let server = MockServer::start().await;
    let upload_url = format!("{}/upload/abc", server.uri());
    Mock::given(method("POST"))
        .and(path("/rest/storage/upload/initiate"))
        .and(query_param("storage_type", "fal-cdn-v3"))
        .and(header("Authorization", "Key test-id:test-secret"))
        .and(body_json(json!({
            "file_name": "cat.png",
            "content_type": "image/png",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "upload_url": upload_url,
            "file_url": "https://cdn.fal.media/cat.png",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/upload/abc"))
        .and(header("Content-Type", "image/png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let uploaded = client
        .upload(UploadFile {
            file_name: "cat.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3, 4],
        })
        .await
        .unwrap();

    assert_eq!(
        uploaded,
        json!({
            "file_url": "https://cdn.fal.media/cat.png",
            "file_name": "cat.png",
            "content_type": "image/png",
            "size": 4,
        })
    );
}

#[tokio::test]
async fn test_upload_rejects_incomplete_initiate_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file_url": "x"})))
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_KEY));
    let err = client
        .upload(UploadFile {
            file_name: "a.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: Vec::new(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, HandlerErrorKind::Upstream);
    assert!(err.message.contains("upload_url"));
}
