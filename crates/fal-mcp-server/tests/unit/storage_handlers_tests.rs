//! Tests for the upload_file tool

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use fal_mcp_domain::error::HandlerErrorKind;
use fal_mcp_domain::value_objects::ToolOutcome;
use fal_mcp_server::handlers::storage::read_upload;
use serde_json::json;
use tempfile::TempDir;

use crate::test_utils::mock_fal::MockFalApi;
use crate::test_utils::test_fixtures::{fal_server, tool_request};

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(content).expect("write temp file");
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_upload_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "cat.png", b"\x89PNG fake");
    let api = Arc::new(MockFalApi::new());
    let server = fal_server(Arc::clone(&api));

    let response = server
        .dispatcher()
        .handle(tool_request(1, "upload_file", json!({ "path": path })))
        .await;

    let ToolOutcome::Success(value) = response.outcome else {
        panic!("Expected success");
    };
    assert_eq!(value["file_url"], "https://cdn.test/cat.png");

    let uploads = api.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "cat.png");
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].bytes, b"\x89PNG fake");
}

#[tokio::test]
async fn test_upload_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("missing.png");
    let api = Arc::new(MockFalApi::new());
    let server = fal_server(Arc::clone(&api));

    let response = server
        .dispatcher()
        .handle(tool_request(1, "upload_file", json!({ "path": path })))
        .await;

    let failure = response.failure_details().expect("should fail");
    assert_eq!(failure.category, Some(HandlerErrorKind::Validation));
    assert!(failure.message.starts_with("File not found"));
    assert!(api.uploads().is_empty());
}

#[tokio::test]
async fn test_upload_without_credential_does_not_read() {
    let api = Arc::new(MockFalApi::new().without_credential());
    let server = fal_server(Arc::clone(&api));

    let response = server
        .dispatcher()
        .handle(tool_request(1, "upload_file", json!({ "path": "/does/not/exist.png" })))
        .await;

    let failure = response.failure_details().expect("should fail");
    assert_eq!(failure.category, Some(HandlerErrorKind::MissingCredential));
}

#[tokio::test]
async fn test_read_upload_unknown_extension_is_octet_stream() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "blob.zzunknown", b"data");

    let file = read_upload(Path::new(&path)).await.expect("readable");

    assert_eq!(file.file_name, "blob.zzunknown");
    assert_eq!(file.content_type, "application/octet-stream");
}

#[tokio::test]
async fn test_read_upload_directory_is_rejected() {
    let dir = TempDir::new().expect("temp dir");

    let result = read_upload(dir.path()).await;

    let error = result.expect_err("directories are not files");
    assert_eq!(error.kind, HandlerErrorKind::Validation);
}
