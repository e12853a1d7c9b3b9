//! Request/response value object tests

use fal_mcp_domain::value_objects::{FailureKind, RequestId, ToolFailure, ToolResponse};
use fal_mcp_domain::{Error, HandlerError, HandlerErrorKind};
use serde_json::json;

#[test]
fn test_failure_from_unknown_tool() {
    let failure = ToolFailure::from(Error::unknown_tool("nope"));
    assert_eq!(failure.kind, FailureKind::ToolNotFound);
    assert_eq!(failure.message, "Unknown tool: nope");
}

#[test]
fn test_failure_from_invalid_arguments_names_parameter() {
    let failure = ToolFailure::from(Error::invalid_arguments("model", "missing required parameter"));
    assert_eq!(failure.kind, FailureKind::InvalidArguments);
    assert_eq!(failure.parameter.as_deref(), Some("model"));
    assert!(failure.message.contains("model"));
}

#[test]
fn test_failure_from_handler_error_keeps_category() {
    let failure = ToolFailure::from(Error::from(HandlerError::missing_credential("no key")));
    assert_eq!(failure.kind, FailureKind::HandlerError);
    assert_eq!(failure.category, Some(HandlerErrorKind::MissingCredential));
    assert_eq!(failure.message, "no key");
}

#[test]
fn test_failure_serialization() {
    let failure = ToolFailure::handler(HandlerError::upstream("bad gateway"));
    let value = serde_json::to_value(&failure).expect("serialize");
    assert_eq!(
        value,
        json!({"kind": "HandlerError", "message": "bad gateway", "category": "upstream"})
    );
}

#[test]
fn test_response_helpers() {
    let ok = ToolResponse::success(RequestId::from(1), json!([]));
    assert!(ok.is_success());
    assert!(ok.failure_details().is_none());

    let failed = ToolResponse::failure(RequestId::from("a"), ToolFailure::tool_not_found("x"));
    assert!(!failed.is_success());
    assert_eq!(failed.id.to_string(), "a");
}
