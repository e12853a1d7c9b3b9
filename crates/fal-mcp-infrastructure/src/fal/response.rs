//! HTTP response handling
//!
//! Maps reqwest failures and fal.ai status codes onto handler error
//! categories.

use fal_mcp_domain::error::{HandlerError, HandlerResult};
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Longest slice of an upstream error body quoted back to the caller
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Map a transport-level reqwest failure to a handler error
pub fn request_error(context: &str, error: &reqwest::Error) -> HandlerError {
    if error.is_timeout() {
        HandlerError::timeout(format!("{context}: request timed out"))
    } else if error.is_connect() {
        HandlerError::network(format!("{context}: connection failed: {error}"))
    } else {
        HandlerError::network(format!("{context}: HTTP request failed: {error}"))
    }
}

/// Map an error status and body to a handler error
pub fn status_error(context: &str, status: StatusCode, body: &str) -> HandlerError {
    let details: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HandlerError::auth(format!(
            "{context}: authentication failed ({code}): {details}"
        )),
        _ => HandlerError::upstream(format!("{context}: request failed ({code}): {details}")),
    }
}

/// Check response status and parse the JSON body
///
/// An empty success body parses as `null`.
pub async fn check_and_parse(response: Response, context: &str) -> HandlerResult<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| request_error(context, &e))?;

    if !status.is_success() {
        return Err(status_error(context, status, &body));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|e| HandlerError::upstream(format!("{context}: response parse failed: {e}")))
}
