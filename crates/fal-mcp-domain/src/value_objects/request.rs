//! Tool invocation requests and responses
//!
//! These are transport-agnostic: a transport builds a [`ToolRequest`] from
//! whatever framing it speaks, the dispatcher turns it into a
//! [`ToolResponse`], and the same transport serialises that back.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, HandlerError, HandlerErrorKind};

/// Correlation id of a request (JSON-RPC `id`: string or number)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Value);

impl RequestId {
    /// Wrap a raw JSON id
    pub fn new(value: Value) -> Self {
        Self(value)
    }
}

impl From<Value> for RequestId {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// One tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    /// Correlation id
    pub id: RequestId,
    /// Name of the tool to invoke
    pub name: String,
    /// Raw, unvalidated arguments
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    /// Create a request
    pub fn new(id: impl Into<RequestId>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Failure kinds surfaced to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// No tool with the requested name
    ToolNotFound,
    /// Arguments violated the tool's schema
    InvalidArguments,
    /// The handler failed or panicked
    HandlerError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ToolNotFound => "ToolNotFound",
            Self::InvalidArguments => "InvalidArguments",
            Self::HandlerError => "HandlerError",
        };
        f.write_str(name)
    }
}

/// Structured failure of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    /// What went wrong, at the protocol level
    pub kind: FailureKind,
    /// Human-readable message
    pub message: String,
    /// Handler failure category, for [`FailureKind::HandlerError`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<HandlerErrorKind>,
    /// Offending parameter, for [`FailureKind::InvalidArguments`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ToolFailure {
    /// Failure for a name that did not resolve
    pub fn tool_not_found(name: &str) -> Self {
        Self {
            kind: FailureKind::ToolNotFound,
            message: format!("Unknown tool: {name}"),
            category: None,
            parameter: None,
        }
    }

    /// Failure for a schema violation
    pub fn invalid_arguments(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        let parameter = parameter.into();
        Self {
            kind: FailureKind::InvalidArguments,
            message: format!("Invalid argument '{parameter}': {}", message.into()),
            category: None,
            parameter: Some(parameter),
        }
    }

    /// Failure raised by a handler
    pub fn handler(error: HandlerError) -> Self {
        Self {
            kind: FailureKind::HandlerError,
            message: error.message,
            category: Some(error.kind),
            parameter: None,
        }
    }
}

impl From<Error> for ToolFailure {
    fn from(error: Error) -> Self {
        match error {
            Error::UnknownTool { name } => Self::tool_not_found(&name),
            Error::InvalidArguments { parameter, message } => {
                Self::invalid_arguments(parameter, message)
            }
            Error::Handler(e) => Self::handler(e),
            other => Self::handler(HandlerError::internal(other.to_string())),
        }
    }
}

/// Outcome of a tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Handler returned normally
    Success(Value),
    /// Resolution, validation or the handler failed
    Failure(ToolFailure),
}

/// Response correlated to a [`ToolRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    /// Id of the originating request
    pub id: RequestId,
    /// What happened
    pub outcome: ToolOutcome,
}

impl ToolResponse {
    /// Successful response
    pub fn success(id: RequestId, value: Value) -> Self {
        Self {
            id,
            outcome: ToolOutcome::Success(value),
        }
    }

    /// Failed response
    pub fn failure(id: RequestId, failure: ToolFailure) -> Self {
        Self {
            id,
            outcome: ToolOutcome::Failure(failure),
        }
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Success(_))
    }

    /// Failure details, if the call failed
    pub fn failure_details(&self) -> Option<&ToolFailure> {
        match &self.outcome {
            ToolOutcome::Failure(f) => Some(f),
            ToolOutcome::Success(_) => None,
        }
    }
}
