//! Error handling types
//!
//! Two layers of failure live here:
//!
//! - [`Error`] covers everything the hosting core can report: startup
//!   configuration problems, registry misuse, argument validation and
//!   transport faults.
//! - [`HandlerError`] is what a tool handler returns. It always carries a
//!   [`HandlerErrorKind`] so clients can tell an auth problem from an
//!   upstream rejection without parsing the message.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for tool handlers
pub type HandlerResult<T> = std::result::Result<T, HandlerError>;

/// Main error type for the fal.ai MCP server
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error (bad flags, bad config file, bind failure)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A tool with this name is already registered
    #[error("Duplicate tool: {name}")]
    DuplicateTool {
        /// Name of the tool that was registered twice
        name: String,
    },

    /// No tool with this name is registered
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Name that failed to resolve
        name: String,
    },

    /// Registration attempted after the registry was closed
    #[error("Registry is closed; cannot register tool: {name}")]
    RegistryClosed {
        /// Name of the tool whose registration was refused
        name: String,
    },

    /// Arguments did not satisfy the tool's input schema
    #[error("Invalid argument '{parameter}': {message}")]
    InvalidArguments {
        /// Offending parameter name
        parameter: String,
        /// What was wrong with it
        message: String,
    },

    /// Transport-level failure (malformed frame, broken pipe)
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Failure raised by a tool handler
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Registry and validation error creation methods
impl Error {
    /// Create a duplicate tool error
    pub fn duplicate_tool<S: Into<String>>(name: S) -> Self {
        Self::DuplicateTool { name: name.into() }
    }

    /// Create an unknown tool error
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a registry closed error
    pub fn registry_closed<S: Into<String>>(name: S) -> Self {
        Self::RegistryClosed { name: name.into() }
    }

    /// Create an invalid arguments error naming the offending parameter
    pub fn invalid_arguments<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::InvalidArguments {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

// Transport error creation methods
impl Error {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with source
    pub fn transport_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error must abort startup
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Category of a handler failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerErrorKind {
    /// Upstream rejected the credential
    Auth,
    /// No credential was configured
    MissingCredential,
    /// Connection-level failure
    Network,
    /// The remote call did not finish in time
    Timeout,
    /// Arguments were well-typed but semantically invalid
    Validation,
    /// Upstream returned an error status or an unusable body
    Upstream,
    /// Anything else, including handler panics
    Internal,
}

impl HandlerErrorKind {
    /// Stable wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::MissingCredential => "missing_credential",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Validation => "validation",
            Self::Upstream => "upstream",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by a tool handler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    /// Failure category
    pub kind: HandlerErrorKind,
    /// Human-readable message
    pub message: String,
}

impl HandlerError {
    /// Create a handler error of the given kind
    pub fn new<S: Into<String>>(kind: HandlerErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Upstream rejected the credential
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::Auth, message)
    }

    /// No credential configured
    pub fn missing_credential<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::MissingCredential, message)
    }

    /// Connection-level failure
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::Network, message)
    }

    /// Remote call timed out
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::Timeout, message)
    }

    /// Semantically invalid arguments
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::Validation, message)
    }

    /// Upstream error status or unusable body
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::Upstream, message)
    }

    /// Internal failure
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(HandlerErrorKind::Internal, message)
    }
}
