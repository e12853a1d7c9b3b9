//! Value objects shared by the registry, dispatcher and transports

pub mod arguments;
pub mod request;
pub mod schema;

pub use arguments::ToolArguments;
pub use request::{FailureKind, RequestId, ToolFailure, ToolOutcome, ToolRequest, ToolResponse};
pub use schema::{ParamSpec, ParamType, ToolDescriptor, ToolSchema};
