//! MCP Tools Module
//!
//! - registry.rs - Tool registration and lookup
//! - dispatcher.rs - Validation, invocation and outcome packaging

pub mod dispatcher;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use registry::{RegisteredTool, ToolRegistry};
