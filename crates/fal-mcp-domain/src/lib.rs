//! # fal.ai MCP Server - Domain
//!
//! Core types of the tool-hosting server, free of transport and HTTP
//! concerns:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | [`Error`](error::Error), [`HandlerError`](error::HandlerError) and their categories |
//! | [`value_objects`] | Tool schemas, validated arguments, requests and responses |
//! | [`ports`] | [`ToolHandler`](ports::ToolHandler) and [`FalApi`](ports::FalApi) |
//! | [`constants`] | Names shared across layers |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, HandlerError, HandlerErrorKind, HandlerResult, Result};
