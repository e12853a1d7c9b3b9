//! Domain ports
//!
//! Traits implemented outside the domain: tool handlers (by the server
//! crate) and the fal.ai API client (by the infrastructure crate).

pub mod fal_api;
pub mod handler;

pub use fal_api::{FalApi, UploadFile};
pub use handler::{FnHandler, ToolHandler};
