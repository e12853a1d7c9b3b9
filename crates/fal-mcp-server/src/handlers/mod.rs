//! Tool handlers for MCP protocol
//!
//! Three groups, each with its own registration function:
//!
//! | Group | Tools |
//! |-------|-------|
//! | [`models`] | `list_models`, `search_models`, `model_schema` |
//! | [`generate`] | `generate`, `get_result`, `get_status`, `cancel_request` |
//! | [`storage`] | `upload_file` |

pub mod generate;
pub mod models;
pub mod storage;

use std::sync::Arc;

use fal_mcp_domain::error::Result;
use fal_mcp_domain::ports::FalApi;

pub use generate::{
    GenerateHandler, PollSettings, QueueAction, QueueUrlHandler, register_generation_tools,
};
pub use models::{
    ListModelsHandler, ModelSchemaHandler, SearchModelsHandler, register_model_tools,
};
pub use storage::{UploadFileHandler, register_storage_tools};

use crate::tools::ToolRegistry;

/// Register every fal.ai tool group
pub fn register_fal_tools(
    registry: &mut ToolRegistry,
    api: &Arc<dyn FalApi>,
    poll: PollSettings,
) -> Result<()> {
    register_model_tools(registry, api)?;
    register_generation_tools(registry, api, poll)?;
    register_storage_tools(registry, api)
}
