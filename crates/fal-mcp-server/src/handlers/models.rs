//! Model catalogue tool handlers
//!
//! `list_models`, `search_models` and `model_schema`. These endpoints are
//! public, so they work without `FAL_KEY`.

use std::sync::Arc;

use async_trait::async_trait;
use fal_mcp_domain::error::{HandlerResult, Result};
use fal_mcp_domain::ports::{FalApi, ToolHandler};
use fal_mcp_domain::value_objects::{
    ParamSpec, ParamType, ToolArguments, ToolDescriptor, ToolSchema,
};
use serde_json::Value;

use crate::args::{ListModelsArgs, ModelSchemaArgs, SearchModelsArgs, validate_args};
use crate::tools::ToolRegistry;

/// Handler for the list_models tool
pub struct ListModelsHandler {
    api: Arc<dyn FalApi>,
}

impl ListModelsHandler {
    /// Create a new list_models handler
    pub fn new(api: Arc<dyn FalApi>) -> Self {
        Self { api }
    }

    /// Tool descriptor
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "list_models",
            "List available models on fal.ai, one page at a time",
            ToolSchema::new()
                .param(ParamSpec::optional(
                    "page",
                    ParamType::Integer,
                    "Page number (1-based)",
                ))
                .param(ParamSpec::optional(
                    "total",
                    ParamType::Integer,
                    "Number of models per page",
                )),
        )
    }
}

#[async_trait]
impl ToolHandler for ListModelsHandler {
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        let args: ListModelsArgs = arguments.parse()?;
        validate_args(&args)?;
        self.api.list_models(args.page, args.total).await
    }
}

/// Handler for the search_models tool
pub struct SearchModelsHandler {
    api: Arc<dyn FalApi>,
}

impl SearchModelsHandler {
    /// Create a new search_models handler
    pub fn new(api: Arc<dyn FalApi>) -> Self {
        Self { api }
    }

    /// Tool descriptor
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "search_models",
            "Search fal.ai models by keywords",
            ToolSchema::new().param(ParamSpec::required(
                "keywords",
                ParamType::String,
                "Search keywords, e.g. 'text to image'",
            )),
        )
    }
}

#[async_trait]
impl ToolHandler for SearchModelsHandler {
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        let mut args: SearchModelsArgs = arguments.parse()?;
        args.keywords = args.keywords.trim().to_string();
        validate_args(&args)?;
        self.api.search_models(&args.keywords).await
    }
}

/// Handler for the model_schema tool
pub struct ModelSchemaHandler {
    api: Arc<dyn FalApi>,
}

impl ModelSchemaHandler {
    /// Create a new model_schema handler
    pub fn new(api: Arc<dyn FalApi>) -> Self {
        Self { api }
    }

    /// Tool descriptor
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "model_schema",
            "Get the OpenAPI schema (inputs and outputs) of a fal.ai model",
            ToolSchema::new().param(ParamSpec::required(
                "model_id",
                ParamType::String,
                "Model endpoint id, e.g. 'fal-ai/flux/dev'",
            )),
        )
    }
}

#[async_trait]
impl ToolHandler for ModelSchemaHandler {
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        let args: ModelSchemaArgs = arguments.parse()?;
        validate_args(&args)?;
        self.api.model_schema(args.model_id.trim()).await
    }
}

/// Register `list_models`, `search_models` and `model_schema`
pub fn register_model_tools(registry: &mut ToolRegistry, api: &Arc<dyn FalApi>) -> Result<()> {
    registry.register(
        ListModelsHandler::descriptor(),
        Arc::new(ListModelsHandler::new(Arc::clone(api))),
    )?;
    registry.register(
        SearchModelsHandler::descriptor(),
        Arc::new(SearchModelsHandler::new(Arc::clone(api))),
    )?;
    registry.register(
        ModelSchemaHandler::descriptor(),
        Arc::new(ModelSchemaHandler::new(Arc::clone(api))),
    )?;
    Ok(())
}
