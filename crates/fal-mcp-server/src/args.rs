//! Tool argument types for MCP server
//!
//! Typed views of the validated argument maps. The registry's schemas check
//! presence and JSON types; the `validator` rules here check content.

use fal_mcp_domain::error::{HandlerError, HandlerResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

/// Arguments for the list_models tool
#[derive(Debug, Deserialize, Validate)]
pub struct ListModelsArgs {
    /// Page number (1-based)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,
    /// Models per page
    #[validate(range(min = 1, message = "Total must be at least 1"))]
    pub total: Option<u32>,
}

/// Arguments for the search_models tool
#[derive(Debug, Deserialize, Validate)]
pub struct SearchModelsArgs {
    /// Free-text search keywords
    #[validate(length(min = 1, max = 200, message = "Keywords must be between 1 and 200 characters"))]
    pub keywords: String,
}

/// Arguments for the model_schema tool
#[derive(Debug, Deserialize, Validate)]
pub struct ModelSchemaArgs {
    /// Model endpoint id, e.g. `fal-ai/flux/dev`
    #[validate(custom(function = "validate_model_id", message = "Invalid model id"))]
    pub model_id: String,
}

/// Arguments for the generate tool
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateArgs {
    /// Model endpoint id, e.g. `fal-ai/flux/dev`
    #[validate(custom(function = "validate_model_id", message = "Invalid model id"))]
    pub model: String,
    /// Model input, passed through as the request body
    pub parameters: Map<String, Value>,
    /// Submit through the queue instead of running directly
    #[serde(default)]
    pub queue: bool,
    /// With `queue`, wait for the job and return its result
    #[serde(default)]
    pub wait: bool,
}

/// Arguments for the tools addressing a queued request by URL
#[derive(Debug, Deserialize, Validate)]
pub struct QueueUrlArgs {
    /// Status, response or cancel URL returned by the queue
    #[validate(url(message = "Must be an absolute URL"))]
    pub url: String,
}

/// Arguments for the upload_file tool
#[derive(Debug, Deserialize, Validate)]
pub struct UploadFileArgs {
    /// Local path of the file to upload
    #[validate(length(min = 1, message = "Path cannot be empty"))]
    pub path: String,
}

/// Run `validator` rules, mapping failures to a validation error
pub fn validate_args<T: Validate>(args: &T) -> HandlerResult<()> {
    args.validate()
        .map_err(|e| HandlerError::validation(format!("Invalid arguments: {e}")))
}

// Custom validation functions

fn validate_model_id(model_id: &str) -> Result<(), ValidationError> {
    let trimmed = model_id.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('/')
        || trimmed.ends_with('/')
        || trimmed.chars().any(char::is_whitespace)
        || trimmed.split('/').any(|part| part == "..")
    {
        return Err(ValidationError::new("invalid_model_id"));
    }
    Ok(())
}
