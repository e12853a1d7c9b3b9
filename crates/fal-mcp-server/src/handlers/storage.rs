//! Storage tool handler
//!
//! `upload_file` reads a local file and uploads it to fal.ai storage,
//! returning the public URL for use as a model input.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use fal_mcp_domain::constants::MISSING_CREDENTIAL_MESSAGE;
use fal_mcp_domain::error::{HandlerError, HandlerResult, Result};
use fal_mcp_domain::ports::{FalApi, ToolHandler, UploadFile};
use fal_mcp_domain::value_objects::{
    ParamSpec, ParamType, ToolArguments, ToolDescriptor, ToolSchema,
};
use serde_json::Value;
use tracing::info;

use crate::args::{UploadFileArgs, validate_args};
use crate::tools::ToolRegistry;

/// Handler for the upload_file tool
pub struct UploadFileHandler {
    api: Arc<dyn FalApi>,
}

impl UploadFileHandler {
    /// Create a new upload_file handler
    pub fn new(api: Arc<dyn FalApi>) -> Self {
        Self { api }
    }

    /// Tool descriptor
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "upload_file",
            "Upload a local file to fal.ai storage and return its URL",
            ToolSchema::new().param(ParamSpec::required(
                "path",
                ParamType::String,
                "Path of the local file to upload",
            )),
        )
    }
}

/// Read a file into an [`UploadFile`], guessing its content type
pub async fn read_upload(path: &Path) -> HandlerResult<UploadFile> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            HandlerError::validation(format!("File not found: {}", path.display()))
        }
        ErrorKind::PermissionDenied => {
            HandlerError::validation(format!("Permission denied: {}", path.display()))
        }
        _ => HandlerError::validation(format!("Cannot read {}: {e}", path.display())),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| HandlerError::validation(format!("Not a file: {}", path.display())))?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(UploadFile {
        file_name,
        content_type,
        bytes,
    })
}

#[async_trait]
impl ToolHandler for UploadFileHandler {
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        let args: UploadFileArgs = arguments.parse()?;
        validate_args(&args)?;
        if !self.api.has_credential() {
            return Err(HandlerError::missing_credential(MISSING_CREDENTIAL_MESSAGE));
        }

        let file = read_upload(Path::new(&args.path)).await?;
        info!(file_name = %file.file_name, size = file.bytes.len(), "Uploading file");
        self.api.upload(file).await
    }
}

/// Register `upload_file`
pub fn register_storage_tools(registry: &mut ToolRegistry, api: &Arc<dyn FalApi>) -> Result<()> {
    registry.register(
        UploadFileHandler::descriptor(),
        Arc::new(UploadFileHandler::new(Arc::clone(api))),
    )
}
