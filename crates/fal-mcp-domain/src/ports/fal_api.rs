//! fal.ai API port
//!
//! The three tool groups (models, generation, storage) talk to fal.ai only
//! through this trait. The concrete HTTP client lives in the infrastructure
//! crate; tests substitute a hand-written mock.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HandlerResult;

/// A local file prepared for upload to fal.ai storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name reported to storage
    pub file_name: String,
    /// MIME type of the content
    pub content_type: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

/// Operations of the remote generation and storage API
#[async_trait]
pub trait FalApi: Send + Sync {
    /// Whether a credential is configured
    fn has_credential(&self) -> bool;

    /// One page of the model catalogue
    async fn list_models(&self, page: Option<u32>, total: Option<u32>) -> HandlerResult<Value>;

    /// Models matching free-text keywords
    async fn search_models(&self, keywords: &str) -> HandlerResult<Value>;

    /// OpenAPI schema of a model endpoint
    async fn model_schema(&self, model_id: &str) -> HandlerResult<Value>;

    /// Run a model synchronously and return its output
    async fn run(&self, model: &str, parameters: &Value) -> HandlerResult<Value>;

    /// Submit a job to the queue; returns `request_id`, `status_url`, `response_url`
    async fn submit(&self, model: &str, parameters: &Value) -> HandlerResult<Value>;

    /// GET a queue URL (status or result)
    async fn fetch(&self, url: &str) -> HandlerResult<Value>;

    /// Cancel a queued job via its cancel URL
    async fn cancel(&self, url: &str) -> HandlerResult<Value>;

    /// Upload a file to storage; returns at least `file_url`
    async fn upload(&self, file: UploadFile) -> HandlerResult<Value>;
}
