//! reqwest-backed implementation of the [`FalApi`] port

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::debug;

use fal_mcp_domain::constants::MISSING_CREDENTIAL_MESSAGE;
use fal_mcp_domain::error::{HandlerError, HandlerResult, Result};
use fal_mcp_domain::ports::{FalApi, UploadFile};

use super::response::{check_and_parse, request_error};
use crate::config::FalConfig;
use crate::constants::{FAL_STORAGE_TYPE, USER_AGENT};
use crate::error_ext::ErrorContext;

/// fal.ai API client
///
/// Catalogue endpoints are public and only send the credential when one is
/// configured. Running models, queue access and uploads require it.
#[derive(Debug, Clone)]
pub struct FalClient {
    config: FalConfig,
    http_client: Client,
}

impl FalClient {
    /// Create a client from configuration
    pub fn new(config: FalConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .config_context("Failed to build HTTP client")?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(config: FalConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Client configuration
    pub fn config(&self) -> &FalConfig {
        &self.config
    }

    fn api_key(&self) -> HandlerResult<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HandlerError::missing_credential(MISSING_CREDENTIAL_MESSAGE))
    }

    fn authorized(&self, request: RequestBuilder) -> HandlerResult<RequestBuilder> {
        Ok(request.header("Authorization", format!("Key {}", self.api_key()?)))
    }

    fn maybe_authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_key() {
            Ok(key) => request.header("Authorization", format!("Key {key}")),
            Err(_) => request,
        }
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> HandlerResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| request_error(context, &e))?;
        check_and_parse(response, context).await
    }
}

/// Join a base URL and a path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait]
impl FalApi for FalClient {
    fn has_credential(&self) -> bool {
        self.api_key().is_ok()
    }

    async fn list_models(&self, page: Option<u32>, total: Option<u32>) -> HandlerResult<Value> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(total) = total {
            query.push(("total", total.to_string()));
        }
        let request = self
            .http_client
            .get(join_url(&self.config.api_url, "models"))
            .query(&query);
        self.send(self.maybe_authorized(request), "List models").await
    }

    async fn search_models(&self, keywords: &str) -> HandlerResult<Value> {
        let request = self
            .http_client
            .get(join_url(&self.config.api_url, "models"))
            .query(&[("keywords", keywords)]);
        self.send(self.maybe_authorized(request), "Search models")
            .await
    }

    async fn model_schema(&self, model_id: &str) -> HandlerResult<Value> {
        let request = self
            .http_client
            .get(join_url(
                &self.config.api_url,
                "openapi/queue/openapi.json",
            ))
            .query(&[("endpoint_id", model_id)]);
        self.send(self.maybe_authorized(request), "Fetch model schema")
            .await
    }

    async fn run(&self, model: &str, parameters: &Value) -> HandlerResult<Value> {
        debug!(model, "Running model");
        let request = self
            .http_client
            .post(join_url(&self.config.direct_url, model))
            .json(parameters);
        self.send(self.authorized(request)?, "Run model").await
    }

    async fn submit(&self, model: &str, parameters: &Value) -> HandlerResult<Value> {
        debug!(model, "Submitting model to queue");
        let request = self
            .http_client
            .post(join_url(&self.config.queue_url, model))
            .json(parameters);
        self.send(self.authorized(request)?, "Queue model").await
    }

    async fn fetch(&self, url: &str) -> HandlerResult<Value> {
        let request = self.http_client.get(url);
        self.send(self.authorized(request)?, "Fetch queue URL").await
    }

    async fn cancel(&self, url: &str) -> HandlerResult<Value> {
        let request = self.http_client.put(url);
        self.send(self.authorized(request)?, "Cancel request").await
    }

    async fn upload(&self, file: UploadFile) -> HandlerResult<Value> {
        let initiate = self
            .http_client
            .post(join_url(&self.config.rest_url, "storage/upload/initiate"))
            .query(&[("storage_type", FAL_STORAGE_TYPE)])
            .json(&json!({
                "file_name": file.file_name,
                "content_type": file.content_type,
            }));
        let target = self
            .send(self.authorized(initiate)?, "Initiate upload")
            .await?;

        let upload_url = target
            .get("upload_url")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::upstream("Initiate upload: response has no upload_url"))?;
        let file_url = target
            .get("file_url")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::upstream("Initiate upload: response has no file_url"))?;

        let size = file.bytes.len();
        debug!(file_name = %file.file_name, size, "Uploading file");
        let put = self
            .http_client
            .put(upload_url)
            .header("Content-Type", file.content_type.as_str())
            .body(file.bytes);
        self.send(put, "Upload file").await?;

        Ok(json!({
            "file_url": file_url,
            "file_name": file.file_name,
            "content_type": file.content_type,
            "size": size,
        }))
    }
}
