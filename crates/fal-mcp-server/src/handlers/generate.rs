//! Generation tool handlers
//!
//! `generate` runs a model directly or through the queue; with `queue` and
//! `wait` it polls the job's status URL until it completes and returns the
//! result. `get_status`, `get_result` and `cancel_request` address queued
//! jobs by the URLs the queue hands back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fal_mcp_domain::constants::QUEUE_STATUS_COMPLETED;
use fal_mcp_domain::error::{HandlerError, HandlerResult, Result};
use fal_mcp_domain::ports::{FalApi, ToolHandler};
use fal_mcp_domain::value_objects::{
    ParamSpec, ParamType, ToolArguments, ToolDescriptor, ToolSchema,
};
use fal_mcp_infrastructure::config::FalConfig;
use serde_json::{Value, json};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::args::{GenerateArgs, QueueUrlArgs, validate_args};
use crate::tools::ToolRegistry;

/// How queued jobs are waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay between status checks
    pub interval: Duration,
    /// Give up after this long
    pub timeout: Duration,
}

impl PollSettings {
    /// Poll settings from the fal.ai configuration
    pub fn from_config(config: &FalConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            timeout: config.poll_timeout(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_config(&FalConfig::default())
    }
}

/// Handler for the generate tool
pub struct GenerateHandler {
    api: Arc<dyn FalApi>,
    poll: PollSettings,
}

impl GenerateHandler {
    /// Create a new generate handler
    pub fn new(api: Arc<dyn FalApi>, poll: PollSettings) -> Self {
        Self { api, poll }
    }

    /// Tool descriptor
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "generate",
            "Generate content with a fal.ai model. Runs synchronously by default; \
             with queue=true returns a request handle, and with wait=true as well \
             waits for the queued job and returns its result",
            ToolSchema::new()
                .param(ParamSpec::required(
                    "model",
                    ParamType::String,
                    "Model endpoint id, e.g. 'fal-ai/flux/dev'",
                ))
                .param(ParamSpec::required(
                    "parameters",
                    ParamType::Object,
                    "Model input parameters (see model_schema)",
                ))
                .param(
                    ParamSpec::optional(
                        "queue",
                        ParamType::Boolean,
                        "Submit through the queue instead of running directly",
                    )
                    .with_default(json!(false)),
                )
                .param(
                    ParamSpec::optional(
                        "wait",
                        ParamType::Boolean,
                        "With queue=true, wait for completion and return the result",
                    )
                    .with_default(json!(false)),
                ),
        )
    }

    /// Poll a status URL until the job completes
    ///
    /// A timeout too large to add to the clock means no deadline.
    async fn wait_for_completion(&self, status_url: &str) -> HandlerResult<()> {
        let deadline = Instant::now().checked_add(self.poll.timeout);
        loop {
            let status = self.api.fetch(status_url).await?;
            let state = status.get("status").and_then(Value::as_str).unwrap_or("");

            if state == QUEUE_STATUS_COMPLETED {
                return match status.get("error").filter(|e| !e.is_null()) {
                    Some(error) => Err(HandlerError::upstream(format!(
                        "Queued request failed: {}",
                        error_text(error)
                    ))),
                    None => Ok(()),
                };
            }

            debug!(status_url, state, "Queued request not finished");
            let out_of_time = deadline.is_some_and(|deadline| {
                Instant::now()
                    .checked_add(self.poll.interval)
                    .is_none_or(|next| next > deadline)
            });
            if out_of_time {
                return Err(HandlerError::timeout(format!(
                    "Queued request did not complete within {}s",
                    self.poll.timeout.as_secs()
                )));
            }
            tokio::time::sleep(self.poll.interval).await;
        }
    }
}

fn error_text(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn required_url<'a>(submitted: &'a Value, key: &str) -> HandlerResult<&'a str> {
    submitted
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::upstream(format!("Queue response has no {key}")))
}

#[async_trait]
impl ToolHandler for GenerateHandler {
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        let args: GenerateArgs = arguments.parse()?;
        validate_args(&args)?;
        let model = args.model.trim();
        let parameters = Value::Object(args.parameters);

        if !args.queue {
            return self.api.run(model, &parameters).await;
        }

        let submitted = self.api.submit(model, &parameters).await?;
        if !args.wait {
            return Ok(submitted);
        }

        let status_url = required_url(&submitted, "status_url")?;
        let response_url = required_url(&submitted, "response_url")?;
        info!(model, status_url, "Waiting for queued request");

        self.wait_for_completion(status_url).await?;
        self.api.fetch(response_url).await
    }
}

/// What a queue URL tool does with its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAction {
    /// `GET` the status URL
    Status,
    /// `GET` the response URL
    Result,
    /// `PUT` the cancel URL
    Cancel,
}

/// Handler for get_status, get_result and cancel_request
pub struct QueueUrlHandler {
    api: Arc<dyn FalApi>,
    action: QueueAction,
}

impl QueueUrlHandler {
    /// Create a handler performing `action`
    pub fn new(api: Arc<dyn FalApi>, action: QueueAction) -> Self {
        Self { api, action }
    }

    /// Tool descriptor for `action`
    pub fn descriptor(action: QueueAction) -> ToolDescriptor {
        let (name, description, url) = match action {
            QueueAction::Status => (
                "get_status",
                "Check the status of a queued request",
                "status_url returned by generate with queue=true",
            ),
            QueueAction::Result => (
                "get_result",
                "Get the result of a completed queued request",
                "response_url returned by generate with queue=true",
            ),
            QueueAction::Cancel => (
                "cancel_request",
                "Cancel a queued request",
                "cancel_url returned by generate with queue=true",
            ),
        };
        ToolDescriptor::new(
            name,
            description,
            ToolSchema::new().param(ParamSpec::required("url", ParamType::String, url)),
        )
    }
}

#[async_trait]
impl ToolHandler for QueueUrlHandler {
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        let args: QueueUrlArgs = arguments.parse()?;
        validate_args(&args)?;
        match self.action {
            QueueAction::Status | QueueAction::Result => self.api.fetch(&args.url).await,
            QueueAction::Cancel => self.api.cancel(&args.url).await,
        }
    }
}

/// Register `generate`, `get_result`, `get_status` and `cancel_request`
pub fn register_generation_tools(
    registry: &mut ToolRegistry,
    api: &Arc<dyn FalApi>,
    poll: PollSettings,
) -> Result<()> {
    registry.register(
        GenerateHandler::descriptor(),
        Arc::new(GenerateHandler::new(Arc::clone(api), poll)),
    )?;
    for action in [QueueAction::Result, QueueAction::Status, QueueAction::Cancel] {
        registry.register(
            QueueUrlHandler::descriptor(action),
            Arc::new(QueueUrlHandler::new(Arc::clone(api), action)),
        )?;
    }
    Ok(())
}
