//! Tool dispatch
//!
//! Resolves the tool, validates the arguments against its schema, runs the
//! handler and packages the outcome. Never fails: every problem becomes a
//! [`ToolFailure`] inside the response, including handler panics.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use fal_mcp_domain::error::HandlerError;
use fal_mcp_domain::value_objects::{ToolFailure, ToolRequest, ToolResponse};
use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::registry::ToolRegistry;

/// Routes tool requests to their handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher, closing the registry to further registration
    pub fn new(mut registry: ToolRegistry) -> Self {
        registry.close();
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The (closed) registry being served
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one tool request
    pub async fn handle(&self, request: ToolRequest) -> ToolResponse {
        let ToolRequest {
            id,
            name,
            arguments,
        } = request;
        let started = Instant::now();

        match self.invoke(&name, &arguments).await {
            Ok(value) => {
                debug!(tool = %name, request_id = %id, elapsed = ?started.elapsed(), "Tool call succeeded");
                ToolResponse::success(id, value)
            }
            Err(failure) => {
                warn!(
                    tool = %name,
                    request_id = %id,
                    kind = %failure.kind,
                    error = %failure.message,
                    "Tool call failed"
                );
                ToolResponse::failure(id, failure)
            }
        }
    }

    async fn invoke(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<Value, ToolFailure> {
        let tool = self.registry.resolve(name)?;
        let arguments = tool.descriptor.schema.validate(arguments)?;

        match AssertUnwindSafe(tool.handler.call(arguments))
            .catch_unwind()
            .await
        {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ToolFailure::handler(e)),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(tool = %name, panic = %message, "Tool handler panicked");
                Err(ToolFailure::handler(HandlerError::internal(format!(
                    "Tool '{name}' panicked: {message}"
                ))))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
