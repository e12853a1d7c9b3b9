//! Tool handler port

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HandlerResult;
use crate::value_objects::ToolArguments;

/// Capability every registered tool implements
///
/// Receives arguments that already passed schema validation and returns a
/// plain structured value or a categorised [`HandlerError`](crate::error::HandlerError).
/// Retries, if any, are the handler's own business.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value>;
}

/// Adapter turning an async closure into a [`ToolHandler`]
///
/// ```
/// use fal_mcp_domain::ports::FnHandler;
/// use serde_json::json;
///
/// let echo = FnHandler::new(|args| async move { Ok(json!(args.into_map())) });
/// # let _ = echo;
/// ```
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    /// Wrap a closure
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync,
        Fut: Future<Output = HandlerResult<Value>> + Send,
    {
        Self(f)
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHandler")
    }
}

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(ToolArguments) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult<Value>> + Send,
{
    async fn call(&self, arguments: ToolArguments) -> HandlerResult<Value> {
        (self.0)(arguments).await
    }
}
