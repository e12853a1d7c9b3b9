//! MCP Server Builder
//!
//! Builder pattern for constructing MCP servers. Ensures a tool registry is
//! provided before server construction; building closes the registry.

use crate::McpServer;
use crate::mcp_server::ServerInfo;
use crate::tools::{Dispatcher, ToolRegistry};

/// Builder for MCP Server
///
/// Registration happens on the [`ToolRegistry`] before it is handed over;
/// once built, the server's tool set is fixed.
#[derive(Debug, Default)]
pub struct McpServerBuilder {
    registry: Option<ToolRegistry>,
    info: Option<ServerInfo>,
}

impl McpServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tool registry
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Override the identity reported during `initialize`
    pub fn with_server_info(mut self, info: ServerInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Build the MCP server
    ///
    /// # Errors
    /// Returns `BuilderError::MissingDependency` if no registry was provided
    pub fn build(self) -> Result<McpServer, BuilderError> {
        let registry = self
            .registry
            .ok_or(BuilderError::MissingDependency("tool registry"))?;

        Ok(McpServer::new(
            Dispatcher::new(registry),
            self.info.unwrap_or_default(),
        ))
    }
}

/// Errors that can occur during server building
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// A required dependency was not provided
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),
}
