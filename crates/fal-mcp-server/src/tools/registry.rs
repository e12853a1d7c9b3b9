//! Tool Registry Module
//!
//! Name → (descriptor, handler). Filled once at startup through explicit
//! registration calls, closed before serving and read-only from then on.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fal_mcp_domain::error::{Error, Result};
use fal_mcp_domain::ports::ToolHandler;
use fal_mcp_domain::value_objects::ToolDescriptor;
use tracing::debug;

/// A tool as stored in the registry
#[derive(Clone)]
pub struct RegisteredTool {
    /// Name, description and input schema
    pub descriptor: ToolDescriptor,
    /// Implementation
    pub handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registry of the tools a server exposes
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
    closed: bool,
}

impl ToolRegistry {
    /// Create an empty, open registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// - [`Error::RegistryClosed`] once [`close`](Self::close) has been called
    /// - [`Error::DuplicateTool`] if the name is taken; the registry is left
    ///   unchanged
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<()> {
        if self.closed {
            return Err(Error::registry_closed(descriptor.name));
        }
        if self.index.contains_key(&descriptor.name) {
            return Err(Error::duplicate_tool(descriptor.name));
        }

        debug!(tool = %descriptor.name, "Registering tool");
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Look up a tool by name
    pub fn resolve(&self, name: &str) -> Result<&RegisteredTool> {
        self.index
            .get(name)
            .and_then(|&i| self.tools.get(i))
            .ok_or_else(|| Error::unknown_tool(name))
    }

    /// Descriptors in registration order
    ///
    /// Each call yields a fresh iterator; the iterator itself is `Clone`
    /// so a partially consumed listing can be restarted from a saved copy.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> + Clone + '_ {
        self.tools.iter().map(|tool| &tool.descriptor)
    }

    /// Refuse any further registration
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether registration has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
