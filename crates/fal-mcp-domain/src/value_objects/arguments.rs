//! Validated tool arguments

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{HandlerError, HandlerResult};

/// Arguments that passed schema validation and coercion
///
/// Handed to a [`ToolHandler`](crate::ports::ToolHandler). Every declared
/// parameter that was supplied (or has a default) is present with its
/// coerced type; undeclared keys have been dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments(Map<String, Value>);

impl ToolArguments {
    /// Raw value of a parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String parameter
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Integer parameter
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(Value::as_i64)
    }

    /// Boolean parameter
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.0.get(name).and_then(Value::as_bool)
    }

    /// Deserialize into a typed argument struct
    ///
    /// Failures are reported as validation errors since the arguments have
    /// already been shape-checked against the schema.
    pub fn parse<T: DeserializeOwned>(&self) -> HandlerResult<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| HandlerError::validation(format!("Invalid arguments: {e}")))
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no arguments are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
