//! Tool input schemas
//!
//! A [`ToolSchema`] is an ordered list of [`ParamSpec`]s. It is explicit,
//! checked data: the dispatcher validates and coerces every call against it,
//! and discovery renders it as a JSON Schema object.

use std::fmt;

use serde_json::{Map, Value, json};

use super::arguments::ToolArguments;
use crate::error::{Error, Result};

/// Declared type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// UTF-8 string
    String,
    /// Signed 64-bit integer
    Integer,
    /// Finite floating point number
    Number,
    /// Boolean flag
    Boolean,
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// Any JSON value, passed through untouched
    Any,
}

impl ParamType {
    /// JSON Schema `type` keyword for this tag (`None` for [`ParamType::Any`])
    pub fn json_type(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Integer => Some("integer"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Object => Some("object"),
            Self::Array => Some("array"),
            Self::Any => None,
        }
    }

    /// Coerce a value to this type, or `None` if it is not coercible
    ///
    /// Lenient where clients commonly send strings: numeric strings become
    /// numbers, `"true"`/`"false"` become booleans, and JSON-encoded strings
    /// become objects or arrays. Integral floats are accepted as integers.
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::Any, v) => Some(v.clone()),
            (Self::String, Value::String(_)) => Some(value.clone()),
            (Self::Integer, Value::Number(n)) => {
                if n.is_i64() || n.is_u64() {
                    Some(value.clone())
                } else {
                    n.as_f64().and_then(integral_float).map(Value::from)
                }
            }
            (Self::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),
            (Self::Number, Value::Number(_)) => Some(value.clone()),
            (Self::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            (Self::Boolean, Value::Bool(_)) => Some(value.clone()),
            (Self::Boolean, Value::String(s)) => parse_bool(s).map(Value::Bool),
            (Self::Object, Value::Object(_)) | (Self::Array, Value::Array(_)) => Some(value.clone()),
            (Self::Object, Value::String(s)) => {
                serde_json::from_str::<Value>(s).ok().filter(Value::is_object)
            }
            (Self::Array, Value::String(s)) => {
                serde_json::from_str::<Value>(s).ok().filter(Value::is_array)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_type().unwrap_or("any"))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral_float(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared parameter of a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Parameter name (key in the arguments object)
    pub name: String,
    /// Human-readable description for discovery
    pub description: String,
    /// Declared type tag
    pub param_type: ParamType,
    /// Whether the caller must supply it
    pub required: bool,
    /// Value used when an optional parameter is absent
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A parameter the caller must supply
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type,
            required: true,
            default: None,
        }
    }

    /// A parameter the caller may omit
    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    /// Attach a default used when the parameter is absent
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut property = Map::new();
        if let Some(ty) = self.param_type.json_type() {
            property.insert("type".to_string(), json!(ty));
        }
        if !self.description.is_empty() {
            property.insert("description".to_string(), json!(self.description));
        }
        if let Some(default) = &self.default {
            property.insert("default".to_string(), default.clone());
        }
        Value::Object(property)
    }
}

/// Ordered input schema of a tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSchema {
    params: Vec<ParamSpec>,
}

impl ToolSchema {
    /// Create an empty schema (a tool that takes no arguments)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declared parameters in declaration order
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Validate and coerce call arguments against this schema
    ///
    /// Parameters are checked in declaration order, so the first offending
    /// parameter is the one reported. A `null` value counts as absent.
    /// Absent optional parameters take their default; arguments the schema
    /// does not declare are dropped.
    pub fn validate(&self, arguments: &Map<String, Value>) -> Result<ToolArguments> {
        let mut validated = Map::new();

        for spec in &self.params {
            match arguments.get(&spec.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    let coerced = spec.param_type.coerce(value).ok_or_else(|| {
                        Error::invalid_arguments(
                            &spec.name,
                            format!(
                                "expected {}, got {}",
                                spec.param_type,
                                json_type_name(value)
                            ),
                        )
                    })?;
                    validated.insert(spec.name.clone(), coerced);
                }
                None if spec.required => {
                    return Err(Error::invalid_arguments(
                        &spec.name,
                        "missing required parameter",
                    ));
                }
                None => {
                    if let Some(default) = &spec.default {
                        validated.insert(spec.name.clone(), default.clone());
                    }
                }
            }
        }

        Ok(ToolArguments::from(validated))
    }

    /// Render as a JSON Schema object for discovery
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Immutable description of a registered tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Input schema
    pub schema: ToolSchema,
}

impl ToolDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: ToolSchema) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// Discovery entry: `{ name, description, inputSchema }`
    pub fn to_discovery_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.schema.to_json_schema(),
        })
    }
}
