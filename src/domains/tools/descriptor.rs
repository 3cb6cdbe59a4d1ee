//! Tool descriptors - the metadata advertised for every registered tool.
//!
//! A descriptor is derived from the tool's parameter type: schemars produces the
//! JSON Schema sent to clients at discovery, and the ordered parameter list used
//! for argument validation is read back out of that same schema.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde_json::Value;

use super::ToolError;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Number,
    Integer,
    String,
    Boolean,
    Array,
    Object,
    Any,
}

impl ParamType {
    /// Read the parameter type from a JSON Schema property.
    ///
    /// Nullable properties (`["number", "null"]`) resolve to their non-null type.
    fn from_schema(property: &Value) -> Self {
        let type_name = match property.get("type") {
            Some(Value::String(name)) => Some(name.as_str()),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null"),
            _ => None,
        };

        match type_name {
            Some("number") => Self::Number,
            Some("integer") => Self::Integer,
            Some("string") => Self::String,
            Some("boolean") => Self::Boolean,
            Some("array") => Self::Array,
            Some("object") => Self::Object,
            _ => Self::Any,
        }
    }

    /// Whether a JSON value is acceptable for this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamType,
    pub required: bool,
}

/// Name, description and parameter schema of a tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Build a descriptor whose parameters are described by `P`.
    pub fn for_params<P: JsonSchema + 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::from_schema(name, description, schema_for_type::<P>())
    }

    /// Build a descriptor from an already generated input schema.
    pub fn from_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: JsonObject,
    ) -> Self {
        let required: Vec<&str> = input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let params = input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| ParamSpec {
                        name: name.clone(),
                        kind: ParamType::from_schema(property),
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: name.into(),
            description: description.into(),
            params,
            input_schema: Arc::new(input_schema),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared parameters, in schema order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Check that `arguments` satisfy the declared parameters.
    ///
    /// Required parameters must be present and non-null, and every declared
    /// parameter that is present must carry a value of its declared type.
    /// Undeclared arguments are ignored.
    pub fn validate(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        for param in &self.params {
            match arguments.get(&param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(ToolError::invalid_arguments(format!(
                        "missing required parameter '{}'",
                        param.name
                    )));
                }
                None | Some(Value::Null) => {}
                Some(value) if !param.kind.accepts(value) => {
                    return Err(ToolError::invalid_arguments(format!(
                        "parameter '{}' must be of type {}",
                        param.name,
                        param.kind.as_str()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Create the MCP Tool model advertised at discovery.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
