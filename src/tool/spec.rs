// ABOUTME: Defines ToolSpec - the immutable identity (name, description) of a tool
// ABOUTME: plus its optional declared inputs, which drive the JSON Schema and validation.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// The JSON type an input field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Any,
}

impl FieldKind {
    /// JSON Schema `type` keyword for this kind, if it has one.
    pub fn schema_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::String => Some("string"),
            FieldKind::Number => Some("number"),
            FieldKind::Boolean => Some("boolean"),
            FieldKind::Array => Some("array"),
            FieldKind::Object => Some("object"),
            FieldKind::Any => None,
        }
    }

    /// Whether a JSON value already has this kind.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
            FieldKind::Any => true,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.schema_type().unwrap_or("any"))
    }
}

/// A declared input parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    /// Parameter name as it appears in the invocation context.
    pub name: String,

    /// Accepted JSON type.
    pub kind: FieldKind,

    /// Optional description shown to the LLM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the parameter must be present.
    #[serde(default)]
    pub required: bool,
}

impl InputField {
    /// Create an optional field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: false,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Identity of a tool as seen by an orchestrator.
///
/// Fields are private so a constructed spec cannot be mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    name: String,
    description: String,
    inputs: Vec<InputField>,
}

impl ToolSpec {
    /// Create a spec with no declared inputs.
    ///
    /// Fails with `ToolError::InvalidSpec` if either string is empty or
    /// whitespace only.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, ToolError> {
        Self::with_inputs(name, description, Vec::new())
    }

    /// Create a spec with declared input fields.
    pub fn with_inputs(
        name: impl Into<String>,
        description: impl Into<String>,
        inputs: Vec<InputField>,
    ) -> Result<Self, ToolError> {
        let name = name.into();
        let description = description.into();

        if name.trim().is_empty() {
            return Err(ToolError::InvalidSpec("name must not be empty".into()));
        }
        if description.trim().is_empty() {
            return Err(ToolError::InvalidSpec(format!(
                "description of '{}' must not be empty",
                name
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for field in &inputs {
            if field.name.trim().is_empty() {
                return Err(ToolError::InvalidSpec(format!(
                    "input field of '{}' has an empty name",
                    name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ToolError::InvalidSpec(format!(
                    "duplicate input field '{}' in '{}'",
                    field.name, name
                )));
            }
        }

        Ok(Self {
            name,
            description,
            inputs,
        })
    }

    /// The unique tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description used by the orchestrator for routing.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared input fields; empty when the tool takes a free-form query.
    pub fn inputs(&self) -> &[InputField] {
        &self.inputs
    }

    /// JSON Schema for the tool's parameters.
    ///
    /// Without declared inputs the tool accepts a single `query` string.
    pub fn schema(&self) -> serde_json::Value {
        if self.inputs.is_empty() {
            return serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The input to pass to the tool"
                    }
                },
                "required": ["query"]
            });
        }

        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for field in &self.inputs {
            let mut property = serde_json::Map::new();
            if let Some(ty) = field.kind.schema_type() {
                property.insert("type".into(), ty.into());
            }
            if let Some(desc) = &field.description {
                property.insert("description".into(), desc.clone().into());
            }
            properties.insert(field.name.clone(), property.into());
            if field.required {
                required.push(serde_json::Value::from(field.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}
