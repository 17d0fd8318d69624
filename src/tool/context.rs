// ABOUTME: Defines InvocationContext - the per-call parameter bag handed to a tool.
// ABOUTME: Also checks (and optionally converts) parameters against declared inputs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FieldKind, InputField};

/// Parameters supplied for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationContext {
    params: Map<String, Value>,
}

impl InvocationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from any JSON value.
    ///
    /// Objects are used as-is, `null` yields an empty context, and any other
    /// value is wrapped as `{ "query": value }`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(params) => Self { params },
            Value::Null => Self::default(),
            other => {
                let mut params = Map::new();
                params.insert("query".into(), other);
                Self { params }
            }
        }
    }

    /// Add a parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Borrow the parameters as a JSON map.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Consume the context into the JSON object passed to a target.
    pub fn into_value(self) -> Value {
        Value::Object(self.params)
    }

    /// Check the context against declared input fields.
    ///
    /// With `convert_types`, string values are converted to the declared
    /// kind where that is lossless, and numbers/booleans are stringified for
    /// string fields. Undeclared keys pass through untouched.
    pub fn conform(mut self, fields: &[InputField], convert_types: bool) -> Result<Self, String> {
        for field in fields {
            let Some(value) = self.params.get_mut(&field.name) else {
                if field.required {
                    return Err(format!("missing required parameter '{}'", field.name));
                }
                continue;
            };

            if value.is_null() && !field.required {
                continue;
            }
            if field.kind.matches(value) {
                continue;
            }

            let converted = if convert_types {
                convert(value, field.kind)
            } else {
                None
            };
            match converted {
                Some(v) => *value = v,
                None => {
                    return Err(format!(
                        "parameter '{}' should be {}, got {}",
                        field.name,
                        field.kind,
                        describe(value)
                    ));
                }
            }
        }
        Ok(self)
    }
}

impl From<Map<String, Value>> for InvocationContext {
    fn from(params: Map<String, Value>) -> Self {
        Self { params }
    }
}

impl From<Value> for InvocationContext {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn convert(value: &Value, kind: FieldKind) -> Option<Value> {
    match (kind, value) {
        (FieldKind::String, Value::Number(n)) => Some(Value::String(n.to_string())),
        (FieldKind::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
        (FieldKind::Number, Value::String(s)) => {
            let s = s.trim();
            let number = serde_json::from_str::<serde_json::Number>(s).ok()?;
            // Integer text too large for u64/i64 would silently become an f64.
            let integral = !s.contains(['.', 'e', 'E']);
            if integral && number.is_f64() {
                return None;
            }
            Some(Value::Number(number))
        }
        (FieldKind::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        (FieldKind::Array | FieldKind::Object, Value::String(s)) => {
            serde_json::from_str::<Value>(s)
                .ok()
                .filter(|parsed| kind.matches(parsed))
        }
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
