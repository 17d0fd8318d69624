// ABOUTME: Defines InvocationResult - the in-band outcome of a tool invocation
// ABOUTME: with structured output, an optional classified error, and metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Classification of a runtime invocation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The target ran but reported an error.
    ExecutionFailed,
    /// The target did not finish within the configured timeout.
    Timeout,
    /// The target finished but its output could not be normalized.
    MalformedOutput,
    /// The caller withdrew the request.
    Cancelled,
    /// The invocation context did not satisfy the declared inputs.
    InvalidInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ExecutionFailed => write!(f, "execution failed"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::MalformedOutput => write!(f, "malformed output"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
            ErrorKind::InvalidInput => write!(f, "invalid input"),
        }
    }
}

/// A failed invocation's kind and message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Normalized output; `null` when the invocation failed.
    pub output: serde_json::Value,

    /// Set when the invocation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<InvocationError>,

    /// Optional metadata about the invocation.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl InvocationResult {
    /// Create a successful result.
    pub fn ok(output: serde_json::Value) -> Self {
        Self {
            output,
            error: None,
            metadata: HashMap::new(),
        }
    }

    /// Create a failed result.
    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            output: serde_json::Value::Null,
            error: Some(InvocationError {
                kind,
                message: message.into(),
            }),
            metadata: HashMap::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error kind, if the invocation failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }

    /// Render the result as text for an LLM tool-result message.
    pub fn to_text(&self) -> String {
        match &self.error {
            Some(err) => format!("There was an error: \"{}\"", err.message),
            None => match &self.output {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}
