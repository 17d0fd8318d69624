// ABOUTME: Implements the Registry - a thread-safe, caller-owned index of tool
// ABOUTME: adapters by name, with lookup-and-invoke and LLM tool definitions.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{InvocationContext, InvocationResult, ToolAdapter};
use crate::error::ToolError;

/// Tool description handed to an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// A tool call requested by an orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// A thread-safe registry of tool adapters.
///
/// Cloning shares the underlying map.
#[derive(Default, Clone)]
pub struct Registry {
    tools: Arc<RwLock<HashMap<String, Arc<ToolAdapter>>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter. Names are unique per registry.
    pub async fn register(&self, adapter: ToolAdapter) -> Result<(), ToolError> {
        self.register_arc(Arc::new(adapter)).await
    }

    /// Register an adapter from an Arc.
    pub async fn register_arc(&self, adapter: Arc<ToolAdapter>) -> Result<(), ToolError> {
        let mut tools = self.tools.write().await;
        if tools.contains_key(adapter.name()) {
            return Err(ToolError::AlreadyRegistered(adapter.name().to_string()));
        }
        tracing::debug!(tool = adapter.name(), "registered tool");
        tools.insert(adapter.name().to_string(), adapter);
        Ok(())
    }

    /// Unregister an adapter by name, returning it if present.
    pub async fn unregister(&self, name: &str) -> Option<Arc<ToolAdapter>> {
        let mut tools = self.tools.write().await;
        tools.remove(name)
    }

    /// Get an adapter by name.
    pub async fn get(&self, name: &str) -> Option<Arc<ToolAdapter>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// List all tool names, sorted alphabetically.
    pub async fn list(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<_> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered adapters.
    pub async fn count(&self) -> usize {
        let tools = self.tools.read().await;
        tools.len()
    }

    /// Convert all adapters to LLM tool definitions, sorted by name.
    pub async fn to_definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        let mut defs: Vec<_> = tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Look up a tool by name and invoke it.
    ///
    /// Only the lookup can fail; invocation failures are in the result.
    /// The registry lock is not held while the tool runs.
    pub async fn invoke(
        &self,
        name: &str,
        context: impl Into<InvocationContext>,
    ) -> Result<InvocationResult, ToolError> {
        let adapter = self
            .get(name)
            .await
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        Ok(adapter.invoke(context).await)
    }

    /// Invoke several tool calls concurrently, preserving call order.
    pub async fn invoke_many(
        &self,
        calls: Vec<ToolCall>,
    ) -> Vec<Result<InvocationResult, ToolError>> {
        join_all(
            calls
                .into_iter()
                .map(|call| async move { self.invoke(&call.name, call.arguments).await }),
        )
        .await
    }
}
