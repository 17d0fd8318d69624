// ABOUTME: WorkflowTarget - delegates to an external engine that runs sub-workflows.
// ABOUTME: Defines the WorkflowRunner seam and unwraps item-shaped workflow output.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TargetError;
use crate::tool::ExecutionTarget;

/// Which sub-workflow to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "workflow", rename_all = "snake_case")]
pub enum WorkflowRef {
    /// A workflow stored by the engine, looked up by id.
    Id(String),
    /// A workflow definition carried inline.
    Inline(Value),
}

/// An engine able to execute sub-workflows.
///
/// Implemented by the host; this crate only calls it.
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    /// Run `workflow` with `inputs` and return its output items.
    async fn run_workflow(
        &self,
        workflow: &WorkflowRef,
        inputs: Value,
    ) -> Result<Value, TargetError>;
}

/// Execution target that runs a sub-workflow through a `WorkflowRunner`.
pub struct WorkflowTarget {
    runner: Arc<dyn WorkflowRunner>,
    workflow: WorkflowRef,
}

impl WorkflowTarget {
    pub fn new(runner: Arc<dyn WorkflowRunner>, workflow: WorkflowRef) -> Self {
        Self { runner, workflow }
    }

    pub fn workflow(&self) -> &WorkflowRef {
        &self.workflow
    }
}

#[async_trait]
impl ExecutionTarget for WorkflowTarget {
    async fn run(&self, inputs: Value) -> Result<Value, TargetError> {
        let output = self.runner.run_workflow(&self.workflow, inputs).await?;
        Ok(unwrap_items(output))
    }
}

/// Strip the `{ "json": ... }` envelope from workflow output items.
///
/// Only applies when every element of an array is such an envelope;
/// anything else is returned unchanged.
fn unwrap_items(output: Value) -> Value {
    let is_envelope = |v: &Value| v.as_object().is_some_and(|o| o.contains_key("json"));
    match output {
        Value::Array(items) if !items.is_empty() && items.iter().all(is_envelope) => Value::Array(
            items
                .into_iter()
                .map(|mut item| item["json"].take())
                .collect(),
        ),
        other => other,
    }
}
