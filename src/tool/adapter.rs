// ABOUTME: Implements ToolAdapter - exposes an ExecutionTarget as a named, described tool.
// ABOUTME: Handles input checks, timeout, cancellation, and output normalization in-band.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::{
    ErrorKind, ExecutionTarget, InvocationContext, InvocationHandle, InvocationResult, ToolSpec,
};
use crate::config::AdapterConfig;
use crate::error::{TargetError, ToolError};

/// A tool backed by an execution target.
///
/// The adapter holds no mutable state: every invocation is independent and
/// concurrent invocations never contend on the adapter itself. Runtime
/// failures are reported through `InvocationResult::error`, never as `Err`.
pub struct ToolAdapter {
    spec: ToolSpec,
    target: Arc<dyn ExecutionTarget>,
    config: AdapterConfig,
}

impl std::fmt::Debug for ToolAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolAdapter")
            .field("spec", &self.spec)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ToolAdapter {
    /// Create an adapter with no declared inputs.
    ///
    /// Fails with `ToolError::InvalidSpec` if `name` or `description` is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        target: Arc<dyn ExecutionTarget>,
    ) -> Result<Self, ToolError> {
        Ok(Self::from_spec(ToolSpec::new(name, description)?, target))
    }

    /// Create an adapter from an already validated spec.
    pub fn from_spec(spec: ToolSpec, target: Arc<dyn ExecutionTarget>) -> Self {
        Self {
            spec,
            target,
            config: AdapterConfig::default(),
        }
    }

    /// Bound every invocation by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Replace the runtime settings.
    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn description(&self) -> &str {
        self.spec.description()
    }

    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// JSON Schema of the tool's parameters.
    pub fn schema(&self) -> Value {
        self.spec.schema()
    }

    /// Invoke the tool.
    pub async fn invoke(&self, context: impl Into<InvocationContext>) -> InvocationResult {
        self.invoke_with_cancel(context, std::future::pending::<()>())
            .await
    }

    /// Invoke the tool, abandoning the target if `cancel` completes first.
    ///
    /// The target's future is dropped on cancel or timeout, which is how
    /// cancellation reaches it.
    pub async fn invoke_with_cancel<F>(
        &self,
        context: impl Into<InvocationContext>,
        cancel: F,
    ) -> InvocationResult
    where
        F: Future<Output = ()>,
    {
        let invocation_id = Uuid::new_v4();
        let span = tracing::debug_span!("invoke", tool = %self.spec.name(), %invocation_id);
        let started = Instant::now();

        let result = self
            .settle(context.into(), cancel)
            .instrument(span.clone())
            .await;
        let elapsed = started.elapsed();

        span.in_scope(|| match &result.error {
            Some(err) => tracing::warn!(
                kind = %err.kind,
                elapsed_ms = elapsed.as_millis() as u64,
                "invocation failed: {}",
                err.message
            ),
            None => {
                tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "invocation completed")
            }
        });

        result
            .with_metadata("invocation_id", invocation_id.to_string())
            .with_metadata("elapsed_ms", elapsed.as_millis() as u64)
    }

    /// Spawn the invocation onto the tokio runtime.
    ///
    /// The returned handle can be awaited or cancelled.
    pub fn spawn(self: &Arc<Self>, context: impl Into<InvocationContext>) -> InvocationHandle {
        InvocationHandle::spawn(Arc::clone(self), context.into())
    }

    async fn settle<F>(&self, context: InvocationContext, cancel: F) -> InvocationResult
    where
        F: Future<Output = ()>,
    {
        let context = match context.conform(self.spec.inputs(), self.config.convert_types) {
            Ok(context) => context,
            Err(message) => return InvocationResult::failed(ErrorKind::InvalidInput, message),
        };

        tracing::debug!(params = context.len(), "running target");
        let run = AssertUnwindSafe(self.target.run(context.into_value())).catch_unwind();
        let limit = self.config.timeout_duration();
        let bounded = async {
            match limit {
                Some(limit) => tokio::time::timeout(limit, run).await.ok(),
                None => Some(run.await),
            }
        };

        tokio::pin!(cancel);
        tokio::select! {
            biased;
            () = &mut cancel => {
                InvocationResult::failed(ErrorKind::Cancelled, "invocation cancelled by caller")
            }
            outcome = bounded => match outcome {
                None => InvocationResult::failed(
                    ErrorKind::Timeout,
                    format!(
                        "target did not complete within {}ms",
                        limit.map(|l| l.as_millis()).unwrap_or_default()
                    ),
                ),
                Some(Err(_panic)) => {
                    InvocationResult::failed(ErrorKind::ExecutionFailed, "target panicked")
                }
                Some(Ok(Ok(output))) => match normalize(output) {
                    Ok(output) => InvocationResult::ok(output),
                    Err(message) => InvocationResult::failed(ErrorKind::MalformedOutput, message),
                },
                Some(Ok(Err(TargetError::Failed(err)))) => {
                    InvocationResult::failed(ErrorKind::ExecutionFailed, format!("{:#}", err))
                }
                Some(Ok(Err(TargetError::Malformed(message)))) => {
                    InvocationResult::failed(ErrorKind::MalformedOutput, message)
                }
            },
        }
    }
}

/// Normalize raw target output into the result shape.
///
/// `null` and empty arrays are rejected, a single-item array collapses to
/// its item, and bare scalars are wrapped as `{ "response": value }`.
pub fn normalize(output: Value) -> Result<Value, String> {
    match output {
        Value::Null => Err("target did not return a response".into()),
        Value::Array(mut items) => match items.len() {
            0 => Err("target did not return a response".into()),
            1 => normalize(items.remove(0)),
            _ => Ok(Value::Array(items)),
        },
        Value::Object(_) => Ok(output),
        scalar => Ok(serde_json::json!({ "response": scalar })),
    }
}
