// ABOUTME: Defines the ExecutionTarget trait - the unit of work a tool delegates to.
// ABOUTME: Targets only expose `run(inputs)`; how they execute is their own business.

use async_trait::async_trait;

use crate::error::TargetError;

/// The underlying unit of work behind a tool.
///
/// Dropping the future returned by `run` must abandon the work; adapters
/// rely on this for timeouts and cancellation.
#[async_trait]
pub trait ExecutionTarget: Send + Sync {
    /// Run with the given inputs (always a JSON object).
    async fn run(&self, inputs: serde_json::Value) -> Result<serde_json::Value, TargetError>;
}
