// ABOUTME: FnTarget - an execution target backed by an async closure.
// ABOUTME: Useful for in-process work and for test doubles.

use std::future::Future;

use async_trait::async_trait;

use crate::error::TargetError;
use crate::tool::ExecutionTarget;

/// Execution target that calls an async closure.
pub struct FnTarget<F> {
    f: F,
}

impl<F> FnTarget<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

/// Wrap an async closure as an execution target.
pub fn from_fn<F, Fut>(f: F) -> FnTarget<F>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, TargetError>> + Send + 'static,
{
    FnTarget::new(f)
}

#[async_trait]
impl<F, Fut> ExecutionTarget for FnTarget<F>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, TargetError>> + Send + 'static,
{
    async fn run(&self, inputs: serde_json::Value) -> Result<serde_json::Value, TargetError> {
        (self.f)(inputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_target_passes_inputs() {
        let target = from_fn(|inputs| async move { Ok(serde_json::json!({ "got": inputs })) });
        let output = target.run(serde_json::json!({"x": 1})).await.unwrap();
        assert_eq!(output, serde_json::json!({"got": {"x": 1}}));
    }

    #[tokio::test]
    async fn test_fn_target_error() {
        let target = from_fn(|_| async { Err(TargetError::failed("boom")) });
        let err = target.run(serde_json::json!({})).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
