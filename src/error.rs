// ABOUTME: Defines all error types for the flowtool library using thiserror.
// ABOUTME: Construction and lookup errors are Rust errors; runtime failures are in-band.

/// Errors raised while building or looking up tools.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid tool spec: {0}")]
    InvalidSpec(String),

    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),
}

/// Errors an execution target reports back to its adapter.
///
/// These never escape `ToolAdapter::invoke`; the adapter folds them into
/// the `InvocationResult`.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("Execution failed: {0}")]
    Failed(#[from] anyhow::Error),

    #[error("Malformed output: {0}")]
    Malformed(String),
}

impl TargetError {
    /// Build a `Failed` error from a plain message.
    pub fn failed(message: impl std::fmt::Display) -> Self {
        TargetError::Failed(anyhow::anyhow!("{}", message))
    }
}

impl From<serde_json::Error> for TargetError {
    fn from(err: serde_json::Error) -> Self {
        TargetError::Malformed(err.to_string())
    }
}
