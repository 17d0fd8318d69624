// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use flowtool::prelude::*;` to get started quickly.

pub use crate::config::AdapterConfig;
pub use crate::error::{TargetError, ToolError};
pub use crate::targets::{
    CommandTarget, FnTarget, HttpTarget, WorkflowRef, WorkflowRunner, WorkflowTarget, from_fn,
};
pub use crate::tool::{
    ErrorKind, ExecutionTarget, FieldKind, InputField, InvocationContext, InvocationError,
    InvocationHandle, InvocationResult, Registry, ToolAdapter, ToolCall, ToolDefinition, ToolSpec,
};
