// ABOUTME: Built-in execution targets a ToolAdapter can delegate to.
// ABOUTME: Includes closures, subprocesses, HTTP endpoints, and sub-workflows.

mod command;
mod func;
mod http;
mod workflow;

pub use command::CommandTarget;
pub use func::{FnTarget, from_fn};
pub use http::HttpTarget;
pub use workflow::{WorkflowRef, WorkflowRunner, WorkflowTarget};
