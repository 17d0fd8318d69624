// ABOUTME: Tool module - adapts execution targets into named, described tools.
// ABOUTME: Core abstraction an orchestrator uses to call units of work.

mod adapter;
mod context;
mod handle;
mod registry;
mod result;
mod spec;
mod traits;

pub use adapter::*;
pub use context::*;
pub use handle::*;
pub use registry::*;
pub use result::*;
pub use spec::*;
pub use traits::*;

#[cfg(test)]
mod context_test;
