// ABOUTME: Root module for flowtool - exposes units of work as agent-callable tools.
// ABOUTME: Re-exports all public types from submodules.

pub mod config;
pub mod error;
pub mod prelude;
pub mod targets;
pub mod tool;

pub use config::AdapterConfig;
pub use error::{TargetError, ToolError};
