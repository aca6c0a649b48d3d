//! Tool catalog and execution

mod catalog;
mod executor;

pub use catalog::tool_catalog;
pub use executor::{ToolError, ToolExecutor};
