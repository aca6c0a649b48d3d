//! MCP protocol types and handling

mod handler;
mod types;

pub use handler::RequestHandler;
pub use types::*;
