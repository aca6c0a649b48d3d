//! # mcp-server
//!
//! MCP (Model Context Protocol) server for manifest-mcp. Declares the fixed
//! chain tool catalog and serves it over stdio or HTTP transports, dispatching
//! tool calls to the chain daemon CLI via chain-core.

pub mod protocol;
mod server;
pub mod tools;
pub mod transport;

pub use protocol::{McpError, McpMessage, ServerCapabilities};
pub use server::{McpServer, ServerMode};
pub use tools::{tool_catalog, ToolError, ToolExecutor};
pub use transport::{HttpTransport, StdioTransport};
