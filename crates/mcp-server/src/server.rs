//! Main MCP server orchestration

use std::sync::Arc;

use tracing::info;

use chain_core::ChainCli;

use crate::transport::{HttpTransport, StdioTransport};

/// Server mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    /// stdio transport (for MCP clients)
    #[default]
    Stdio,
    /// HTTP/SSE transport
    Http { port: u16 },
}

/// MCP server
pub struct McpServer {
    chain: Arc<ChainCli>,
    mode: ServerMode,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(chain: Arc<ChainCli>) -> Self {
        Self {
            chain,
            mode: ServerMode::default(),
        }
    }

    /// Set the server mode
    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run the server until the transport shuts down
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self.mode {
            ServerMode::Stdio => {
                let mut transport = StdioTransport::new(self.chain.clone());
                transport.run().await
            }
            ServerMode::Http { port } => {
                info!(port, "starting MCP server in HTTP mode");
                let transport = HttpTransport::new(self.chain.clone(), port);
                transport.run().await
            }
        }
    }
}
