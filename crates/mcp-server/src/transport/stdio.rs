//! stdio transport for MCP (used by MCP clients such as Claude Desktop)

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use chain_core::ChainCli;

use crate::protocol::{McpError, McpMessage, RequestHandler};

/// stdio transport for the MCP protocol
///
/// Reads newline-delimited JSON-RPC from stdin and writes responses to
/// stdout. stdout carries nothing but protocol frames.
pub struct StdioTransport {
    handler: RequestHandler,
}

impl StdioTransport {
    /// Create a new stdio transport
    pub fn new(chain: Arc<ChainCli>) -> Self {
        Self {
            handler: RequestHandler::new(chain),
        }
    }

    /// Run the stdio transport until stdin reaches EOF
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("starting MCP server on stdio");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();

            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!(frame = line, "received");

            let message: McpMessage = match serde_json::from_str(line) {
                Ok(message) => message,
                Err(e) => {
                    error!(%e, "failed to parse message");
                    let response = McpMessage::error_response(None, McpError::parse_error());
                    write_frame(&mut stdout, &response).await?;
                    continue;
                }
            };

            if let Some(response) = self.handler.handle(message).await {
                write_frame(&mut stdout, &response).await?;
            }
        }

        Ok(())
    }
}

async fn write_frame(
    stdout: &mut tokio::io::Stdout,
    message: &McpMessage,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = serde_json::to_string(message)?;
    debug!(%frame, "sending");
    stdout.write_all(frame.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
