//! manifest-mcp-server - MCP server exposing a Cosmos chain daemon CLI
//!
//! This binary reads its network parameters and credentials from the
//! environment, guarantees the signing key exists in the daemon keyring,
//! then serves the tool catalog over stdio (default) or HTTP.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use chain_core::{ChainCli, Config};
use mcp_server::{McpServer, ServerMode};

/// manifest-mcp - Cosmos chain daemon CLI over MCP
#[derive(Parser, Debug)]
#[command(name = "manifest-mcp-server")]
#[command(version)]
#[command(about = "Expose a Cosmos chain daemon CLI as MCP tools")]
struct Args {
    /// Run in stdio mode (for MCP clients like Claude Desktop)
    #[arg(long)]
    stdio: bool,

    /// Run in HTTP mode with specified port
    #[arg(long)]
    http: bool,

    /// Port for HTTP server (default: 3000)
    #[arg(long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // In stdio mode stdout carries the protocol, so logging stays off.
    if !args.stdio {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .init();
    }

    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {e}"))?;
    let chain = ChainCli::new(&config);

    chain
        .ensure_key(&config.mnemonic)
        .await
        .map_err(|e| format!("Failed to initialize signing key: {e}"))?;

    let chain = Arc::new(chain);

    let mode = if args.http {
        ServerMode::Http { port: args.port }
    } else {
        ServerMode::Stdio
    };

    let server = McpServer::new(chain).with_mode(mode);

    match mode {
        ServerMode::Stdio => eprintln!("Manifest MCP server running on stdio"),
        ServerMode::Http { port } => info!(port, "starting MCP server"),
    }

    server.run().await?;

    Ok(())
}
