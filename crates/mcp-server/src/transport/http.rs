//! HTTP/SSE transport for MCP

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use chain_core::ChainCli;

use crate::protocol::{McpMessage, RequestHandler};

/// Shared state for HTTP handlers
struct AppState {
    handler: RwLock<RequestHandler>,
}

/// HTTP transport for the MCP protocol
pub struct HttpTransport {
    chain: Arc<ChainCli>,
    port: u16,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(chain: Arc<ChainCli>, port: u16) -> Self {
        Self { chain, port }
    }

    /// Run the HTTP server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let state = Arc::new(AppState {
            handler: RwLock::new(RequestHandler::new(self.chain.clone())),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/", get(health))
            .route("/health", get(health))
            .route("/mcp", post(handle_mcp_request))
            .route("/mcp/sse", get(handle_mcp_sse))
            .layer(cors)
            .with_state(state);

        let addr = format!("0.0.0.0:{}", self.port);
        info!(%addr, "starting MCP HTTP server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Handle an MCP JSON-RPC request via HTTP POST
async fn handle_mcp_request(
    State(state): State<Arc<AppState>>,
    Json(message): Json<McpMessage>,
) -> Result<Json<McpMessage>, (StatusCode, String)> {
    debug!(?message, "HTTP request");

    let mut handler = state.handler.write().await;

    match handler.handle(message).await {
        Some(response) => Ok(Json(response)),
        None => {
            // Notification: return an empty success frame.
            Ok(Json(McpMessage::response(
                serde_json::json!(null),
                serde_json::json!({}),
            )))
        }
    }
}

/// Handle MCP via Server-Sent Events
async fn handle_mcp_sse(
    State(_state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE connection established");

    // Announces readiness only; requests arrive via POST /mcp.
    let stream = async_stream::stream! {
        yield Ok(Event::default().data(r#"{"status":"ready"}"#));
    };

    Sse::new(stream)
}
