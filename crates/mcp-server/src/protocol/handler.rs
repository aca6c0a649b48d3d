//! MCP request handler

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, error, info};

use chain_core::ChainCli;

use super::types::*;
use crate::tools::{tool_catalog, ToolExecutor};

/// Handler for MCP requests
pub struct RequestHandler {
    /// Fixed tool catalog, built once
    tools: Vec<McpTool>,
    /// Tool executor
    executor: ToolExecutor,
    /// Server name
    server_name: String,
    /// Server version
    server_version: String,
    /// Whether the session has been initialized
    initialized: bool,
}

impl RequestHandler {
    /// Create a new request handler
    pub fn new(chain: Arc<ChainCli>) -> Self {
        Self {
            tools: tool_catalog(),
            executor: ToolExecutor::new(chain),
            server_name: "manifest-mcp".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            initialized: false,
        }
    }

    /// Handle an incoming message
    pub async fn handle(&mut self, message: McpMessage) -> Option<McpMessage> {
        match (message.method.as_deref(), message.id.clone()) {
            (Some(method), Some(id)) => {
                debug!(%method, "handling request");

                let result = match method {
                    "initialize" => self.handle_initialize(message.params),
                    "ping" => Ok(json!({})),
                    "tools/list" => self.handle_tools_list(),
                    "tools/call" => self.handle_tools_call(message.params).await,
                    _ => Err(McpError::method_not_found()),
                };

                Some(match result {
                    Ok(result) => McpMessage::response(id, result),
                    Err(error) => McpMessage::error_response(Some(id), error),
                })
            }
            (Some(method), None) => {
                match method {
                    "notifications/initialized" | "initialized" => {
                        info!("client initialized");
                    }
                    "notifications/cancelled" => {
                        debug!("request cancelled");
                    }
                    other => {
                        debug!(method = other, "unknown notification");
                    }
                }
                None
            }
            _ => {
                // Responses are not expected in server mode.
                debug!("ignoring non-request message");
                None
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&mut self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string()))?
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        info!(
            client = %params.client_info.name,
            version = %params.client_info.version,
            "initializing session"
        );

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::with_tools(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        };

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        if !self.initialized {
            debug!("tools/list before initialize");
        }

        let result = ToolsListResult {
            tools: self.tools.clone(),
        };
        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/call request.
    ///
    /// Tool failures become error payloads, never protocol faults; the
    /// process must keep serving after any per-call error.
    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string()))?
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        debug!(tool = %params.name, "calling tool");

        let result = match self.executor.execute(&params.name, params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                error!(tool = %params.name, %e, "tool execution failed");
                ToolCallResult::error(format!("Error: {e}"))
            }
        };

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }
}
