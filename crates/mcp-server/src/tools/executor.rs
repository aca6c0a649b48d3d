//! Execute MCP tools by dispatching to the chain CLI

use std::sync::Arc;

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use chain_core::{ChainCli, ChainError, CommandKind};

use crate::protocol::ToolCallResult;

/// Tool dispatch error types
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Executor for the fixed tool set
pub struct ToolExecutor {
    chain: Arc<ChainCli>,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new(chain: Arc<ChainCli>) -> Self {
        Self { chain }
    }

    /// Execute a tool by name.
    ///
    /// Every failure path returns an error the handler turns into an error
    /// payload; nothing here may take the process down.
    pub async fn execute(
        &self,
        tool_name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolCallResult, ToolError> {
        let args = arguments.unwrap_or_else(|| Value::Object(Map::new()));
        debug!(tool = tool_name, "executing tool");

        match tool_name {
            "get_account_info" => {
                let account = self.chain.account().await?;
                Ok(ToolCallResult::text(serde_json::to_string_pretty(&account)?))
            }

            "cosmos_query" => {
                let (module, subcommand) = match (
                    required_str(&args, "module"),
                    required_str(&args, "subcommand"),
                ) {
                    (Some(module), Some(subcommand)) => (module, subcommand),
                    _ => {
                        return Err(ToolError::InvalidArguments(
                            "module and subcommand are required".to_string(),
                        ))
                    }
                };
                let argv = split_args(args.get("args").and_then(Value::as_str).unwrap_or(""));
                let result = self.chain.query(module, subcommand, &argv).await?;
                Ok(ToolCallResult::text(serde_json::to_string_pretty(&result)?))
            }

            "cosmos_tx" => {
                let (module, subcommand, args_str) = match (
                    required_str(&args, "module"),
                    required_str(&args, "subcommand"),
                    required_str(&args, "args"),
                ) {
                    (Some(module), Some(subcommand), Some(args_str)) => {
                        (module, subcommand, args_str)
                    }
                    _ => {
                        return Err(ToolError::InvalidArguments(
                            "module, subcommand, and args are required".to_string(),
                        ))
                    }
                };
                let argv = split_args(args_str);
                let result = self.chain.tx(module, subcommand, &argv).await?;
                Ok(ToolCallResult::text(serde_json::to_string_pretty(&result)?))
            }

            "list_modules" => {
                let modules = self.chain.available_modules().await?;
                Ok(ToolCallResult::text(serde_json::to_string_pretty(&modules)?))
            }

            "list_module_subcommands" => {
                let (kind_str, module) = match (
                    required_str(&args, "type"),
                    required_str(&args, "module"),
                ) {
                    (Some(kind), Some(module)) => (kind, module),
                    _ => {
                        return Err(ToolError::InvalidArguments(
                            "type and module are required".to_string(),
                        ))
                    }
                };
                let kind: CommandKind = kind_str.parse()?;
                let subcommands = self.chain.module_subcommands(kind, module).await?;
                let result = json!({
                    "type": kind,
                    "module": module,
                    "subcommands": subcommands,
                });
                Ok(ToolCallResult::text(serde_json::to_string_pretty(&result)?))
            }

            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// A present, non-empty string argument
fn required_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Split a space-separated argument string into discrete argv elements
fn split_args(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}
