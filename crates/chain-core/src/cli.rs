//! Daemon CLI execution
//!
//! Every chain operation shells out to the configured daemon binary and
//! parses its JSON stdout. Arguments are always passed as a discrete vector
//! to the subprocess API; nothing is ever concatenated into a shell string,
//! so argument values cannot change command semantics.

use std::process::Stdio;

use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::{Config, NetworkConfig};
use crate::error::{ChainError, Result};

/// Handle for invoking the chain daemon CLI
///
/// Holds only read-only configuration, so it is freely shareable across
/// concurrent calls; each call spawns its own subprocess.
#[derive(Debug, Clone)]
pub struct ChainCli {
    binary: String,
    key_name: String,
    network: NetworkConfig,
}

/// Result of a generic query invocation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub module: String,
    pub subcommand: String,
    pub result: Value,
}

/// Result of a generic transaction broadcast
///
/// `code` 0 means the node accepted the transaction, not that it is
/// finalized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResult {
    pub module: String,
    pub subcommand: String,
    pub transaction_hash: String,
    pub code: i64,
    pub height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_log: Option<String>,
}

impl ChainCli {
    /// Create a handle from resolved configuration
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.binary.clone(),
            key_name: config.key_name.clone(),
            network: config.network.clone(),
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Argument vector for a query invocation
    pub fn query_args(&self, module: &str, subcommand: &str, args: &[String]) -> Vec<String> {
        let mut argv = vec![
            "query".to_string(),
            module.to_string(),
            subcommand.to_string(),
        ];
        argv.extend(args.iter().cloned());
        argv.extend([
            "--output".to_string(),
            "json".to_string(),
            "--node".to_string(),
            self.network.rpc_url.clone(),
        ]);
        argv
    }

    /// Argument vector for a transaction invocation
    ///
    /// The signing key name is always the first positional argument after
    /// the subcommand; callers pass only the remaining arguments.
    pub fn tx_args(&self, module: &str, subcommand: &str, args: &[String]) -> Vec<String> {
        let mut argv = vec![
            "tx".to_string(),
            module.to_string(),
            subcommand.to_string(),
            self.key_name.clone(),
        ];
        argv.extend(args.iter().cloned());
        argv.extend([
            "--yes".to_string(),
            "--output".to_string(),
            "json".to_string(),
            "--node".to_string(),
            self.network.rpc_url.clone(),
            "--chain-id".to_string(),
            self.network.chain_id.clone(),
            "--gas-prices".to_string(),
            self.network.gas_price.clone(),
        ]);
        argv
    }

    /// Execute a generic query command against the daemon
    pub async fn query(&self, module: &str, subcommand: &str, args: &[String]) -> Result<QueryResult> {
        let result = self.query_json(module, subcommand, args).await?;
        Ok(QueryResult {
            module: module.to_string(),
            subcommand: subcommand.to_string(),
            result,
        })
    }

    /// Execute a generic transaction against the daemon
    pub async fn tx(&self, module: &str, subcommand: &str, args: &[String]) -> Result<TxResult> {
        let result = self.broadcast_json(module, subcommand, args).await?;
        Ok(TxResult {
            module: module.to_string(),
            subcommand: subcommand.to_string(),
            transaction_hash: field_string(&result, "txhash"),
            code: result.get("code").and_then(Value::as_i64).unwrap_or(0),
            height: field_string(&result, "height"),
            raw_log: result
                .get("raw_log")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Run a query and parse its stdout as JSON
    pub(crate) async fn query_json(
        &self,
        module: &str,
        subcommand: &str,
        args: &[String],
    ) -> Result<Value> {
        let argv = self.query_args(module, subcommand, args);
        let wrap = |message: String| ChainError::QueryFailed {
            module: module.to_string(),
            subcommand: subcommand.to_string(),
            message,
        };
        let stdout = self.run(&argv, None).await.map_err(|e| wrap(e.to_string()))?;
        serde_json::from_str(&stdout).map_err(|e| wrap(e.to_string()))
    }

    /// Broadcast a transaction and parse its stdout as JSON
    pub(crate) async fn broadcast_json(
        &self,
        module: &str,
        subcommand: &str,
        args: &[String],
    ) -> Result<Value> {
        let argv = self.tx_args(module, subcommand, args);
        let wrap = |message: String| ChainError::TxFailed {
            module: module.to_string(),
            subcommand: subcommand.to_string(),
            message,
        };
        let stdout = self.run(&argv, None).await.map_err(|e| wrap(e.to_string()))?;
        serde_json::from_str(&stdout).map_err(|e| wrap(e.to_string()))
    }

    /// Spawn the daemon with the given argument vector and wait for it.
    ///
    /// Blocks the calling task until the subprocess exits; there is no
    /// timeout, so a hung daemon hangs the in-flight call. Returns stdout on
    /// success; a non-zero exit surfaces the daemon's stderr.
    pub(crate) async fn run(&self, argv: &[String], stdin: Option<&str>) -> Result<String> {
        debug!(binary = %self.binary, ?argv, "invoking daemon");

        let mut command = Command::new(&self.binary);
        command
            .args(argv)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;

        if let Some(input) = stdin {
            if let Some(mut handle) = child.stdin.take() {
                handle.write_all(input.as_bytes()).await?;
                // Dropping the handle closes the pipe so the child sees EOF.
            }
        }

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(ChainError::CommandFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Stringify a JSON field the way the daemon's callers expect: strings
/// verbatim, numbers rendered, absent/null as empty.
fn field_string(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
