//! Error types for chain-core

use thiserror::Error;

/// Result type alias for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Chain access error types
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("{0} environment variable is not set")]
    MissingEnv(&'static str),

    #[error("key initialization failed: {0}")]
    KeyInit(String),

    #[error("key lookup failed: {0}")]
    KeyLookup(String),

    #[error("Query {module} {subcommand} failed: {message}")]
    QueryFailed {
        module: String,
        subcommand: String,
        message: String,
    },

    #[error("Tx {module} {subcommand} failed: {message}")]
    TxFailed {
        module: String,
        subcommand: String,
        message: String,
    },

    #[error("Failed to get available modules: {0}")]
    ModuleDiscovery(String),

    #[error("Failed to get subcommands for {kind} {module}: {message}")]
    SubcommandDiscovery {
        kind: String,
        module: String,
        message: String,
    },

    #[error("type must be either \"query\" or \"tx\"")]
    InvalidCommandKind,

    #[error("daemon exited with status {status}: {stderr}")]
    CommandFailed { status: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
