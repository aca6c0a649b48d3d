//! # chain-core
//!
//! Core chain access for manifest-mcp:
//! - environment-derived configuration, resolved once at startup
//! - keyring bootstrap against the daemon's own key store
//! - argv-vector daemon CLI execution with JSON parsing
//! - bank module convenience helpers
//! - module discovery scraped from the daemon help text

pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod modules;
#[cfg(test)]
mod testutil;

pub use bank::{Balance, BankParams, SendEnabled, SendResult};
pub use cli::{ChainCli, QueryResult, TxResult};
pub use config::{Config, Mnemonic, NetworkConfig};
pub use error::{ChainError, Result};
pub use keys::Account;
pub use modules::{parse_help_output, AvailableModules, CommandKind, ModuleInfo};
