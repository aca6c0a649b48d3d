//! Process configuration resolved from the environment
//!
//! Everything is read once at startup by [`Config::from_env`] and handed to
//! components explicitly; no other code in the workspace touches the
//! environment.

use std::env;
use std::fmt;

use zeroize::Zeroizing;

use crate::error::{ChainError, Result};

/// Keyring entry name used when `COSMOS_KEY_NAME` is unset
pub const DEFAULT_KEY_NAME: &str = "mcp-key";

/// Daemon binary invoked when `COSMOS_BINARY` is unset
pub const DEFAULT_BINARY: &str = "manifestd";

/// Network parameters for the target chain
///
/// Loaded once at process start; read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub rpc_url: String,
    pub rest_url: String,
    pub denom: String,
    pub gas_price: String,
}

/// Signing key mnemonic, zeroized on drop and redacted in Debug output
pub struct Mnemonic(Zeroizing<String>);

impl Mnemonic {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(Zeroizing::new(phrase.into()))
    }

    /// Access the raw phrase. Only the key initializer needs this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mnemonic(<redacted>)")
    }
}

/// Full process configuration
#[derive(Debug)]
pub struct Config {
    pub network: NetworkConfig,
    pub key_name: String,
    pub binary: String,
    pub mnemonic: Mnemonic,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// Required variables: `COSMOS_CHAIN_ID`, `COSMOS_RPC_URL`,
    /// `COSMOS_REST_URL`, `COSMOS_DENOM`, `COSMOS_GAS_PRICE`,
    /// `COSMOS_MNEMONIC`. A missing (or empty) required variable is a fatal
    /// configuration error naming the variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Resolve configuration through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset, matching how shells commonly
    /// export placeholder variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| -> Result<String> {
            match lookup(var) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(ChainError::MissingEnv(var)),
            }
        };
        let optional = |var: &'static str, default: &str| -> String {
            match lookup(var) {
                Some(value) if !value.is_empty() => value,
                _ => default.to_string(),
            }
        };

        Ok(Self {
            network: NetworkConfig {
                chain_id: require("COSMOS_CHAIN_ID")?,
                rpc_url: require("COSMOS_RPC_URL")?,
                rest_url: require("COSMOS_REST_URL")?,
                denom: require("COSMOS_DENOM")?,
                gas_price: require("COSMOS_GAS_PRICE")?,
            },
            key_name: optional("COSMOS_KEY_NAME", DEFAULT_KEY_NAME),
            binary: optional("COSMOS_BINARY", DEFAULT_BINARY),
            mnemonic: Mnemonic::new(require("COSMOS_MNEMONIC")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("COSMOS_CHAIN_ID", "manifest-ledger-testnet"),
            ("COSMOS_RPC_URL", "https://nodes.example.com/rpc"),
            ("COSMOS_REST_URL", "https://nodes.example.com/api"),
            ("COSMOS_DENOM", "umfx"),
            ("COSMOS_GAS_PRICE", "1.0umfx"),
            ("COSMOS_MNEMONIC", "abandon ability able about above absent"),
        ])
    }

    fn lookup_in(env: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |var| env.get(var).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_in(full_env())).unwrap();
        assert_eq!(config.key_name, "mcp-key");
        assert_eq!(config.binary, "manifestd");
        assert_eq!(config.network.chain_id, "manifest-ledger-testnet");
        assert_eq!(config.network.gas_price, "1.0umfx");
    }

    #[test]
    fn test_overrides_respected() {
        let mut env = full_env();
        env.insert("COSMOS_KEY_NAME", "alice");
        env.insert("COSMOS_BINARY", "/usr/local/bin/manifestd");
        let config = Config::from_lookup(lookup_in(env)).unwrap();
        assert_eq!(config.key_name, "alice");
        assert_eq!(config.binary, "/usr/local/bin/manifestd");
    }

    #[test]
    fn test_missing_required_names_variable() {
        let mut env = full_env();
        env.remove("COSMOS_MNEMONIC");
        let err = Config::from_lookup(lookup_in(env)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "COSMOS_MNEMONIC environment variable is not set"
        );
    }

    #[test]
    fn test_empty_value_treated_as_missing() {
        let mut env = full_env();
        env.insert("COSMOS_GAS_PRICE", "");
        let err = Config::from_lookup(lookup_in(env)).unwrap_err();
        assert!(err.to_string().contains("COSMOS_GAS_PRICE"));
    }

    #[test]
    fn test_mnemonic_debug_redacted() {
        let config = Config::from_lookup(lookup_in(full_env())).unwrap();
        let rendered = format!("{:?}", config.mnemonic);
        assert_eq!(rendered, "Mnemonic(<redacted>)");
        assert_eq!(config.mnemonic.expose(), "abandon ability able about above absent");
    }
}
