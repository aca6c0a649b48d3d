//! Test helpers: fake daemon binaries backed by shell scripts

use crate::config::{Config, Mnemonic, NetworkConfig};

pub(crate) fn test_config(binary: &str) -> Config {
    Config {
        network: NetworkConfig {
            chain_id: "manifest-ledger-testnet".to_string(),
            rpc_url: "http://localhost:26657".to_string(),
            rest_url: "http://localhost:1317".to_string(),
            denom: "umfx".to_string(),
            gas_price: "1.0umfx".to_string(),
        },
        key_name: "mcp-key".to_string(),
        binary: binary.to_string(),
        mnemonic: Mnemonic::new("abandon ability able about above absent"),
    }
}

/// Write an executable shell script standing in for the daemon binary
#[cfg(unix)]
pub(crate) fn fake_daemon(dir: &tempfile::TempDir, script: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("manifestd");
    std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
