//! Keyring bootstrap against the daemon's own key store
//!
//! Key material never lives in this process: the daemon keyring owns the
//! signing key, and this module only guarantees the configured entry exists
//! before any transaction is attempted.

use serde::Serialize;
use tracing::{debug, info};

use crate::cli::ChainCli;
use crate::config::Mnemonic;
use crate::error::{ChainError, Result};

/// A signing account resolved from the daemon keyring
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub address: String,
    pub name: String,
}

impl ChainCli {
    /// Ensure the configured key exists in the daemon keyring, recovering it
    /// from the mnemonic if the lookup fails.
    ///
    /// Any lookup failure is treated as "not found". The failure is logged
    /// before recovery so daemon-side errors are not completely invisible.
    /// A failed recovery is fatal; callers abort startup on it.
    pub async fn ensure_key(&self, mnemonic: &Mnemonic) -> Result<()> {
        let key_name = self.key_name().to_string();
        let show = vec!["keys".to_string(), "show".to_string(), key_name.clone()];

        match self.run(&show, None).await {
            Ok(_) => {
                debug!(key = %key_name, "keyring entry already present");
                Ok(())
            }
            Err(err) => {
                debug!(key = %key_name, %err, "key lookup failed, recovering from mnemonic");
                let add = vec![
                    "keys".to_string(),
                    "add".to_string(),
                    key_name.clone(),
                    "--recover".to_string(),
                ];
                self.run(&add, Some(mnemonic.expose()))
                    .await
                    .map_err(|e| ChainError::KeyInit(e.to_string()))?;
                info!(key = %key_name, "recovered signing key from mnemonic");
                Ok(())
            }
        }
    }

    /// Resolve the configured key to its address
    pub async fn account(&self) -> Result<Account> {
        let argv = vec![
            "keys".to_string(),
            "show".to_string(),
            self.key_name().to_string(),
            "-a".to_string(),
        ];
        let stdout = self
            .run(&argv, None)
            .await
            .map_err(|e| ChainError::KeyLookup(e.to_string()))?;

        Ok(Account {
            address: stdout.trim().to_string(),
            name: self.key_name().to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::{fake_daemon, test_config};
    use tempfile::TempDir;

    fn cli_with(binary: &str) -> ChainCli {
        ChainCli::new(&test_config(binary))
    }

    #[tokio::test]
    async fn test_existing_key_skips_recovery() {
        let dir = TempDir::new().unwrap();
        // `keys show` succeeds; any `keys add` leaves a marker behind.
        let script = format!(
            r#"case "$1 $2" in
"keys show") echo '- name: mcp-key'; exit 0;;
"keys add") touch {marker}; exit 0;;
esac
exit 1"#,
            marker = dir.path().join("recovered").display()
        );
        let binary = fake_daemon(&dir, &script);
        let cli = cli_with(binary.to_str().unwrap());

        cli.ensure_key(&Mnemonic::new("word word word")).await.unwrap();
        assert!(
            !dir.path().join("recovered").exists(),
            "recovery must not run when the key already exists"
        );
    }

    #[tokio::test]
    async fn test_missing_key_recovers_from_stdin() {
        let dir = TempDir::new().unwrap();
        let captured = dir.path().join("stdin");
        let script = format!(
            r#"case "$1 $2" in
"keys show") echo 'key not found' >&2; exit 1;;
"keys add") cat > {captured}; exit 0;;
esac
exit 1"#,
            captured = captured.display()
        );
        let binary = fake_daemon(&dir, &script);
        let cli = cli_with(binary.to_str().unwrap());

        let mnemonic = Mnemonic::new("tip purse since square taste soccer");
        cli.ensure_key(&mnemonic).await.unwrap();

        let fed = std::fs::read_to_string(&captured).unwrap();
        assert_eq!(fed, "tip purse since square taste soccer");
    }

    #[tokio::test]
    async fn test_failed_recovery_is_fatal() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(&dir, "echo 'keyring unavailable' >&2; exit 1");
        let cli = cli_with(binary.to_str().unwrap());

        let err = cli
            .ensure_key(&Mnemonic::new("word word word"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::KeyInit(_)));
        assert!(err.to_string().contains("keyring unavailable"));
    }

    #[tokio::test]
    async fn test_account_trims_address_output() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(&dir, "echo 'manifest1qqxuev03psr8t4zpa0935ylxlpz6rv2y6sdxgq'");
        let cli = cli_with(binary.to_str().unwrap());

        let account = cli.account().await.unwrap();
        assert_eq!(
            account.address,
            "manifest1qqxuev03psr8t4zpa0935ylxlpz6rv2y6sdxgq"
        );
        assert_eq!(account.name, "mcp-key");
    }
}
