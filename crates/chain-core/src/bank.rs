//! Bank module convenience helpers
//!
//! Thin specializations of the generic runner for the most common bank
//! operations. The query helpers degrade to empty defaults on failure;
//! `send_tokens` propagates errors because it mutates chain state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::cli::ChainCli;
use crate::error::Result;

/// A single denomination balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub denom: String,
    pub amount: String,
}

/// Per-denom send toggle from the bank params
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEnabled {
    pub denom: String,
    pub enabled: bool,
}

/// Bank module parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankParams {
    #[serde(default)]
    pub send_enabled: Vec<SendEnabled>,
    #[serde(default = "default_send_enabled")]
    pub default_send_enabled: bool,
}

fn default_send_enabled() -> bool {
    true
}

impl Default for BankParams {
    fn default() -> Self {
        Self {
            send_enabled: Vec::new(),
            default_send_enabled: true,
        }
    }
}

/// Result of a bank send, including the gas accounting fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    pub transaction_hash: String,
    pub code: i64,
    pub height: String,
    pub gas_used: String,
    pub gas_wanted: String,
}

#[derive(Deserialize)]
struct BalanceResponse {
    balance: Option<Balance>,
}

#[derive(Deserialize)]
struct AllBalancesResponse {
    #[serde(default)]
    balances: Vec<Balance>,
}

#[derive(Deserialize)]
struct BankParamsResponse {
    params: Option<BankParams>,
}

impl ChainCli {
    /// Query the balance of one denom for an address.
    ///
    /// Returns `None` when the daemon call fails or the response carries no
    /// balance; read failures are logged, not raised.
    pub async fn balance(&self, address: &str, denom: &str) -> Option<Balance> {
        let args = [address.to_string(), denom.to_string()];
        match self.query_json("bank", "balance", &args).await {
            Ok(value) => serde_json::from_value::<BalanceResponse>(value)
                .ok()
                .and_then(|r| r.balance),
            Err(err) => {
                warn!(%address, %denom, %err, "balance query failed");
                None
            }
        }
    }

    /// Query all balances for an address.
    ///
    /// An account with no balances yields an empty list; so does a failed
    /// daemon call (logged, not raised).
    pub async fn all_balances(&self, address: &str) -> Vec<Balance> {
        let args = [address.to_string()];
        match self.query_json("bank", "balances", &args).await {
            Ok(value) => serde_json::from_value::<AllBalancesResponse>(value)
                .map(|r| r.balances)
                .unwrap_or_default(),
            Err(err) => {
                warn!(%address, %err, "balances query failed");
                Vec::new()
            }
        }
    }

    /// Query the bank module parameters, falling back to defaults on failure
    pub async fn bank_params(&self) -> BankParams {
        match self.query_json("bank", "params", &[]).await {
            Ok(value) => serde_json::from_value::<BankParamsResponse>(value)
                .ok()
                .and_then(|r| r.params)
                .unwrap_or_default(),
            Err(err) => {
                warn!(%err, "bank params query failed");
                BankParams::default()
            }
        }
    }

    /// Send tokens from the configured key to `to_address`
    pub async fn send_tokens(
        &self,
        to_address: &str,
        amount: &str,
        denom: &str,
    ) -> Result<SendResult> {
        let args = [to_address.to_string(), format!("{amount}{denom}")];
        let result = self.broadcast_json("bank", "send", &args).await?;
        Ok(SendResult {
            transaction_hash: string_field(&result, "txhash"),
            code: result.get("code").and_then(Value::as_i64).unwrap_or(0),
            height: string_field(&result, "height"),
            gas_used: string_field(&result, "gas_used"),
            gas_wanted: string_field(&result, "gas_wanted"),
        })
    }
}

fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
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
    async fn test_balance_present() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(
            &dir,
            r#"echo '{"balance":{"denom":"umfx","amount":"5000"}}'"#,
        );
        let cli = cli_with(binary.to_str().unwrap());

        let balance = cli.balance("manifest1abc", "umfx").await.unwrap();
        assert_eq!(
            balance,
            Balance {
                denom: "umfx".to_string(),
                amount: "5000".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_balance_degrades_to_none_on_failure() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(&dir, "echo 'no rpc' >&2; exit 1");
        let cli = cli_with(binary.to_str().unwrap());

        assert!(cli.balance("manifest1abc", "umfx").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_balances_yield_empty_list() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(
            &dir,
            r#"echo '{"balances":[],"pagination":{"total":"0"}}'"#,
        );
        let cli = cli_with(binary.to_str().unwrap());

        assert!(cli.all_balances("manifest1abc").await.is_empty());
    }

    #[tokio::test]
    async fn test_bank_params_default_on_failure() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(&dir, "exit 1");
        let cli = cli_with(binary.to_str().unwrap());

        let params = cli.bank_params().await;
        assert!(params.send_enabled.is_empty());
        assert!(params.default_send_enabled);
    }

    #[tokio::test]
    async fn test_send_tokens_extracts_gas_fields() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(
            &dir,
            r#"echo '{"txhash":"BEEF","code":0,"height":"77","gas_used":"61234","gas_wanted":"80000"}'"#,
        );
        let cli = cli_with(binary.to_str().unwrap());

        let result = cli.send_tokens("manifest1dest", "100", "umfx").await.unwrap();
        assert_eq!(result.transaction_hash, "BEEF");
        assert_eq!(result.gas_used, "61234");
        assert_eq!(result.gas_wanted, "80000");
    }

    #[tokio::test]
    async fn test_send_tokens_propagates_errors() {
        let dir = TempDir::new().unwrap();
        let binary = fake_daemon(&dir, "echo 'insufficient funds' >&2; exit 5");
        let cli = cli_with(binary.to_str().unwrap());

        let err = cli
            .send_tokens("manifest1dest", "100", "umfx")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Tx bank send failed"));
    }
}
