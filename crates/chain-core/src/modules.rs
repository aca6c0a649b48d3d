//! Module discovery scraped from the daemon's help text
//!
//! The daemon has no structured command listing, so this parses the
//! "Available Commands:" section of its cobra help output. The layout is
//! owned by the daemon; if it changes, parsing degrades to empty lists
//! rather than failing the call. Subprocess failures still raise.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::cli::ChainCli;
use crate::error::{ChainError, Result};

/// Whether a command operates on queries or transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Query,
    Tx,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Query => "query",
            CommandKind::Tx => "tx",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "query" => Ok(CommandKind::Query),
            "tx" => Ok(CommandKind::Tx),
            _ => Err(ChainError::InvalidCommandKind),
        }
    }
}

/// One entry from an "Available Commands:" listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub description: String,
}

/// Query and transaction module listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableModules {
    pub query_modules: Vec<ModuleInfo>,
    pub tx_modules: Vec<ModuleInfo>,
}

fn columns() -> &'static Regex {
    static COLUMNS: OnceLock<Regex> = OnceLock::new();
    COLUMNS.get_or_init(|| Regex::new(r"\s{2,}").expect("static regex"))
}

/// Extract the "Available Commands:" section from cobra help text.
///
/// A header line containing `Available Commands:` starts capture. Within
/// the section, blank lines are skipped, lines indented by two or more
/// spaces are split on runs of two-or-more spaces into name and
/// description, and the built-in `help`/`h` entries are dropped. The first
/// non-blank, non-indented line ends the section. Missing header means an
/// empty result, never an error.
pub fn parse_help_output(output: &str) -> Vec<ModuleInfo> {
    let mut modules = Vec::new();
    let mut in_section = false;

    for line in output.lines() {
        if line.contains("Available Commands:") {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("  ") {
            let parts: Vec<&str> = columns().split(line.trim()).collect();
            if parts.len() >= 2 {
                let name = parts[0];
                if name == "help" || name == "h" {
                    continue;
                }
                modules.push(ModuleInfo {
                    name: name.to_string(),
                    description: parts[1..].join(" "),
                });
            }
        } else if !line.starts_with(' ') {
            break;
        }
    }

    modules
}

impl ChainCli {
    /// List the query and transaction modules the daemon advertises
    pub async fn available_modules(&self) -> Result<AvailableModules> {
        let query_help = self
            .run(&["query".to_string(), "--help".to_string()], None)
            .await
            .map_err(|e| ChainError::ModuleDiscovery(e.to_string()))?;
        let tx_help = self
            .run(&["tx".to_string(), "--help".to_string()], None)
            .await
            .map_err(|e| ChainError::ModuleDiscovery(e.to_string()))?;

        Ok(AvailableModules {
            query_modules: parse_help_output(&query_help),
            tx_modules: parse_help_output(&tx_help),
        })
    }

    /// List the subcommands of one module
    pub async fn module_subcommands(
        &self,
        kind: CommandKind,
        module: &str,
    ) -> Result<Vec<ModuleInfo>> {
        let argv = vec![
            kind.as_str().to_string(),
            module.to_string(),
            "--help".to_string(),
        ];
        let help = self
            .run(&argv, None)
            .await
            .map_err(|e| ChainError::SubcommandDiscovery {
                kind: kind.to_string(),
                module: module.to_string(),
                message: e.to_string(),
            })?;

        Ok(parse_help_output(&help))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_commands_and_skips_help() {
        let help = "\
Querying commands for the bank module

Usage:
  manifestd query bank [flags]

Available Commands:
  send      Send tokens
  help      Help about any command
";
        let modules = parse_help_output(help);
        assert_eq!(
            modules,
            vec![ModuleInfo {
                name: "send".to_string(),
                description: "Send tokens".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_header_yields_empty() {
        let help = "Usage:\n  manifestd query bank [flags]\n\nFlags:\n  -h, --help\n";
        assert!(parse_help_output(help).is_empty());
    }

    #[test]
    fn test_section_ends_at_unindented_line() {
        let help = "\
Available Commands:
  balances    Query for account balances by address
  params      Query the current bank parameters

Flags:
  denom-owner    this must not be captured
";
        let modules = parse_help_output(help);
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].name, "balances");
        assert_eq!(modules[1].name, "params");
    }

    #[test]
    fn test_blank_lines_inside_section_are_skipped() {
        let help = "\
Available Commands:
  send      Send tokens

  multi-send      Send from one account to two or more accounts
";
        let modules = parse_help_output(help);
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[1].name, "multi-send");
        assert_eq!(
            modules[1].description,
            "Send from one account to two or more accounts"
        );
    }

    #[test]
    fn test_multi_column_description_collapses() {
        let help = "Available Commands:\n  total      Query the total supply    of coins of the chain\n";
        let modules = parse_help_output(help);
        assert_eq!(modules[0].description, "Query the total supply of coins of the chain");
    }

    #[test]
    fn test_single_column_lines_are_ignored() {
        let help = "Available Commands:\n  loneword\n  send      Send tokens\n";
        let modules = parse_help_output(help);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "send");
    }

    #[test]
    fn test_command_kind_round_trip() {
        assert_eq!("query".parse::<CommandKind>().unwrap(), CommandKind::Query);
        assert_eq!("tx".parse::<CommandKind>().unwrap(), CommandKind::Tx);
        let err = "bank".parse::<CommandKind>().unwrap_err();
        assert_eq!(err.to_string(), "type must be either \"query\" or \"tx\"");
    }

    #[cfg(unix)]
    mod daemon {
        use super::*;
        use crate::testutil::{fake_daemon, test_config};
        use crate::ChainCli;
        use tempfile::TempDir;

        #[tokio::test]
        async fn test_available_modules_split_by_kind() {
            let dir = TempDir::new().unwrap();
            let script = r#"if [ "$1" = "query" ]; then
cat <<'HELP'
Available Commands:
  bank      Querying commands for the bank module
  staking      Querying commands for the staking module
HELP
else
cat <<'HELP'
Available Commands:
  bank      Bank transaction subcommands
HELP
fi"#;
            let binary = fake_daemon(&dir, script);
            let cli = ChainCli::new(&test_config(binary.to_str().unwrap()));

            let modules = cli.available_modules().await.unwrap();
            assert_eq!(modules.query_modules.len(), 2);
            assert_eq!(modules.tx_modules.len(), 1);
            assert_eq!(modules.tx_modules[0].name, "bank");
        }

        #[tokio::test]
        async fn test_help_failure_raises() {
            let dir = TempDir::new().unwrap();
            let binary = fake_daemon(&dir, "echo 'unknown module' >&2; exit 1");
            let cli = ChainCli::new(&test_config(binary.to_str().unwrap()));

            let err = cli
                .module_subcommands(CommandKind::Query, "nosuch")
                .await
                .unwrap_err();
            assert!(err
                .to_string()
                .contains("Failed to get subcommands for query nosuch"));
        }
    }
}
