//! The fixed tool catalog
//!
//! Five tools, declared once at startup. The catalog never changes while
//! the process is serving.

use serde_json::{json, Map, Value};

use crate::protocol::{McpInputSchema, McpTool};

fn string_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn object_schema(props: &[(&str, Value)], required: &[&str]) -> McpInputSchema {
    let mut properties = Map::new();
    for (name, schema) in props {
        properties.insert(name.to_string(), schema.clone());
    }
    McpInputSchema {
        schema_type: "object".to_string(),
        properties,
        required: required.iter().map(|r| r.to_string()).collect(),
    }
}

/// Build the tool declarations served by `tools/list`
pub fn tool_catalog() -> Vec<McpTool> {
    vec![
        McpTool {
            name: "get_account_info".to_string(),
            description: "Get account address derived from the configured mnemonic".to_string(),
            input_schema: McpInputSchema::default(),
        },
        McpTool {
            name: "cosmos_query".to_string(),
            description: "Execute any Cosmos SDK query command. Examples: \"bank balance <address> umfx\", \
                          \"staking delegations <address>\", \"distribution rewards <address>\""
                .to_string(),
            input_schema: object_schema(
                &[
                    (
                        "module",
                        string_prop(
                            "The module name (e.g., \"bank\", \"staking\", \"distribution\", \"gov\", \"auth\")",
                        ),
                    ),
                    (
                        "subcommand",
                        string_prop("The subcommand (e.g., \"balance\", \"delegations\", \"rewards\")"),
                    ),
                    (
                        "args",
                        string_prop(
                            "Additional arguments as a space-separated string (e.g., \"address umfx\" or \"validator-address\")",
                        ),
                    ),
                ],
                &["module", "subcommand"],
            ),
        },
        McpTool {
            name: "cosmos_tx".to_string(),
            description: "Execute any Cosmos SDK transaction. Examples: \"bank send <to_address> <amount>umfx\", \
                          \"staking delegate <validator> <amount>umfx\""
                .to_string(),
            input_schema: object_schema(
                &[
                    ("module", string_prop("The module name (e.g., \"bank\", \"staking\")")),
                    (
                        "subcommand",
                        string_prop("The subcommand (e.g., \"send\", \"delegate\")"),
                    ),
                    (
                        "args",
                        string_prop(
                            "Arguments to the transaction, excluding the key name (e.g., \"<to_address> <amount>umfx\")",
                        ),
                    ),
                ],
                &["module", "subcommand", "args"],
            ),
        },
        McpTool {
            name: "list_modules".to_string(),
            description: "List all available query and transaction modules supported by the chain"
                .to_string(),
            input_schema: McpInputSchema::default(),
        },
        McpTool {
            name: "list_module_subcommands".to_string(),
            description: "List all available subcommands for a specific module (query or tx)".to_string(),
            input_schema: object_schema(
                &[
                    (
                        "type",
                        json!({
                            "type": "string",
                            "enum": ["query", "tx"],
                            "description": "Whether to list query or transaction subcommands",
                        }),
                    ),
                    ("module", string_prop("The module name (e.g., \"bank\", \"staking\")")),
                ],
                &["type", "module"],
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_declares_five_tools() {
        let names: Vec<String> = tool_catalog().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "get_account_info",
                "cosmos_query",
                "cosmos_tx",
                "list_modules",
                "list_module_subcommands",
            ]
        );
    }

    #[test]
    fn test_tx_requires_args_but_query_does_not() {
        let catalog = tool_catalog();
        let query = catalog.iter().find(|t| t.name == "cosmos_query").unwrap();
        let tx = catalog.iter().find(|t| t.name == "cosmos_tx").unwrap();
        assert_eq!(query.input_schema.required, vec!["module", "subcommand"]);
        assert_eq!(tx.input_schema.required, vec!["module", "subcommand", "args"]);
    }

    #[test]
    fn test_subcommand_kind_is_an_enum() {
        let catalog = tool_catalog();
        let tool = catalog
            .iter()
            .find(|t| t.name == "list_module_subcommands")
            .unwrap();
        let kind = &tool.input_schema.properties["type"];
        assert_eq!(kind["enum"], serde_json::json!(["query", "tx"]));
    }
}
