//! Tool descriptions published to the agent host

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub read_only: bool,
    /// Whether results may contain sensitive network data
    pub sensitive: bool,
    pub parameters: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: &'static str,
}

impl ParamSpec {
    fn required(name: &'static str, kind: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    fn optional(
        name: &'static str,
        kind: &'static str,
        default: Value,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
            description,
        }
    }
}

const WHERE_HELP: &str = "Filter in NetWitness query syntax, e.g. service=443 && ip.src=10.0.0.0/8. \
    Read the query-syntax and meta-keys resources first.";
const TIME_RANGE_HELP: &str = "Relative window ending now: <n>m, <n>h or <n>d, e.g. 30m, 24h";

pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "query_sessions",
            description: "Query NetWitness sessions with a where clause and return every \
                selected meta value grouped by session.",
            read_only: true,
            sensitive: true,
            parameters: vec![
                ParamSpec::optional("where_clause", "string", json!(""), WHERE_HELP),
                ParamSpec::optional(
                    "select_clause",
                    "string",
                    json!(""),
                    "Comma-separated meta keys to return; all keys when empty",
                ),
                ParamSpec::optional("time_range", "string", json!("1h"), TIME_RANGE_HELP),
                ParamSpec::optional(
                    "max_results",
                    "integer",
                    json!(1000),
                    "Maximum number of meta values returned",
                ),
            ],
        },
        ToolSpec {
            name: "query_metakey_values",
            description: "Top-N values of one meta key with session counts, \
                optionally restricted by a where clause.",
            read_only: true,
            sensitive: true,
            parameters: vec![
                ParamSpec::required("meta_key", "string", "Meta key to aggregate, e.g. ip.dst"),
                ParamSpec::optional("where_clause", "string", json!(""), WHERE_HELP),
                ParamSpec::optional("time_range", "string", json!("1h"), TIME_RANGE_HELP),
                ParamSpec::optional("limit", "integer", json!(100), "Number of values to return"),
                ParamSpec::optional(
                    "sort_order",
                    "string",
                    json!("descending"),
                    "'descending' (most common first) or 'ascending' (least common first)",
                ),
            ],
        },
        ToolSpec {
            name: "query_alerts",
            description: "Alerts raised by the NetWitness Admin Server in a time range, \
                with priority, timestamp and group-by fields.",
            read_only: true,
            sensitive: true,
            parameters: vec![
                ParamSpec::optional("time_range", "string", json!("1h"), TIME_RANGE_HELP),
                ParamSpec::optional(
                    "max_results",
                    "integer",
                    json!(100),
                    "Maximum number of alerts returned",
                ),
            ],
        },
        ToolSpec {
            name: "get_netwitness_meta_keys",
            description: "The meta key reference. Use before building any query.",
            read_only: true,
            sensitive: false,
            parameters: vec![],
        },
        ToolSpec {
            name: "get_netwitness_query_syntax",
            description: "The query syntax guide with operators and examples. \
                Use before building any query.",
            read_only: true,
            sensitive: false,
            parameters: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        let specs = tool_specs();
        let mut names: Vec<_> = specs.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), specs.len());
        assert!(specs.iter().all(|s| s.read_only));
    }

    #[test]
    fn test_meta_key_is_required() {
        let specs = tool_specs();
        let values = specs
            .iter()
            .find(|s| s.name == "query_metakey_values")
            .unwrap();
        let meta_key = values.parameters.iter().find(|p| p.name == "meta_key").unwrap();
        assert!(meta_key.required);
        assert!(meta_key.default.is_none());
    }
}
