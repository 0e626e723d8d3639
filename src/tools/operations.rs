//! The callable tool operations
//!
//! Each operation resolves its time window, composes the request, makes the
//! upstream call(s) and formats the result. Errors stop here: the caller only
//! ever sees a [`ToolOutput`].

use serde::{Deserialize, Serialize};

use super::reference;
use crate::alerts::AlertClient;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::query::{
    session_params, session_query, values_params, SortOrder, TimeRange, DEFAULT_TIME_RANGE,
};
use crate::report::{render_alerts, render_sessions, render_values};
use crate::search::SearchClient;

/// Text block handed back to the tool host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionQueryArgs {
    pub where_clause: String,
    pub select_clause: String,
    pub time_range: String,
    pub max_results: u32,
}

impl Default for SessionQueryArgs {
    fn default() -> Self {
        Self {
            where_clause: String::new(),
            select_clause: String::new(),
            time_range: DEFAULT_TIME_RANGE.to_string(),
            max_results: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetaValuesArgs {
    pub meta_key: String,
    pub where_clause: String,
    pub time_range: String,
    pub limit: u32,
    pub sort_order: String,
}

impl Default for MetaValuesArgs {
    fn default() -> Self {
        Self {
            meta_key: String::new(),
            where_clause: String::new(),
            time_range: DEFAULT_TIME_RANGE.to_string(),
            limit: 100,
            sort_order: "descending".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertQueryArgs {
    pub time_range: String,
    pub max_results: u32,
}

impl Default for AlertQueryArgs {
    fn default() -> Self {
        Self {
            time_range: DEFAULT_TIME_RANGE.to_string(),
            max_results: 100,
        }
    }
}

/// Errors from dispatching a call by name, before any operation runs
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

/// Holds the two upstream clients; no per-call state lives here
#[derive(Debug)]
pub struct Bridge {
    search: SearchClient,
    alerts: AlertClient,
}

impl Bridge {
    pub fn new(config: &BridgeConfig) -> Result<Self, BridgeError> {
        Ok(Self {
            search: SearchClient::new(config.search.clone(), &config.http)?,
            alerts: AlertClient::new(config.admin.clone(), &config.http)?,
        })
    }

    pub fn alert_client(&self) -> &AlertClient {
        &self.alerts
    }

    /// Session search rendered as per-session blocks
    pub async fn query_sessions(&self, args: SessionQueryArgs) -> ToolOutput {
        tracing::info!(
            select = %args.select_clause,
            where_clause = %args.where_clause,
            time_range = %args.time_range,
            max_results = args.max_results,
            "Executing query_sessions"
        );
        finish("query_sessions", self.run_query_sessions(&args).await)
    }

    async fn run_query_sessions(&self, args: &SessionQueryArgs) -> Result<String, BridgeError> {
        self.search.config().validate()?;

        let range = TimeRange::parse(&args.time_range);
        let query = session_query(&args.select_clause, &args.where_clause, &range);
        let records = self
            .search
            .query(&session_params(&query, args.max_results))
            .await?;

        render_sessions(&records, range.as_str(), &args.where_clause)
    }

    /// Top-N values of one meta key with counts
    pub async fn query_metakey_values(&self, args: MetaValuesArgs) -> ToolOutput {
        tracing::info!(
            meta_key = %args.meta_key,
            where_clause = %args.where_clause,
            time_range = %args.time_range,
            limit = args.limit,
            sort_order = %args.sort_order,
            "Executing query_metakey_values"
        );
        finish("query_metakey_values", self.run_metakey_values(&args).await)
    }

    async fn run_metakey_values(&self, args: &MetaValuesArgs) -> Result<String, BridgeError> {
        self.search.config().validate()?;

        let order: SortOrder = args.sort_order.parse()?;
        let meta_key = args.meta_key.trim();
        if meta_key.is_empty() {
            return Err(BridgeError::Validation("meta_key is required".to_string()));
        }

        let range = TimeRange::parse(&args.time_range);
        let params = values_params(meta_key, &args.where_clause, &range, args.limit, order);
        let counts = self.search.values(&params).await?;

        render_values(
            &counts,
            meta_key,
            args.limit,
            range.as_str(),
            &args.where_clause,
        )
    }

    /// Alerts in an absolute window ending now
    pub async fn query_alerts(&self, args: AlertQueryArgs) -> ToolOutput {
        tracing::info!(
            time_range = %args.time_range,
            max_results = args.max_results,
            "Executing query_alerts"
        );
        finish("query_alerts", self.run_query_alerts(&args).await)
    }

    async fn run_query_alerts(&self, args: &AlertQueryArgs) -> Result<String, BridgeError> {
        let range = TimeRange::parse(&args.time_range);
        let window = range.absolute_bounds();
        let alerts = self.alerts.fetch_alerts(&window, args.max_results).await?;

        render_alerts(&alerts, range.as_str())
    }

    /// Dispatch a call by tool name with JSON arguments
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<ToolOutput, ToolCallError> {
        let args = match args {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        match name {
            "query_sessions" => Ok(self.query_sessions(parse_args(name, args)?).await),
            "query_metakey_values" => Ok(self.query_metakey_values(parse_args(name, args)?).await),
            "query_alerts" => Ok(self.query_alerts(parse_args(name, args)?).await),
            "get_netwitness_meta_keys" => Ok(ToolOutput::text(reference::meta_keys())),
            "get_netwitness_query_syntax" => Ok(ToolOutput::text(reference::query_syntax())),
            other => Err(ToolCallError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(
    tool: &str,
    args: serde_json::Value,
) -> Result<T, ToolCallError> {
    serde_json::from_value(args).map_err(|e| ToolCallError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Convert an operation result into tool output, logging failures once
fn finish(tool: &'static str, result: Result<String, BridgeError>) -> ToolOutput {
    match result {
        Ok(content) => ToolOutput::text(content),
        Err(e) if e.is_empty_result() => {
            tracing::info!(tool = %tool, "{}", e);
            ToolOutput::text(e.to_tool_text())
        }
        Err(e) => {
            let content = e.to_tool_text();
            tracing::error!(tool = %tool, error = %e, "{}", content);
            ToolOutput {
                content,
                is_error: true,
            }
        }
    }
}
