//! Builds `sdk` requests from caller fragments
//!
//! Caller where-text is treated as opaque: it is trimmed and conjoined in
//! front of the generated time predicate, never parsed or rewritten.

use std::str::FromStr;

use reqwest::Url;

use super::window::TimeRange;
use crate::error::BridgeError;

/// Direction for value aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Flag understood by `msg=values`
    pub fn flag(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "order-ascending",
            SortOrder::Descending => "order-descending",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

impl FromStr for SortOrder {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            _ => Err(BridgeError::Validation(format!(
                "sort_order must be 'descending' or 'ascending', got '{}'",
                s
            ))),
        }
    }
}

/// `[<where> &&] <time predicate>`
pub fn where_with_time(where_clause: &str, range: &TimeRange) -> String {
    let time_filter = range.relative_filter();
    let where_clause = where_clause.trim();
    if where_clause.is_empty() {
        time_filter
    } else {
        format!("{} && {}", where_clause, time_filter)
    }
}

/// `select <fields> where [<where> &&] <time predicate>`
pub fn session_query(select_clause: &str, where_clause: &str, range: &TimeRange) -> String {
    let select_clause = match select_clause.trim() {
        "" => "*",
        fields => fields,
    };
    format!(
        "select {} where {}",
        select_clause,
        where_with_time(where_clause, range)
    )
}

/// Parameters for a session search (`msg=query`)
pub fn session_params(query: &str, max_results: u32) -> Vec<(&'static str, String)> {
    vec![
        ("msg", "query".to_string()),
        ("force-content-type", "application/json".to_string()),
        ("size", max_results.to_string()),
        ("query", query.to_string()),
    ]
}

/// Parameters for a top-N value aggregation (`msg=values`)
pub fn values_params(
    meta_key: &str,
    where_clause: &str,
    range: &TimeRange,
    limit: u32,
    order: SortOrder,
) -> Vec<(&'static str, String)> {
    vec![
        ("msg", "values".to_string()),
        ("force-content-type", "application/json".to_string()),
        ("size", limit.to_string()),
        ("fieldName", meta_key.to_string()),
        ("flags", format!("sessions,sort-total,{}", order.flag())),
        ("where", where_with_time(where_clause, range)),
    ]
}

/// Append `path` to a configured base URL and percent-encode `params` onto it
pub fn endpoint_url(
    base: &str,
    path: &str,
    params: &[(&str, String)],
) -> Result<Url, BridgeError> {
    let raw = format!("{}{}", base.trim().trim_end_matches('/'), path);
    Url::parse_with_params(&raw, params)
        .map_err(|e| BridgeError::Configuration(format!("invalid base URL '{}': {}", base, e)))
}
