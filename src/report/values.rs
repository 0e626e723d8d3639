//! Ranked value/count table for `msg=values`

use super::{filter_line, group_thousands};
use crate::error::BridgeError;
use crate::search::ValueCount;

/// Render value counts in backend order with grand total and row count
pub fn render_values(
    counts: &[ValueCount],
    meta_key: &str,
    limit: u32,
    time_range: &str,
    where_clause: &str,
) -> Result<String, BridgeError> {
    if counts.is_empty() {
        return Err(BridgeError::EmptyResult(format!(
            "No values found for meta key '{}' with the given filters in the last {}.",
            meta_key, time_range
        )));
    }

    let mut out = format!(
        "**Top {} '{}' Values** (Last {})\n\n",
        limit, meta_key, time_range
    );
    out.push_str(&filter_line(where_clause));
    out.push_str("| Value | Count |\n");
    out.push_str("|-------|-------|\n");

    for item in counts {
        out.push_str(&format!(
            "| {} | {} |\n",
            item.value,
            group_thousands(item.count)
        ));
    }

    let total = counts.iter().fold(0u64, |acc, c| acc.saturating_add(c.count));
    out.push_str(&format!("\n**Total Events**: {}", group_thousands(total)));
    out.push_str(&format!("\n**Unique Values Shown**: {}", counts.len()));

    Ok(out.trim().to_string())
}
