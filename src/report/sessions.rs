//! Regroups the flat `msg=query` field stream into per-session blocks

use std::collections::HashSet;

use super::filter_line;
use crate::error::BridgeError;
use crate::search::{FieldRecord, NOT_AVAILABLE};

/// Group currently being written
///
/// `Unset` is distinct from every real group, including a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurrentGroup<'a> {
    Unset,
    Active(Option<&'a str>),
}

/// Render session records; the backend delivers them group-contiguous.
pub fn render_sessions(
    records: &[FieldRecord],
    time_range: &str,
    where_clause: &str,
) -> Result<String, BridgeError> {
    if records.is_empty() {
        return Err(BridgeError::EmptyResult(format!(
            "No results found for the given query in the last {}.",
            time_range
        )));
    }

    let mut out = format!("**NetWitness Query Results** (Last {})\n\n", time_range);
    out.push_str(&filter_line(where_clause));

    let mut lines = Vec::with_capacity(records.len() * 2);
    let mut current = CurrentGroup::Unset;

    for record in records {
        let group = record.group.as_deref();
        if current != CurrentGroup::Active(group) {
            if current != CurrentGroup::Unset {
                lines.push("---".to_string());
            }
            lines.push(format!(
                "**Session ID**: {}",
                group.unwrap_or(NOT_AVAILABLE)
            ));
            current = CurrentGroup::Active(group);
        }
        lines.push(format!("- **{}**: {}", record.field_type, record.value));
    }

    out.push_str(&lines.join("\n"));
    out.push_str(&format!(
        "\n\n**Total Sessions**: {}",
        distinct_sessions(records)
    ));

    Ok(out.trim().to_string())
}

/// Number of distinct, non-empty group ids
pub fn distinct_sessions(records: &[FieldRecord]) -> usize {
    records
        .iter()
        .filter_map(|r| r.group.as_deref())
        .filter(|g| !g.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sessions() {
        let records = vec![
            FieldRecord::new("A", "v1", "g1"),
            FieldRecord::new("B", "v2", "g1"),
            FieldRecord::new("C", "v3", "g2"),
        ];
        let report = render_sessions(&records, "1h", "").unwrap();

        let expected = "**NetWitness Query Results** (Last 1h)\n\n\
            **Session ID**: g1\n\
            - **A**: v1\n\
            - **B**: v2\n\
            ---\n\
            **Session ID**: g2\n\
            - **C**: v3\n\n\
            **Total Sessions**: 2";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_filter_line_included() {
        let records = vec![FieldRecord::new("service", "22", "9")];
        let report = render_sessions(&records, "24h", " service=22 ").unwrap();
        assert!(report.contains("*Filter: service=22*"));
        assert!(report.starts_with("**NetWitness Query Results** (Last 24h)"));
    }

    #[test]
    fn test_empty_is_no_results() {
        let err = render_sessions(&[], "30m", "").unwrap_err();
        assert!(err.is_empty_result());
        assert!(err.to_string().contains("30m"));
    }

    #[test]
    fn test_group_literally_named_like_missing_marker() {
        // A real group called "N/A" and a record without a group are different sessions
        let records = vec![
            FieldRecord::new("A", "v1", "N/A"),
            FieldRecord {
                field_type: "B".into(),
                value: "v2".into(),
                group: None,
            },
        ];
        let report = render_sessions(&records, "1h", "").unwrap();
        assert_eq!(report.matches("**Session ID**").count(), 2);
        assert!(report.ends_with("**Total Sessions**: 1"));
    }

    #[test]
    fn test_no_resorting() {
        // g1 reappearing after g2 opens a new block rather than merging
        let records = vec![
            FieldRecord::new("A", "1", "g1"),
            FieldRecord::new("B", "2", "g2"),
            FieldRecord::new("C", "3", "g1"),
        ];
        let report = render_sessions(&records, "1h", "").unwrap();
        assert_eq!(report.matches("---").count(), 2);
        assert!(report.ends_with("**Total Sessions**: 2"));
    }
}
