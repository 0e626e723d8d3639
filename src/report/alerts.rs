//! Alert list rendering

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::alerts::Alert;
use crate::error::BridgeError;
use crate::search::model::{json_text, text_or_na, NOT_AVAILABLE};

/// Render alerts as blocks separated by `---`
pub fn render_alerts(alerts: &[Alert], time_range: &str) -> Result<String, BridgeError> {
    if alerts.is_empty() {
        return Err(BridgeError::EmptyResult(format!(
            "No alerts found for the given time range ({}).",
            time_range
        )));
    }

    let mut out = format!("**NetWitness Alerts** (Last {})\n\n", time_range);
    let blocks: Vec<String> = alerts.iter().map(render_alert).collect();
    out.push_str(&blocks.join("\n---\n"));
    out.push_str(&format!("\n\n**Total Alerts**: {}", alerts.len()));

    Ok(out.trim().to_string())
}

fn render_alert(alert: &Alert) -> String {
    let detail = &alert.alert;
    let lines = [
        format!("**Name**: {}", text_or_na(alert.name.as_ref())),
        format!("- **Priority**: {}", text_or_na(alert.priority.as_ref())),
        format!("- **Time**: {}", format_timestamp(alert.timestamp.as_ref())),
        format!("- **Alert ID**: {}", text_or_na(alert.id.as_ref())),
        format!("- **Number of Events**: {}", text_or_na(detail.num_events.as_ref())),
        format!("- **Source IP**: {}", text_or_na(detail.groupby_source_ip.as_ref())),
        format!(
            "- **Destination IP**: {}",
            text_or_na(detail.groupby_destination_ip.as_ref())
        ),
        format!(
            "- **Destination Port**: {}",
            text_or_na(detail.groupby_destination_port.as_ref())
        ),
        format!("- **Domain**: {}", text_or_na(detail.groupby_domain.as_ref())),
        format!(
            "- **Destination Domain**: {}",
            text_or_na(detail.groupby_domain_dst.as_ref())
        ),
    ];
    lines.join("\n")
}

/// Millisecond epoch to ISO-8601 UTC; anything unconvertible is shown verbatim
pub fn format_timestamp(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64));

    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .or_else(|| json_text(value))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertDetail;
    use serde_json::json;

    fn alert(name: Value, timestamp: Value) -> Alert {
        Alert {
            id: Some(json!("a1")),
            name: Some(name),
            priority: Some(json!(50)),
            timestamp: Some(timestamp),
            alert: AlertDetail {
                num_events: Some(json!(4)),
                groupby_source_ip: Some(json!("10.0.0.9")),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_timestamp_conversion() {
        assert_eq!(
            format_timestamp(Some(&json!(1700000000000i64))),
            "2023-11-14T22:13:20Z"
        );
        assert_eq!(
            format_timestamp(Some(&json!(1700000000123i64))),
            "2023-11-14T22:13:20.123Z"
        );
    }

    #[test]
    fn test_unparseable_timestamp_is_verbatim() {
        assert_eq!(format_timestamp(Some(&json!("yesterday"))), "yesterday");
        assert_eq!(format_timestamp(Some(&json!(i64::MAX))), i64::MAX.to_string());
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_render_alerts() {
        let alerts = vec![
            alert(json!("Beaconing"), json!(1700000000000i64)),
            alert(json!("Odd DNS"), json!("not-a-number")),
        ];
        let report = render_alerts(&alerts, "24h").unwrap();

        assert!(report.starts_with("**NetWitness Alerts** (Last 24h)"));
        assert!(report.contains("**Name**: Beaconing\n- **Priority**: 50"));
        assert!(report.contains("- **Time**: 2023-11-14T22:13:20Z"));
        assert!(report.contains("- **Time**: not-a-number"));
        assert!(report.contains("- **Source IP**: 10.0.0.9"));
        assert!(report.contains("- **Destination Domain**: N/A"));
        assert_eq!(report.matches("\n---\n").count(), 1);
        assert!(report.ends_with("**Total Alerts**: 2"));
    }

    #[test]
    fn test_name_rendering_is_tolerant() {
        let mut unnamed = alert(json!("x"), json!(1700000000000i64));
        unnamed.name = None;
        let alerts = vec![alert(json!(42), json!(1700000000000i64)), unnamed];
        let report = render_alerts(&alerts, "1h").unwrap();

        assert!(report.contains("**Name**: 42\n"));
        assert!(report.contains("**Name**: N/A\n"));
    }

    #[test]
    fn test_empty_is_no_alerts() {
        let err = render_alerts(&[], "1h").unwrap_err();
        assert!(err.is_empty_result());
        assert_eq!(err.to_string(), "No alerts found for the given time range (1h).");
    }
}
