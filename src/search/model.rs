//! Wire types for the `sdk` JSON responses

use serde::Deserialize;
use serde_json::Value;

/// Placeholder rendered for fields the backend omitted
pub const NOT_AVAILABLE: &str = "N/A";

/// `{"results": {"fields": [...]}}` as returned by both `msg=query` and `msg=values`
#[derive(Debug, Default, Deserialize)]
pub struct SdkResponse {
    #[serde(default)]
    pub results: SdkResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SdkResults {
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// One entry of `results.fields`, before interpretation
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawField {
    #[serde(rename = "type", default)]
    pub field_type: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub group: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
}

/// One meta value belonging to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub field_type: String,
    pub value: String,
    /// Session id; `None` when the backend sent no group
    pub group: Option<String>,
}

impl FieldRecord {
    pub fn new(field_type: &str, value: &str, group: &str) -> Self {
        Self {
            field_type: field_type.to_string(),
            value: value.to_string(),
            group: Some(group.to_string()),
        }
    }
}

impl From<RawField> for FieldRecord {
    fn from(raw: RawField) -> Self {
        Self {
            field_type: text_or_na(raw.field_type.as_ref()),
            value: text_or_na(raw.value.as_ref()),
            group: raw.group.as_ref().and_then(json_text),
        }
    }
}

/// A meta value and how many sessions carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

impl ValueCount {
    pub fn new(value: &str, count: u64) -> Self {
        Self {
            value: value.to_string(),
            count,
        }
    }
}

impl From<RawField> for ValueCount {
    fn from(raw: RawField) -> Self {
        let count = raw
            .count
            .as_ref()
            .and_then(|c| c.as_u64().or_else(|| c.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or(0);
        Self {
            value: text_or_na(raw.value.as_ref()),
            count,
        }
    }
}

/// Display text of a scalar JSON value; `None` for null
pub fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn text_or_na(value: Option<&Value>) -> String {
    value
        .and_then(json_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
