//! Admin Server alert API wire types

use serde::Deserialize;
use serde_json::Value;

/// Response of `POST /rest/api/auth/userpass`
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
}

/// Short-lived bearer token for the alerts endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Response of `GET /rest/api/alerts`
#[derive(Debug, Default, Deserialize)]
pub struct AlertPage {
    #[serde(default)]
    pub items: Vec<Alert>,
}

/// One alert; every field is optional on the wire
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
    /// Milliseconds since the Unix epoch, normally
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub alert: AlertDetail,
}

/// Nested `alert` object holding the event count and group-by fields
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AlertDetail {
    #[serde(rename = "numEvents", default)]
    pub num_events: Option<Value>,
    #[serde(default)]
    pub groupby_source_ip: Option<Value>,
    #[serde(default)]
    pub groupby_destination_ip: Option<Value>,
    #[serde(default)]
    pub groupby_destination_port: Option<Value>,
    #[serde(default)]
    pub groupby_domain: Option<Value>,
    #[serde(default)]
    pub groupby_domain_dst: Option<Value>,
}
