//! Error taxonomy shared by the search and alert surfaces
//!
//! Nothing in this crate lets a failure escape a tool call uninterpreted:
//! every variant renders to a single human-readable line via [`BridgeError::to_tool_text`].

/// Marker placed in front of every failed tool result
pub const ERROR_MARKER: &str = "❌";

/// Which upstream service an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// Concentrator/Broker `sdk` interface
    Search,
    /// Admin Server token endpoint
    Auth,
    /// Admin Server alerts endpoint
    Alerts,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Upstream::Search => write!(f, "NetWitness API"),
            Upstream::Auth => write!(f, "NetWitness Auth API"),
            Upstream::Alerts => write!(f, "NetWitness Alert API"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A required setting is blank
    #[error("Error: {0}")]
    Configuration(String),

    /// Caller-supplied argument rejected before any request is made
    #[error("Error: {0}")]
    Validation(String),

    /// Upstream answered with a non-2xx status
    #[error("{upstream} Error: {status} - {body}")]
    UpstreamHttp {
        upstream: Upstream,
        status: u16,
        body: String,
    },

    /// Connection failure or timeout
    #[error("Request Error: Unable to connect to {upstream}. {message}")]
    Transport { upstream: Upstream, message: String },

    /// Token could not be obtained; the alert fetch is never attempted
    #[error("Authentication Error: {0}")]
    Authentication(String),

    /// 2xx response whose body did not have the expected shape
    #[error("Unexpected response from {upstream}: {message}")]
    Decode { upstream: Upstream, message: String },

    /// Successful call that produced nothing to report
    #[error("{0}")]
    EmptyResult(String),
}

impl BridgeError {
    pub fn transport(upstream: Upstream, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else {
            err.to_string()
        };
        BridgeError::Transport { upstream, message }
    }

    pub fn decode(upstream: Upstream, err: impl std::fmt::Display) -> Self {
        BridgeError::Decode {
            upstream,
            message: err.to_string(),
        }
    }

    /// Empty results are reported to the caller but are not failures
    pub fn is_empty_result(&self) -> bool {
        matches!(self, BridgeError::EmptyResult(_))
    }

    /// Render as the text block returned to the tool host
    pub fn to_tool_text(&self) -> String {
        if self.is_empty_result() {
            self.to_string()
        } else {
            format!("{} {}", ERROR_MARKER, self)
        }
    }
}
