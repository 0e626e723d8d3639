//! Process-wide configuration, read once from the environment
//!
//! Blank settings are not rejected here; each tool call checks what it needs
//! and reports a configuration error from that call.

use std::time::Duration;

use crate::error::BridgeError;

/// Concentrator/Broker REST interface, basic-auth protected
#[derive(Clone, Default)]
pub struct SearchApiConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl SearchApiConfig {
    /// NETWITNESS_API_URL, NETWITNESS_USERNAME, NETWITNESS_PASSWORD
    pub fn from_env() -> Self {
        Self {
            url: env_string("NETWITNESS_API_URL"),
            username: env_string("NETWITNESS_USERNAME"),
            password: env_string("NETWITNESS_PASSWORD"),
        }
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.url.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "NETWITNESS_API_URL is not configured.".to_string(),
            ));
        }
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "NETWITNESS_USERNAME or NETWITNESS_PASSWORD are not configured.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Admin Server, used to mint alert API tokens
#[derive(Clone, Default)]
pub struct AdminApiConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl AdminApiConfig {
    /// NW_ADMIN_URL, NW_ADMIN_USERNAME, NW_ADMIN_PASSWORD
    pub fn from_env() -> Self {
        Self {
            url: env_string("NW_ADMIN_URL"),
            username: env_string("NW_ADMIN_USERNAME"),
            password: env_string("NW_ADMIN_PASSWORD"),
        }
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.url.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "NW_ADMIN_URL is not configured.".to_string(),
            ));
        }
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "NW_ADMIN_USERNAME or NW_ADMIN_PASSWORD are not configured.".to_string(),
            ));
        }
        Ok(())
    }
}

// Hand-written so credentials never reach the logs
impl std::fmt::Debug for SearchApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchApiConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl std::fmt::Debug for AdminApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Transport settings shared by both clients
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Appliances usually ship self-signed certificates
    pub verify_tls: bool,
    pub auth_timeout: Duration,
    pub fetch_timeout: Duration,
    /// Zero disables the token cache
    pub token_cache_ttl: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            verify_tls: false,
            auth_timeout: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(30),
            token_cache_ttl: Duration::ZERO,
        }
    }
}

impl HttpConfig {
    /// NETWITNESS_VERIFY_TLS, NW_AUTH_TIMEOUT_SECS, NW_FETCH_TIMEOUT_SECS,
    /// NW_TOKEN_CACHE_TTL_SECS
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            verify_tls: std::env::var("NETWITNESS_VERIFY_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.verify_tls),
            auth_timeout: env_secs("NW_AUTH_TIMEOUT_SECS").unwrap_or(defaults.auth_timeout),
            fetch_timeout: env_secs("NW_FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout),
            token_cache_ttl: env_secs("NW_TOKEN_CACHE_TTL_SECS")
                .unwrap_or(defaults.token_cache_ttl),
        }
    }
}

/// Everything the bridge needs, assembled at startup and never mutated
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    pub search: SearchApiConfig,
    pub admin: AdminApiConfig,
    pub http: HttpConfig,
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        Self {
            search: SearchApiConfig::from_env(),
            admin: AdminApiConfig::from_env(),
            http: HttpConfig::from_env(),
        }
    }

    /// Names of unset variables, for a startup warning
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let checks = [
            ("NETWITNESS_API_URL", &self.search.url),
            ("NETWITNESS_USERNAME", &self.search.username),
            ("NETWITNESS_PASSWORD", &self.search.password),
            ("NW_ADMIN_URL", &self.admin.url),
            ("NW_ADMIN_USERNAME", &self.admin.username),
            ("NW_ADMIN_PASSWORD", &self.admin.password),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

fn env_string(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(url: &str, user: &str, pass: &str) -> SearchApiConfig {
        SearchApiConfig {
            url: url.to_string(),
            username: user.to_string(),
            password: pass.to_string(),
        }
    }

    #[test]
    fn test_search_validation() {
        assert!(search("https://nw:50105", "admin", "pw").validate().is_ok());

        let err = search("  ", "admin", "pw").validate().unwrap_err();
        assert!(err.to_string().contains("NETWITNESS_API_URL"));

        let err = search("https://nw:50105", "admin", "").validate().unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));
    }

    #[test]
    fn test_admin_validation() {
        let admin = AdminApiConfig {
            url: String::new(),
            username: "admin".into(),
            password: "pw".into(),
        };
        let err = admin.validate().unwrap_err();
        assert!(err.to_string().contains("NW_ADMIN_URL"));
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", search("https://nw", "admin", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_missing_settings() {
        let config = BridgeConfig {
            search: search("https://nw", "admin", "pw"),
            ..Default::default()
        };
        assert_eq!(
            config.missing_settings(),
            vec!["NW_ADMIN_URL", "NW_ADMIN_USERNAME", "NW_ADMIN_PASSWORD"]
        );
    }
}
