//! Token-authenticated client for the Admin Server alert API

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use super::model::{Alert, AlertPage, AuthToken, TokenResponse};
use super::token_cache::{TokenCache, TokenCacheStats};
use crate::config::{AdminApiConfig, HttpConfig};
use crate::error::{BridgeError, Upstream};
use crate::query::{endpoint_url, TimeWindow};

/// Header carrying the bearer token on alert requests
pub const TOKEN_HEADER: &str = "NetWitness-Token";

const AUTH_PATH: &str = "/rest/api/auth/userpass";
const ALERTS_PATH: &str = "/rest/api/alerts";

/// Client for the Admin Server alert API
///
/// Each call authenticates from scratch unless a token cache TTL is configured.
#[derive(Debug)]
pub struct AlertClient {
    config: AdminApiConfig,
    http_client: reqwest::Client,
    auth_timeout: Duration,
    fetch_timeout: Duration,
    token_cache: Option<TokenCache>,
}

impl AlertClient {
    pub fn new(config: AdminApiConfig, http: &HttpConfig) -> Result<Self, BridgeError> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!http.verify_tls)
            .build()
            .map_err(|e| BridgeError::transport(Upstream::Alerts, e))?;

        let token_cache = if http.token_cache_ttl.is_zero() {
            None
        } else {
            Some(TokenCache::new(http.token_cache_ttl))
        };

        Ok(Self {
            config,
            http_client,
            auth_timeout: http.auth_timeout,
            fetch_timeout: http.fetch_timeout,
            token_cache,
        })
    }

    pub fn config(&self) -> &AdminApiConfig {
        &self.config
    }

    pub fn token_cache_stats(&self) -> Option<TokenCacheStats> {
        self.token_cache.as_ref().map(TokenCache::stats)
    }

    /// Authenticate, then fetch alerts inside `window`
    ///
    /// The fetch is never attempted when authentication fails.
    pub async fn fetch_alerts(
        &self,
        window: &TimeWindow,
        page_size: u32,
    ) -> Result<Vec<Alert>, BridgeError> {
        self.config.validate()?;

        let token = self.authenticate().await?;
        let result = self.fetch_with_token(&token, window, page_size).await;

        if let (Err(BridgeError::UpstreamHttp { status, .. }), Some(cache)) =
            (&result, &self.token_cache)
        {
            if *status == StatusCode::UNAUTHORIZED.as_u16() {
                cache.invalidate(&self.config);
            }
        }
        result
    }

    /// Obtain a bearer token, from the cache when enabled
    pub async fn authenticate(&self) -> Result<AuthToken, BridgeError> {
        if let Some(token) = self.token_cache.as_ref().and_then(|c| c.get(&self.config)) {
            tracing::debug!("Using cached alert API token");
            return Ok(token);
        }

        let token = self.request_token().await?;
        if let Some(cache) = &self.token_cache {
            cache.put(&self.config, token.clone());
        }
        Ok(token)
    }

    async fn request_token(&self) -> Result<AuthToken, BridgeError> {
        tracing::info!("Requesting alert API token");
        let url = endpoint_url(&self.config.url, AUTH_PATH, &[])?;
        let form = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .http_client
            .post(url)
            .form(&form)
            .timeout(self.auth_timeout)
            .send()
            .await
            .map_err(|e| {
                BridgeError::Authentication(format!("token request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Authentication(format!(
                "token endpoint returned HTTP {} - {}",
                status.as_u16(),
                body
            )));
        }

        let body = response.text().await.map_err(|e| {
            BridgeError::Authentication(format!("failed to read token response: {}", e))
        })?;
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            BridgeError::Authentication(format!(
                "token response is not valid JSON: {} ({})",
                e,
                truncate(&body, 200)
            ))
        })?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => {
                tracing::info!("Retrieved alert API token");
                Ok(AuthToken::new(token))
            }
            _ => Err(BridgeError::Authentication(
                "token response missing 'accessToken' field".to_string(),
            )),
        }
    }

    async fn fetch_with_token(
        &self,
        token: &AuthToken,
        window: &TimeWindow,
        page_size: u32,
    ) -> Result<Vec<Alert>, BridgeError> {
        let params = [
            ("since", window.start_iso()),
            ("until", window.end_iso()),
            ("pageSize", page_size.to_string()),
        ];
        let url = endpoint_url(&self.config.url, ALERTS_PATH, &params)?;

        let response = self
            .http_client
            .get(url)
            .header(TOKEN_HEADER, token.as_str())
            .header(ACCEPT, "application/json;charset=UTF-8")
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| BridgeError::transport(Upstream::Alerts, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::UpstreamHttp {
                upstream: Upstream::Alerts,
                status: status.as_u16(),
                body,
            });
        }

        let page: AlertPage = response
            .json()
            .await
            .map_err(|e| BridgeError::decode(Upstream::Alerts, e))?;
        Ok(page.items)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
