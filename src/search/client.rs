//! Basic-auth client for the search backend `/sdk` endpoint

use std::time::Duration;

use reqwest::Url;

use super::model::{FieldRecord, SdkResponse, ValueCount};
use crate::config::{HttpConfig, SearchApiConfig};
use crate::error::{BridgeError, Upstream};
use crate::query::endpoint_url;

/// Client for the Concentrator/Broker `sdk` REST interface
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: SearchApiConfig,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(config: SearchApiConfig, http: &HttpConfig) -> Result<Self, BridgeError> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!http.verify_tls)
            .build()
            .map_err(|e| BridgeError::transport(Upstream::Search, e))?;

        Ok(Self {
            config,
            http_client,
            timeout: http.fetch_timeout,
        })
    }

    pub fn config(&self) -> &SearchApiConfig {
        &self.config
    }

    /// Build the `/sdk` URL for the given parameters
    pub fn sdk_url(&self, params: &[(&str, String)]) -> Result<Url, BridgeError> {
        endpoint_url(&self.config.url, "/sdk", params)
    }

    /// Run a `msg=query` request and return its field records in backend order
    pub async fn query(&self, params: &[(&str, String)]) -> Result<Vec<FieldRecord>, BridgeError> {
        let response = self.get(params).await?;
        Ok(response
            .results
            .fields
            .into_iter()
            .map(FieldRecord::from)
            .collect())
    }

    /// Run a `msg=values` request and return value counts in backend order
    pub async fn values(&self, params: &[(&str, String)]) -> Result<Vec<ValueCount>, BridgeError> {
        let response = self.get(params).await?;
        Ok(response
            .results
            .fields
            .into_iter()
            .map(ValueCount::from)
            .collect())
    }

    async fn get(&self, params: &[(&str, String)]) -> Result<SdkResponse, BridgeError> {
        self.config.validate()?;
        let url = self.sdk_url(params)?;

        let response = self
            .http_client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BridgeError::transport(Upstream::Search, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::UpstreamHttp {
                upstream: Upstream::Search,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SdkResponse>()
            .await
            .map_err(|e| BridgeError::decode(Upstream::Search, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{session_params, session_query, values_params, SortOrder, TimeRange};
    use wiremock::matchers::{basic_auth, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SearchClient {
        let config = SearchApiConfig {
            url: server.uri(),
            username: "analyst".to_string(),
            password: "secret".to_string(),
        };
        SearchClient::new(config, &HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_query_sends_encoded_query_with_basic_auth() {
        let server = MockServer::start().await;
        let range = TimeRange::parse("1h");
        let query = session_query("ip.src", "service=22", &range);

        Mock::given(method("GET"))
            .and(path("/sdk"))
            .and(basic_auth("analyst", "secret"))
            .and(query_param("msg", "query"))
            .and(query_param("size", "5"))
            .and(query_param("query", query.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": {"fields": [
                    {"type": "ip.src", "value": "10.1.1.1", "group": 1}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server)
            .query(&session_params(&query, 5))
            .await
            .unwrap();
        assert_eq!(records, vec![FieldRecord::new("ip.src", "10.1.1.1", "1")]);
    }

    #[tokio::test]
    async fn test_values_request() {
        let server = MockServer::start().await;
        let range = TimeRange::parse("30m");

        Mock::given(method("GET"))
            .and(path("/sdk"))
            .and(query_param("msg", "values"))
            .and(query_param("fieldName", "service"))
            .and(query_param("flags", "sessions,sort-total,order-descending"))
            .and(query_param("where", "time=rtp(now,30m)-u"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": {"fields": [
                    {"value": "443", "count": 10},
                    {"value": "80", "count": 3}
                ]}
            })))
            .mount(&server)
            .await;

        let params = values_params("service", "", &range, 10, SortOrder::Descending);
        let counts = client_for(&server).values(&params).await.unwrap();
        assert_eq!(counts, vec![ValueCount::new("443", 10), ValueCount::new("80", 3)]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sdk"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .query(&session_params("select *", 1))
            .await
            .unwrap_err();
        match err {
            BridgeError::UpstreamHttp { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = SearchApiConfig {
            url: server.uri(),
            ..Default::default()
        };
        let client = SearchClient::new(config, &HttpConfig::default()).unwrap();
        let err = client.query(&session_params("select *", 1)).await.unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let config = SearchApiConfig {
            url: "http://127.0.0.1:1".to_string(),
            username: "a".to_string(),
            password: "b".to_string(),
        };
        let client = SearchClient::new(config, &HttpConfig::default()).unwrap();
        let err = client.query(&session_params("select *", 1)).await.unwrap_err();
        assert!(matches!(err, BridgeError::Transport { .. }));
    }
}
