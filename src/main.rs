//! NetWitness Bridge Server
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - BRIDGE_HOST: Bind address (default: 127.0.0.1)
//! - BRIDGE_PORT: Port number (default: 8090)
//! - RUST_LOG: Log level (default: info)
//!
//! Search API (Concentrator or Broker REST port):
//! - NETWITNESS_API_URL: e.g. https://concentrator:50105
//! - NETWITNESS_USERNAME / NETWITNESS_PASSWORD: basic-auth credentials
//!
//! Alert API (Admin Server):
//! - NW_ADMIN_URL: e.g. https://admin-server
//! - NW_ADMIN_USERNAME / NW_ADMIN_PASSWORD: credentials used to mint tokens
//!
//! Transport:
//! - NETWITNESS_VERIFY_TLS: verify server certificates (default: false)
//! - NW_AUTH_TIMEOUT_SECS: token request timeout (default: 10)
//! - NW_FETCH_TIMEOUT_SECS: data request timeout (default: 30)
//! - NW_TOKEN_CACHE_TTL_SECS: reuse alert tokens for this long (default: 0, disabled)

use netwitness_bridge::api::{run_server, ServerConfig};
use netwitness_bridge::config::BridgeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout is left to the host
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netwitness_bridge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let host = std::env::var("BRIDGE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("BRIDGE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8090);

    let config = ServerConfig {
        host,
        port,
        bridge: BridgeConfig::from_env(),
    };

    tracing::info!("NetWitness bridge configuration:");
    tracing::info!("  Listen: {}:{}", config.host, config.port);
    tracing::info!("  Search API: {}", display_or_unset(&config.bridge.search.url));
    tracing::info!("  Admin API: {}", display_or_unset(&config.bridge.admin.url));
    tracing::info!("  Verify TLS: {}", config.bridge.http.verify_tls);
    if config.bridge.http.token_cache_ttl.is_zero() {
        tracing::info!("  Token cache: DISABLED");
    } else {
        tracing::info!(
            "  Token cache TTL: {} seconds",
            config.bridge.http.token_cache_ttl.as_secs()
        );
    }

    for name in config.bridge.missing_settings() {
        tracing::warn!("{} environment variable is not set", name);
    }

    tracing::info!(
        "Available tools: query_sessions, query_metakey_values, query_alerts, \
         get_netwitness_meta_keys, get_netwitness_query_syntax"
    );
    tracing::info!("Available resources: netwitness://meta-keys, netwitness://query-syntax");

    run_server(config).await
}

fn display_or_unset(value: &str) -> &str {
    if value.trim().is_empty() {
        "(unset)"
    } else {
        value
    }
}
