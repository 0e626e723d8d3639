use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::alerts::TokenCacheStats;
use crate::tools::{reference_doc, tool_specs, Bridge, ToolCallError, ToolOutput, ToolSpec};
use crate::tools::REFERENCE_DOCS;

/// Application state shared across handlers
pub struct AppState {
    pub bridge: Arc<Bridge>,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_cache: Option<TokenCacheInfo>,
}

#[derive(Serialize)]
pub struct TokenCacheInfo {
    pub hits: u64,
    pub misses: u64,
    pub ttl_secs: u64,
}

impl From<TokenCacheStats> for TokenCacheInfo {
    fn from(stats: TokenCacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            ttl_secs: stats.ttl_secs,
        }
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        token_cache: state
            .bridge
            .alert_client()
            .token_cache_stats()
            .map(TokenCacheInfo::from),
    })
}

// ============================================================================
// Tools
// ============================================================================

#[derive(Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolSpec>,
}

pub async fn list_tools() -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: tool_specs(),
    })
}

pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolOutput>, ApiError> {
    // An empty body means "all defaults"
    let args = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON arguments: {}", e)))?
    };

    let output = state.bridge.call(&name, args).await.map_err(|e| match e {
        ToolCallError::UnknownTool(_) => ApiError::NotFound(e.to_string()),
        ToolCallError::InvalidArguments { .. } => ApiError::BadRequest(e.to_string()),
    })?;

    Ok(Json(output))
}

// ============================================================================
// Resources
// ============================================================================

#[derive(Serialize)]
pub struct ResourcesResponse {
    pub resources: Vec<ResourceInfo>,
}

#[derive(Serialize)]
pub struct ResourceInfo {
    pub name: &'static str,
    pub uri: &'static str,
    pub description: &'static str,
}

pub async fn list_resources() -> Json<ResourcesResponse> {
    let resources = REFERENCE_DOCS
        .iter()
        .map(|doc| ResourceInfo {
            name: doc.name,
            uri: doc.uri,
            description: doc.description,
        })
        .collect();

    Json(ResourcesResponse { resources })
}

pub async fn read_resource(Path(name): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let doc = reference_doc(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Resource '{}' not found", name)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        doc.content,
    ))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        tracing::warn!(status = %status, "{}", message);

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
