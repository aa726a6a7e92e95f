//! Plain HTTP binding for the article gateway.
//!
//! Exposes the same Describe/Invoke surface as the stdio transport through a
//! single `POST /mcp` endpoint accepting `{method, params}`, plus a health
//! check. CORS is permissive (any origin) and the endpoint carries no
//! authentication, so privileged capabilities are stripped before a service
//! is handed to this transport on a non-loopback bind — see
//! [`crate::http_capabilities`].

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map as JsonMap, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::app::ArticleService;
use crate::catalog;
use crate::dispatch::dispatch;
use crate::SERVICE_NAME;

/// One request to the `/mcp` endpoint.
#[derive(Debug, Deserialize)]
struct RpcRequest {
    method: String,
    #[serde(default)]
    params: Option<RpcParams>,
}

#[derive(Debug, Default, Deserialize)]
struct RpcParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<JsonMap<String, Value>>,
}

/// Builds the gateway router: `/mcp`, the health routes, a 404 fallback,
/// and a permissive CORS layer that also answers OPTIONS preflights.
pub fn router(service: Arc<ArticleService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/mcp", post(mcp_endpoint))
        .route("/", get(health))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(cors)
        .with_state(service)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

async fn mcp_endpoint(
    State(service): State<Arc<ArticleService>>,
    Json(request): Json<RpcRequest>,
) -> Response {
    match handle(&service, request).await {
        Ok(value) => Json(value).into_response(),
        Err(message) => {
            tracing::debug!(target: "boardpress::http", error = %message, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response()
        }
    }
}

/// Request-level failures (unknown method, missing tool name, serialization)
/// become HTTP 500; tool-level failures stay inside the 200 envelope exactly
/// as over stdio.
async fn handle(service: &ArticleService, request: RpcRequest) -> Result<Value, String> {
    match request.method.as_str() {
        "tools/list" => {
            let tools = serde_json::to_value(catalog::tools(service.capabilities()))
                .map_err(|e| e.to_string())?;
            Ok(json!({ "tools": tools }))
        }
        "tools/call" => {
            let params = request.params.unwrap_or_default();
            let name = params
                .name
                .ok_or_else(|| "params.name is required for tools/call".to_string())?;
            let result = dispatch(
                service.store().as_ref(),
                service.capabilities(),
                &name,
                params.arguments.as_ref(),
            )
            .await;
            serde_json::to_value(&result).map_err(|e| e.to_string())
        }
        other => Err(format!("unknown method: {other}")),
    }
}

/// Binds the gateway to `bind_addr` and serves until the process exits.
pub async fn serve_http(service: Arc<ArticleService>, bind_addr: &str) -> Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("invalid bind address: {bind_addr}"))?;

    tracing::info!(
        target: "boardpress::http",
        bind = %addr,
        backend = service.store().name(),
        "Starting gateway"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!(target: "boardpress::http", bind = %addr, "Gateway listening");

    axum::serve(listener, router(service))
        .await
        .context("HTTP server error")?;
    Ok(())
}
