//! HTTP gateway for Cileles.
//!
//! Exposes the chat endpoint that holds the language-model credential,
//! the station listing, and a health check. The chat handler is mounted
//! on both deployment routes so local-dev and production clients speak to
//! the same code.
//!
//! Built on Axum.

pub mod chat;
pub mod error;
pub mod stations;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    http::{HeaderValue, header},
    response::Json,
    routing::{any, get},
};
use cileles_core::{Backend, LoadState, StationRecord};
use serde::Serialize;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

/// Production chat route.
pub const CHAT_ROUTE: &str = "/api/chat";

/// Local-dev chat route.
pub const DEV_CHAT_ROUTE: &str = "/.netlify/functions/chat";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub backend: Arc<dyn Backend>,
    pub records: Arc<[StationRecord]>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - Open CORS headers on every response
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/stations", get(stations::stations_handler))
        .route(CHAT_ROUTE, any(chat::chat_handler))
        .route(DEV_CHAT_ROUTE, any(chat::chat_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// The server always talks to the language model directly; relaying to
/// another relay is never useful here.
pub async fn start(config: cileles_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let records = LoadState::from_source(config.data.path.as_deref())?.into_records();
    if records.is_empty() {
        warn!("No monitoring data available; /api/stations will be empty");
    }

    if !config.has_api_key() {
        warn!("No language-model credential configured; chat requests will return 500");
    }
    let backend = Arc::new(cileles_providers::OpenAiCompatBackend::new(
        &config.backend_settings(),
    )?);

    let state = Arc::new(GatewayState {
        backend,
        records: records.into(),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
