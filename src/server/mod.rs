//! HTTP server module for the API and WebSocket endpoints.
//!
//! Serves the item catalog over REST and pushes snapshot updates to
//! WebSocket clients.

pub mod routes;
pub mod state;
pub mod ws;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::server::routes::{health, items};
use crate::server::state::AppState;
use crate::server::ws::ws_handler;

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configuration could not be applied.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Builds the complete router.
///
/// Routes:
/// - `GET /health` - liveness check
/// - `GET /api/items` - current item snapshot
/// - `GET /ws` - WebSocket update stream
///
/// CORS is restricted to the single configured origin, with GET as the
/// only allowed method and `content-type` / `authorization` as the
/// only allowed headers.
pub fn build_router(state: Arc<AppState>, allowed_origin: &str) -> Result<Router, ServerError> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .map_err(|_| ServerError::Config(format!("invalid allowed origin: {allowed_origin}")))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Items API
        .route("/api/items", get(items::get_items))
        // WebSocket
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state))
}

/// Runs the axum server until the shutdown channel flips.
pub async fn run_server(
    config: &ServerConfig,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let app = build_router(state, &config.allowed_origin)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    Ok(())
}
