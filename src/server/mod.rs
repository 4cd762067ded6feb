//! HTTP front-end.
//!
//! Thin glue: each handler parses query parameters, runs the synchronous
//! pipeline on the blocking pool, and serialises the result.

use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

pub mod routes;

/// Liveness probe.
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/forecast", get(routes::forecast))
        .route("/inventory", get(routes::inventory))
        .route("/pricing", get(routes::pricing))
        .layer(TraceLayer::new_for_http())
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(host: &str, port: u16) -> Result<(), AppError> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::new(1, format!("Invalid HOST:PORT configuration '{host}:{port}': {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::new(1, format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("sales-insights v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, router())
        .await
        .map_err(|e| AppError::new(1, format!("Server error: {e}")))
}
