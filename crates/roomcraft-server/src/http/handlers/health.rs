//! Health and fallback handlers.

use axum::{response::IntoResponse, Json};

use crate::http::responses::HealthResponse;

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Catch-all for non-API routes. No frontend is bundled with the server.
pub async fn fallback() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Roomcraft API is running.",
        "health": "/health",
    }))
}
