//! HTTP server for the Roomcraft API.
//!
//! Provides endpoints for:
//! - Room analysis (`POST /rooms/analyze`)
//! - Design generation (`POST /designs/generate`)
//! - Render jobs (`POST /jobs`, `GET /jobs/{job_id}`)
//! - Procurement agent stream (`POST /agent/stream`)
//! - AR sessions (`GET /ar/session/{design_id}`)
//! - Health check (`/health`)
//! - Static files (`/static`)

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod error;
mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer for browser frontends
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();
    let body_limit = state.config.upload_max_mb * 1024 * 1024 + 1024;

    Router::new()
        // Render jobs
        .route("/jobs", post(handlers::submit_job))
        .route("/jobs/:job_id", get(handlers::get_job))
        // Procurement agent stream
        .route("/agent/stream", post(handlers::agent_stream))
        // Rooms and designs
        .route("/rooms/analyze", post(handlers::analyze_room))
        .route("/designs/generate", post(handlers::generate_design))
        .route("/ar/session/:design_id", get(handlers::ar_session))
        // Observability
        .route("/health", get(handlers::health_check))
        // Static tree: uploads, renders, models
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
