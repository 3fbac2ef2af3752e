//! AR session handler.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use roomcraft_core::DesignId;

use crate::http::error::ApiError;
use crate::http::responses::{ArPosition, ArSessionResponse};
use crate::state::AppState;

/// Get AR session data for a design.
///
/// GET /ar/session/{design_id}
///
/// Serves the placeholder GLB from the static tree until per-design models
/// exist.
pub async fn ar_session(
    State(state): State<Arc<AppState>>,
    Path(design_id): Path<String>,
) -> Result<Json<ArSessionResponse>, ApiError> {
    let design = state
        .design(&DesignId::new(&design_id))
        .await
        .ok_or_else(|| ApiError::not_found("Design", &design_id))?;

    let positions = design
        .plan
        .furniture
        .iter()
        .map(|piece| ArPosition {
            furniture_id: piece.id.clone(),
            x: piece.position.x,
            y: piece.position.y,
            z: piece.position.z,
            rotation_y: piece.rotation,
        })
        .collect();

    Ok(Json(ArSessionResponse {
        design_id,
        model_url: format!(
            "{}/static/models/room_default.glb",
            state.config.public_url
        ),
        positions,
        scale_factor: 1.0,
        ar_modes: "webxr scene-viewer quick-look".to_string(),
    }))
}
