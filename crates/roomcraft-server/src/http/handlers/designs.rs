//! Design generation handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use roomcraft_core::{Design, RoomId};

use crate::http::error::ApiError;
use crate::http::responses::{DesignResponse, GenerateDesignRequest};
use crate::state::AppState;

/// Generate a furniture design for an analysed room.
///
/// POST /designs/generate
pub async fn generate_design(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateDesignRequest>,
) -> Result<Json<DesignResponse>, ApiError> {
    let room_id = RoomId::new(&req.room_id);
    let room = state
        .room(&room_id)
        .await
        .ok_or_else(|| ApiError::not_found("Room", &req.room_id))?;

    let plan = state
        .provider
        .generate_design(&room.analysis, &req.style, &req.preferences)
        .await
        .map_err(|e| ApiError::Provider {
            message: e.to_string(),
        })?;

    let design = Design::new(room.id.clone(), &req.style, plan, req.preferences);
    info!(
        design_id = %design.id,
        room_id = %room.id,
        style = %design.style,
        pieces = design.plan.furniture.len(),
        "Design generated"
    );
    state.insert_design(design.clone()).await;

    Ok(Json(DesignResponse::from_domain(&design)))
}
