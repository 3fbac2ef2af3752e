//! Render job handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use roomcraft_core::{DesignId, JobId};

use crate::http::error::ApiError;
use crate::http::responses::{JobResponse, SubmitJobRequest};
use crate::state::AppState;

/// Submit a render job for a design.
///
/// POST /jobs
///
/// Fails 404 for an unknown design; no job is created in that case. Otherwise
/// returns the pending snapshot immediately while the render runs in the
/// background.
pub async fn submit_job(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitJobRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    let design_id = DesignId::new(&req.design_id);
    let design = state
        .design(&design_id)
        .await
        .ok_or_else(|| ApiError::not_found("Design", &req.design_id))?;

    let job = state.scheduler.submit(&design).await;
    info!(job_id = %job.id, design_id = %design.id, "Render job accepted");

    Ok(Json(JobResponse::from_domain(&job)))
}

/// Poll the current snapshot of a render job.
///
/// GET /jobs/{job_id}
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let job = state
        .scheduler
        .status(&JobId::new(&job_id))
        .await
        .map_err(|_| ApiError::not_found("Render job", &job_id))?;

    Ok(Json(JobResponse::from_domain(&job)))
}
