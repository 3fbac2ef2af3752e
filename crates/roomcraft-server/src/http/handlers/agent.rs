//! Procurement agent stream handler.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

use roomcraft_agent::{encode_frame, ProcurementRunner};
use roomcraft_core::DesignId;

use crate::http::error::ApiError;
use crate::http::responses::ProcureRequest;
use crate::state::AppState;

/// Open a procurement agent stream for a design.
///
/// POST /agent/stream
///
/// The response is a chunked `text/event-stream`; each frame carries one agent
/// event and the stream always ends with a `done` frame. A client disconnect
/// drops the body stream, which closes the session channel and stops the
/// runner at its next step boundary.
pub async fn agent_stream(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcureRequest>,
) -> Result<Response, ApiError> {
    let design_id = DesignId::new(&req.design_id);
    let design = state
        .design(&design_id)
        .await
        .ok_or_else(|| ApiError::not_found("Design", &req.design_id))?;

    info!(
        design_id = %design.id,
        budget = ?req.budget_usd,
        "Opening procurement stream"
    );

    let (tx, rx) = mpsc::channel(16);
    let runner = ProcurementRunner::new(Arc::clone(&state.procurement))
        .with_budget(req.budget_usd)
        .with_vendors(req.preferred_vendors);
    tokio::spawn(runner.run(design.plan, tx));

    // Each event becomes one body chunk, flushed as it is produced.
    let frames = ReceiverStream::new(rx).map(|event| {
        let frame = encode_frame(&event).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to encode agent event");
            String::new()
        });
        Ok::<_, Infallible>(Bytes::from(frame))
    });

    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(frames))
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })
        .map(IntoResponse::into_response)
}
