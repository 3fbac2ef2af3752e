//! HTTP request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use roomcraft_core::{Design, FurniturePiece, JobStatus, RenderJob, Room, RoomAnalysis};

// ============================================================================
// Render job types
// ============================================================================

/// Request body for submitting a render job.
#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    /// Design to render.
    pub design_id: String,
}

/// Snapshot of a render job.
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job_id: String,
    pub design_id: String,
    pub status: JobStatus,
    pub image_url: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobResponse {
    /// Build the response from a job record.
    pub fn from_domain(job: &RenderJob) -> Self {
        Self {
            job_id: job.id.as_str().to_string(),
            design_id: job.design_id.as_str().to_string(),
            status: job.status,
            image_url: job.image_url.clone(),
            error: job.error.clone(),
            created_at: job.created_at,
        }
    }
}

// ============================================================================
// Procurement stream types
// ============================================================================

/// Request body for opening a procurement agent stream.
#[derive(Debug, Deserialize)]
pub struct ProcureRequest {
    /// Design whose furniture is procured.
    pub design_id: String,

    /// Nullable budget ceiling, forwarded to every step.
    #[serde(default)]
    pub budget_usd: Option<f64>,

    /// Preferred vendors, forwarded to every step.
    #[serde(default)]
    pub preferred_vendors: Vec<String>,
}

// ============================================================================
// Room types
// ============================================================================

/// Response for an analysed room upload.
#[derive(Debug, Serialize)]
pub struct RoomAnalyzeResponse {
    pub room_id: String,
    pub filename: String,
    pub file_url: Option<String>,
    pub analysis: RoomAnalysis,
    pub created_at: DateTime<Utc>,
}

impl RoomAnalyzeResponse {
    /// Build the response from a room record.
    pub fn from_domain(room: &Room) -> Self {
        Self {
            room_id: room.id.as_str().to_string(),
            filename: room.filename.clone(),
            file_url: room.file_url.clone(),
            analysis: room.analysis.clone(),
            created_at: room.created_at,
        }
    }
}

// ============================================================================
// Design types
// ============================================================================

/// Request body for generating a design.
#[derive(Debug, Deserialize)]
pub struct GenerateDesignRequest {
    /// Room the design is generated for.
    pub room_id: String,

    /// Desired interior style.
    #[serde(default = "default_style")]
    pub style: String,

    /// Free-form user preferences.
    #[serde(default)]
    pub preferences: Value,
}

fn default_style() -> String {
    "modern".to_string()
}

/// Response for a generated design.
#[derive(Debug, Serialize)]
pub struct DesignResponse {
    pub design_id: String,
    pub room_id: String,
    pub style: String,
    pub furniture: Vec<FurniturePiece>,
    pub layout_notes: String,
    pub color_palette: Vec<String>,
    pub estimated_cost_usd: f64,
    pub created_at: DateTime<Utc>,
}

impl DesignResponse {
    /// Build the response from a design record.
    pub fn from_domain(design: &Design) -> Self {
        Self {
            design_id: design.id.as_str().to_string(),
            room_id: design.room_id.as_str().to_string(),
            style: design.style.clone(),
            furniture: design.plan.furniture.clone(),
            layout_notes: design.plan.layout_notes.clone(),
            color_palette: design.plan.color_palette.clone(),
            estimated_cost_usd: design.plan.estimated_cost_usd,
            created_at: design.created_at,
        }
    }
}

// ============================================================================
// AR types
// ============================================================================

/// Placement of one furniture piece in an AR scene.
#[derive(Debug, Serialize)]
pub struct ArPosition {
    pub furniture_id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation_y: f64,
}

/// AR session payload for a design.
#[derive(Debug, Serialize)]
pub struct ArSessionResponse {
    pub design_id: String,
    pub model_url: String,
    pub positions: Vec<ArPosition>,
    pub scale_factor: f64,
    pub ar_modes: String,
}

// ============================================================================
// Meta types
// ============================================================================

/// Health check body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
