//! Room and design records plus the furniture plan types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DesignId, RoomId};

/// Room dimensions in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Structured analysis of an uploaded room photograph.
///
/// Produced by the opaque provider; the core never inspects the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAnalysis {
    pub room_type: String,
    pub dimensions: Dimensions,
    pub lighting: String,
    pub existing_features: Vec<String>,
    pub style_hints: Vec<String>,
    pub confidence: f64,
}

/// An uploaded room and its analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,

    /// Original upload filename (sanitized).
    pub filename: String,

    /// Public URL of the stored upload.
    pub file_url: Option<String>,

    /// Provider analysis of the photograph.
    pub analysis: RoomAnalysis,

    /// When the room was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a new room record from an upload and its analysis.
    pub fn new(
        filename: impl Into<String>,
        file_url: Option<String>,
        analysis: RoomAnalysis,
    ) -> Self {
        Self {
            id: RoomId::generate(),
            filename: filename.into(),
            file_url,
            analysis,
            created_at: Utc::now(),
        }
    }
}

/// 3D position of a furniture piece within the room, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One piece of furniture in a generated layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurniturePiece {
    pub id: String,
    pub name: String,
    pub category: String,
    pub style: String,
    /// Hex color string.
    pub color: String,
    pub position: Position,
    /// Rotation around the Y axis, degrees.
    pub rotation: f64,
    /// Bounding box in metres: width, height, depth.
    pub dimensions: PieceDimensions,
    pub model_url: Option<String>,
    pub price_usd: Option<f64>,
    pub vendor: Option<String>,
    pub sku: Option<String>,
}

/// Furniture bounding box in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceDimensions {
    pub w: f64,
    pub h: f64,
    pub d: f64,
}

/// A complete furniture layout generated for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPlan {
    pub style: String,
    pub furniture: Vec<FurniturePiece>,
    pub layout_notes: String,
    pub color_palette: Vec<String>,
    pub estimated_cost_usd: f64,
}

impl DesignPlan {
    /// Sum of the listed prices of all pieces in the plan.
    pub fn total_price_usd(&self) -> f64 {
        self.furniture
            .iter()
            .filter_map(|piece| piece.price_usd)
            .sum()
    }
}

/// A stored design: a plan tied to the room it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Unique design identifier.
    pub id: DesignId,

    /// Room this design was generated for.
    pub room_id: RoomId,

    /// Requested interior style.
    pub style: String,

    /// The generated furniture layout.
    pub plan: DesignPlan,

    /// User preferences passed to generation, kept verbatim.
    pub preferences: Value,

    /// When the design was generated.
    pub created_at: DateTime<Utc>,
}

impl Design {
    /// Create a new design record.
    pub fn new(room_id: RoomId, style: impl Into<String>, plan: DesignPlan, preferences: Value) -> Self {
        Self {
            id: DesignId::generate(),
            room_id,
            style: style.into(),
            plan,
            preferences,
            created_at: Utc::now(),
        }
    }
}
