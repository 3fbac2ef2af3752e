//! Deterministic fake provider for local development and demos.
//!
//! Simulates realistic latency without any API keys. Outputs are seeded from
//! the input so repeated calls with the same payload agree.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use roomcraft_agent::{AgentError, ProcurementResult, ProcurementSource};
use roomcraft_core::{
    DesignPlan, Dimensions, FurniturePiece, PieceDimensions, Position, RoomAnalysis,
};

use crate::{AiProvider, ProviderError};

const ROOM_TYPES: &[&str] = &[
    "living_room",
    "bedroom",
    "dining_room",
    "home_office",
    "kitchen",
];

const LIGHTING: &[&str] = &["natural", "artificial", "mixed"];

const FEATURES: &[&str] = &[
    "window",
    "door",
    "hardwood_floor",
    "carpet",
    "fireplace",
    "closet",
    "built-in shelves",
];

const STYLES: &[&str] = &[
    "modern",
    "scandinavian",
    "industrial",
    "bohemian",
    "minimalist",
    "traditional",
];

/// Minimal 1x1 white PNG used as the render stand-in.
const PLACEHOLDER_PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwADhQGAWjR9awAAAABJRU5ErkJggg==";

/// Deterministic fake provider.
///
/// Also implements [`ProcurementSource`] so the same instance can back both
/// render jobs and procurement sessions.
pub struct FakeProvider {
    analyze_delay: Duration,
    generate_delay: Duration,
    render_delay: Duration,
    lookup_delay: Duration,
}

impl FakeProvider {
    /// Create a provider with demo-realistic latencies.
    pub fn new() -> Self {
        Self {
            analyze_delay: Duration::from_millis(1200),
            generate_delay: Duration::from_millis(1500),
            render_delay: Duration::from_millis(3000),
            lookup_delay: Duration::from_millis(300),
        }
    }

    /// Create a provider with no simulated latency (tests).
    pub fn instant() -> Self {
        Self {
            analyze_delay: Duration::ZERO,
            generate_delay: Duration::ZERO,
            render_delay: Duration::ZERO,
            lookup_delay: Duration::ZERO,
        }
    }

    /// Override the render latency.
    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for FakeProvider {
    async fn analyze_room(
        &self,
        image: &[u8],
        filename: &str,
    ) -> Result<RoomAnalysis, ProviderError> {
        debug!(filename = %filename, bytes = image.len(), "Fake room analysis");
        sleep(self.analyze_delay).await;

        let mut rng = StdRng::seed_from_u64(image.len() as u64);
        let feature_count = rng.gen_range(2..=4);
        let features = FEATURES
            .choose_multiple(&mut rng, feature_count)
            .map(|s| s.to_string())
            .collect();
        let style_hints = STYLES
            .choose_multiple(&mut rng, 2)
            .map(|s| s.to_string())
            .collect();

        Ok(RoomAnalysis {
            room_type: pick(&mut rng, ROOM_TYPES),
            dimensions: Dimensions {
                width: round1(rng.gen_range(3.0..6.0)),
                height: round1(rng.gen_range(2.4..3.5)),
                depth: round1(rng.gen_range(4.0..8.0)),
            },
            lighting: pick(&mut rng, LIGHTING),
            existing_features: features,
            style_hints,
            confidence: round2(rng.gen_range(0.82..0.99)),
        })
    }

    async fn generate_design(
        &self,
        analysis: &RoomAnalysis,
        style: &str,
        preferences: &Value,
    ) -> Result<DesignPlan, ProviderError> {
        debug!(style = %style, preferences = %preferences, "Fake design generation");
        sleep(self.generate_delay).await;

        let colors = palette_for(style);
        let sku_tag: String = style.chars().take(3).collect::<String>().to_uppercase();
        let width = analysis.dimensions.width;
        let depth = analysis.dimensions.depth;

        let furniture = vec![
            piece(
                "Sofa",
                "seating",
                style,
                colors[0],
                Position { x: 0.0, y: 0.0, z: 1.0 },
                0.0,
                PieceDimensions { w: 2.2, h: 0.85, d: 0.95 },
                899.00,
                "FurnitureCo",
                format!("SF-{sku_tag}-001"),
            ),
            piece(
                "Coffee Table",
                "table",
                style,
                colors[1],
                Position { x: 0.0, y: 0.0, z: 2.5 },
                0.0,
                PieceDimensions { w: 1.2, h: 0.45, d: 0.6 },
                299.00,
                "FurnitureCo",
                format!("CT-{sku_tag}-002"),
            ),
            piece(
                "Floor Lamp",
                "lighting",
                style,
                colors[2],
                Position { x: width / 2.0 - 0.5, y: 0.0, z: 0.8 },
                0.0,
                PieceDimensions { w: 0.35, h: 1.8, d: 0.35 },
                149.00,
                "LightHouse",
                format!("FL-{sku_tag}-003"),
            ),
            piece(
                "Bookshelf",
                "storage",
                style,
                colors[3],
                Position { x: -(width / 2.0 - 0.2), y: 0.0, z: depth / 2.0 - 0.2 },
                90.0,
                PieceDimensions { w: 1.0, h: 2.0, d: 0.3 },
                399.00,
                "WoodWorks",
                format!("BS-{sku_tag}-004"),
            ),
        ];

        let total: f64 = furniture.iter().filter_map(|f| f.price_usd).sum();
        let layout_notes = format!(
            "Furniture arranged for a {} ({}m x {}m). Sofa faces the focal wall \
             with coffee table centred. Floor lamp provides ambient lighting near \
             the seating area.",
            analysis.room_type.replace('_', " "),
            width,
            depth,
        );

        Ok(DesignPlan {
            style: style.to_string(),
            furniture,
            layout_notes,
            color_palette: colors.iter().map(|c| c.to_string()).collect(),
            estimated_cost_usd: round2(total),
        })
    }

    async fn render_design(&self, plan: &DesignPlan) -> Result<Vec<u8>, ProviderError> {
        debug!(style = %plan.style, pieces = plan.furniture.len(), "Fake render");
        sleep(self.render_delay).await;

        BASE64
            .decode(PLACEHOLDER_PNG_B64)
            .map_err(|e| ProviderError::Generation(format!("placeholder image corrupt: {e}")))
    }
}

#[async_trait]
impl ProcurementSource for FakeProvider {
    async fn search_listing(
        &self,
        piece: &FurniturePiece,
        budget_usd: Option<f64>,
        vendors: &[String],
    ) -> Result<ProcurementResult, AgentError> {
        debug!(
            piece = %piece.name,
            budget = ?budget_usd,
            vendors = vendors.len(),
            "Fake listing lookup"
        );
        sleep(self.lookup_delay).await;

        let sku = piece.sku.as_deref().unwrap_or("unknown");
        Ok(ProcurementResult {
            furniture_id: piece.id.clone(),
            name: piece.name.clone(),
            sku: piece.sku.clone(),
            price_usd: piece.price_usd,
            in_stock: true,
            buy_url: format!("https://example.com/buy/{sku}"),
        })
    }
}

fn pick(rng: &mut StdRng, options: &[&str]) -> String {
    options
        .choose(rng)
        .copied()
        .unwrap_or(options[0])
        .to_string()
}

fn palette_for(style: &str) -> [&'static str; 4] {
    match style {
        "modern" => ["#FFFFFF", "#2C3E50", "#BDC3C7", "#E74C3C"],
        "scandinavian" => ["#F5F5F0", "#8B7355", "#D4C5A9", "#4A4A4A"],
        "industrial" => ["#3D3D3D", "#B87333", "#8B8680", "#F5F5DC"],
        "bohemian" => ["#C19A6B", "#8B4513", "#DEB887", "#6B8E23"],
        "minimalist" => ["#FAFAFA", "#E0E0E0", "#9E9E9E", "#212121"],
        "traditional" => ["#8B4513", "#D2691E", "#F4A460", "#FFFAF0"],
        _ => ["#FFFFFF", "#000000", "#888888", "#CCCCCC"],
    }
}

#[allow(clippy::too_many_arguments)]
fn piece(
    name: &str,
    category: &str,
    style: &str,
    color: &str,
    position: Position,
    rotation: f64,
    dimensions: PieceDimensions,
    price_usd: f64,
    vendor: &str,
    sku: String,
) -> FurniturePiece {
    FurniturePiece {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        category: category.to_string(),
        style: style.to_string(),
        color: color.to_string(),
        position,
        rotation,
        dimensions,
        model_url: None,
        price_usd: Some(price_usd),
        vendor: Some(vendor.to_string()),
        sku: Some(sku),
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
