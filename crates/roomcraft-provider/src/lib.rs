//! Opaque AI provider seam for Roomcraft
//!
//! Everything AI-generated (room analysis, furniture layouts, rendered
//! images, procurement listings) is an input to the core, not something it
//! computes. This crate defines the contract every provider must satisfy and
//! ships [`FakeProvider`], a deterministic implementation with simulated
//! latency used for local development and demos.

mod fake;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use roomcraft_core::{DesignPlan, RoomAnalysis};

pub use fake::FakeProvider;

/// Errors surfaced by a provider.
///
/// Callers recover these locally (into a failed job or an `error` event);
/// they are never propagated as process-level faults.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying generation call failed.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// I/O failure while producing provider output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract every AI provider must satisfy.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Return a structured analysis of a room photograph.
    async fn analyze_room(
        &self,
        image: &[u8],
        filename: &str,
    ) -> Result<RoomAnalysis, ProviderError>;

    /// Generate a furniture layout for an analysed room.
    async fn generate_design(
        &self,
        analysis: &RoomAnalysis,
        style: &str,
        preferences: &Value,
    ) -> Result<DesignPlan, ProviderError>;

    /// Render a design to raw PNG bytes.
    async fn render_design(&self, plan: &DesignPlan) -> Result<Vec<u8>, ProviderError>;
}
