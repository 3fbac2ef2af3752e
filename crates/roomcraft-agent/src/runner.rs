//! Procurement session runner.
//!
//! Drives the fixed step sequence
//! `Start -> Thought -> (Action -> Result)* -> Summary -> Done`, with `Error`
//! reachable from any non-terminal state, emitting exactly one event per step
//! into the session channel before advancing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use roomcraft_core::{DesignPlan, FurniturePiece};

use crate::error::AgentError;
use crate::event::{AgentEvent, ProcurementResult, ProcurementSummary};

/// Opaque per-step lookup the runner drives.
///
/// The budget ceiling is forwarded verbatim to every step; whether and how it
/// is enforced is the source's concern. The runner only converts each step's
/// outcome into a `result` or `error` event.
#[async_trait]
pub trait ProcurementSource: Send + Sync {
    /// Find a purchase listing for one furniture piece.
    async fn search_listing(
        &self,
        piece: &FurniturePiece,
        budget_usd: Option<f64>,
        vendors: &[String],
    ) -> Result<ProcurementResult, AgentError>;
}

/// Runs one procurement session against a [`ProcurementSource`].
///
/// Cancellation is cooperative: when the receiving side of the session channel
/// is dropped (transport disconnect), the next emission fails and the runner
/// stops at that boundary. It never abandons a half-emitted event and does not
/// retry the in-flight step.
pub struct ProcurementRunner {
    source: Arc<dyn ProcurementSource>,
    budget_usd: Option<f64>,
    vendors: Vec<String>,
}

impl ProcurementRunner {
    /// Create a runner for one session.
    pub fn new(source: Arc<dyn ProcurementSource>) -> Self {
        Self {
            source,
            budget_usd: None,
            vendors: Vec::new(),
        }
    }

    /// Set the nullable budget ceiling threaded through every step.
    pub fn with_budget(mut self, budget_usd: Option<f64>) -> Self {
        self.budget_usd = budget_usd;
        self
    }

    /// Set the preferred vendors forwarded to every step.
    pub fn with_vendors(mut self, vendors: Vec<String>) -> Self {
        self.vendors = vendors;
        self
    }

    /// Run the session to its terminal event.
    ///
    /// `done` is always the last event emitted; on a step failure the runner
    /// emits `error` and proceeds directly to `done`.
    pub async fn run(self, plan: DesignPlan, tx: mpsc::Sender<AgentEvent>) {
        let budget_label = match self.budget_usd {
            Some(budget) => format!("${budget}"),
            None => "no fixed budget".to_string(),
        };

        let opening = AgentEvent::thought(format!(
            "Analysing {} furniture pieces against {}",
            plan.furniture.len(),
            budget_label
        ));
        if emit(&tx, opening).await.is_err() {
            return;
        }

        for piece in &plan.furniture {
            let vendor = piece.vendor.as_deref().unwrap_or("any vendor");
            let action = AgentEvent::action(format!("Searching '{}' at {}", piece.name, vendor));
            if emit(&tx, action).await.is_err() {
                return;
            }

            match self
                .source
                .search_listing(piece, self.budget_usd, &self.vendors)
                .await
            {
                Ok(listing) => {
                    if emit(&tx, AgentEvent::result(&listing)).await.is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(piece = %piece.name, error = %e, "Procurement step failed");
                    if emit(&tx, AgentEvent::error(e.to_string())).await.is_err() {
                        return;
                    }
                    let _ = emit(&tx, AgentEvent::done()).await;
                    return;
                }
            }
        }

        let summary =
            ProcurementSummary::new(plan.total_price_usd(), self.budget_usd, plan.furniture.len());
        if emit(&tx, AgentEvent::summary(&summary)).await.is_err() {
            return;
        }
        let _ = emit(&tx, AgentEvent::done()).await;
    }
}

/// Send one event, reporting a dropped receiver as `ChannelClosed`.
async fn emit(tx: &mpsc::Sender<AgentEvent>, event: AgentEvent) -> Result<(), AgentError> {
    if tx.send(event).await.is_err() {
        debug!("Session channel closed; stopping at step boundary");
        return Err(AgentError::ChannelClosed);
    }
    Ok(())
}
