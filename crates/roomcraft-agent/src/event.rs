//! Agent events emitted during a procurement session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of agent event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentEventKind {
    /// Free-text reasoning from the agent.
    Thought,
    /// The agent is performing a lookup for one piece.
    Action,
    /// Listing found for one piece.
    Result,
    /// End-of-session totals.
    Summary,
    /// A step failed; the payload is the failure text.
    Error,
    /// Terminal marker. Always the last event of a session.
    Done,
}

/// One event in a procurement session.
///
/// Events within a session are totally ordered as produced; `done` is always
/// last and nothing follows it. The wire shape is `{"event": .., "data": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    /// Event kind.
    #[serde(rename = "event")]
    pub kind: AgentEventKind,

    /// Kind-specific payload: text for thought/action/error, structured JSON
    /// for result/summary, null for done.
    pub data: Value,
}

impl AgentEvent {
    /// Create a thought event.
    pub fn thought(text: impl Into<String>) -> Self {
        Self {
            kind: AgentEventKind::Thought,
            data: Value::String(text.into()),
        }
    }

    /// Create an action event.
    pub fn action(text: impl Into<String>) -> Self {
        Self {
            kind: AgentEventKind::Action,
            data: Value::String(text.into()),
        }
    }

    /// Create a result event from a listing.
    pub fn result(result: &ProcurementResult) -> Self {
        Self {
            kind: AgentEventKind::Result,
            data: serde_json::to_value(result).unwrap_or(Value::Null),
        }
    }

    /// Create a summary event.
    pub fn summary(summary: &ProcurementSummary) -> Self {
        Self {
            kind: AgentEventKind::Summary,
            data: serde_json::to_value(summary).unwrap_or(Value::Null),
        }
    }

    /// Create an error event.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AgentEventKind::Error,
            data: Value::String(text.into()),
        }
    }

    /// Create the terminal done event.
    pub fn done() -> Self {
        Self {
            kind: AgentEventKind::Done,
            data: Value::Null,
        }
    }

    /// Returns true for the terminal `done` event.
    pub fn is_done(&self) -> bool {
        self.kind == AgentEventKind::Done
    }
}

/// Listing found for one furniture piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementResult {
    pub furniture_id: String,
    pub name: String,
    pub sku: Option<String>,
    pub price_usd: Option<f64>,
    pub in_stock: bool,
    pub buy_url: String,
}

/// End-of-session totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementSummary {
    pub total_usd: f64,
    pub within_budget: bool,
    pub items: usize,
}

impl ProcurementSummary {
    /// Build a summary from a total against a nullable budget ceiling.
    pub fn new(total_usd: f64, budget_usd: Option<f64>, items: usize) -> Self {
        let total_usd = (total_usd * 100.0).round() / 100.0;
        Self {
            total_usd,
            within_budget: budget_usd.map_or(true, |budget| total_usd <= budget),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = AgentEvent::thought("looking at 4 pieces");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "thought");
        assert_eq!(json["data"], "looking at 4 pieces");
    }

    #[test]
    fn test_done_has_null_data() {
        let json = serde_json::to_value(AgentEvent::done()).unwrap();
        assert_eq!(json["event"], "done");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_summary_within_budget() {
        let summary = ProcurementSummary::new(1746.0, Some(2000.0), 4);
        assert!(summary.within_budget);

        let summary = ProcurementSummary::new(1746.0, Some(1000.0), 4);
        assert!(!summary.within_budget);

        let summary = ProcurementSummary::new(1746.0, None, 4);
        assert!(summary.within_budget);
    }

    #[test]
    fn test_roundtrip() {
        let event = AgentEvent::result(&ProcurementResult {
            furniture_id: "f1".to_string(),
            name: "Sofa".to_string(),
            sku: Some("SF-MOD-001".to_string()),
            price_usd: Some(899.0),
            in_stock: true,
            buy_url: "https://example.com/buy/SF-MOD-001".to_string(),
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: AgentEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
