//! Procurement agent streaming SDK for Roomcraft
//!
//! This crate owns the wire protocol between the procurement agent and its
//! consumers: the event vocabulary, the frame codec that puts events on a
//! byte stream and reads them back from arbitrarily chunked input, and the
//! runner that drives a procurement session step by step.
//!
//! # Example
//!
//! ```rust,no_run
//! use roomcraft_agent::FrameDecoder;
//!
//! fn relay(frame_bytes: &[u8]) {
//!     let mut decoder = FrameDecoder::new();
//!     for event in decoder.feed(frame_bytes) {
//!         println!("event: {:?}", event.kind);
//!     }
//! }
//! ```

mod codec;
mod error;
mod event;
mod runner;

// Re-export main types
pub use codec::{encode_frame, FrameDecoder};
pub use error::AgentError;
pub use event::{AgentEvent, AgentEventKind, ProcurementResult, ProcurementSummary};
pub use runner::{ProcurementRunner, ProcurementSource};
