//! Client library for the Roomcraft API
//!
//! Thin reqwest wrapper over the JSON endpoints plus a streaming consumer for
//! procurement sessions.
//!
//! # Example
//!
//! ```rust,no_run
//! use roomcraft_client::RoomcraftClient;
//!
//! async fn watch(design_id: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RoomcraftClient::new("http://127.0.0.1:8000");
//!
//!     let mut stream = client.procure(design_id, Some(2000.0), &[]).await?;
//!     while let Some(event) = stream.next_event().await {
//!         println!("{:?}: {}", event.kind, event.data);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod http;
mod stream;

// Re-export main types
pub use error::ClientError;
pub use http::{JobSnapshot, RoomcraftClient};
pub use stream::EventStream;
