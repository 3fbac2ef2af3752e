//! HTTP request handlers.

mod agent;
mod ar;
mod designs;
mod health;
mod jobs;
mod rooms;

pub use agent::agent_stream;
pub use ar::ar_session;
pub use designs::generate_design;
pub use health::{fallback, health_check};
pub use jobs::{get_job, submit_job};
pub use rooms::analyze_room;
