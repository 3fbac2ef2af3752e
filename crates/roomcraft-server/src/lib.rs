//! Roomcraft Server Library
//!
//! This crate provides the HTTP API for Roomcraft: room analysis, design
//! generation, render-job orchestration with polling, the procurement agent
//! event stream, and static file serving.

pub mod config;
pub mod http;
pub mod scheduler;
pub mod state;
pub mod store;

pub use config::Config;
pub use scheduler::{RenderScheduler, SchedulerError};
pub use state::AppState;
pub use store::{JobStore, MemoryJobStore};
