//! vx-api: HTTP API for the conversation trainer
//!
//! Exposes session start/message/end and speech transcription as JSON
//! endpoints. Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{AppState, build_router, start_server};
