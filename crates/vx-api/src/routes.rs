//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{end_session, health, send_message, start_session, transcribe_speech};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Practice session lifecycle
        .route("/api/start-session", post(start_session))
        .route("/api/send-message", post(send_message))
        .route("/api/end-session", post(end_session))
        // Speech input
        .route("/api/transcribe-speech", post(transcribe_speech))
}
