//! HTTP API handlers
//!
//! Thin adapters between JSON bodies and the session manager.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vx_core::feedback::Feedback;
use vx_core::persona::DEFAULT_PERSONA;
use vx_core::scoring::ScoreSet;
use vx_core::session::SessionSummary;

use crate::error::{ApiError, Result};
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Start session request payload
#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    pub persona: Option<String>,
}

/// Start session response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub success: bool,
    pub session_id: String,
    pub patient_message: String,
    /// Persona key as requested, even when it fell back to the default persona
    pub persona: String,
}

/// Send message request payload
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

/// Send message response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub patient_message: String,
    pub scores: ScoreSet,
    pub feedback: Feedback,
}

/// End session request payload
#[derive(Debug, Deserialize)]
pub struct EndSessionRequest {
    pub session_id: Option<String>,
}

/// End session response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub success: bool,
    pub summary: SessionSummary,
}

/// Transcription response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub success: bool,
    pub text: String,
}

/// Treat absent and blank fields alike
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Start a practice session with a persona
///
/// An empty body starts the default persona.
pub async fn start_session(State(state): State<AppState>, body: Bytes) -> Result<Json<StartSessionResponse>> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        StartSessionRequest::default()
    } else {
        serde_json::from_slice::<StartSessionRequest>(&body)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid JSON body: {}", e)))?
    };

    let persona = req.persona.unwrap_or_else(|| DEFAULT_PERSONA.to_string());
    debug!("Start session request: persona={}", persona);

    let start = state.session_manager.start(&persona).await?;

    Ok(Json(StartSessionResponse {
        success: true,
        session_id: start.session_id,
        patient_message: start.patient_message,
        persona,
    }))
}

/// Score a student message and return the patient's reply with feedback
pub async fn send_message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>> {
    let missing = || ApiError::InvalidRequest("Missing session_id or message".to_string());

    let Json(req) = payload.map_err(|_| missing())?;
    let (Some(session_id), Some(message)) = (required(req.session_id), required(req.message)) else {
        return Err(missing());
    };

    let exchange = state.session_manager.advance(&session_id, &message).await?;

    Ok(Json(SendMessageResponse {
        success: true,
        patient_message: exchange.patient_message,
        scores: exchange.scores,
        feedback: exchange.feedback,
    }))
}

/// End a session and return its summary
pub async fn end_session(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EndSessionRequest>, JsonRejection>,
) -> Result<Json<EndSessionResponse>> {
    let missing = || ApiError::InvalidRequest("Missing session_id".to_string());

    let Json(req) = payload.map_err(|_| missing())?;
    let session_id = required(req.session_id).ok_or_else(missing)?;

    let summary = state.session_manager.end(&session_id).await?;

    Ok(Json(EndSessionResponse {
        success: true,
        summary,
    }))
}

/// Transcribe an uploaded `audio` file
pub async fn transcribe_speech(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>> {
    let no_audio = || ApiError::InvalidRequest("No audio file".to_string());

    let mut multipart = multipart.map_err(|_| no_audio())?;
    let mut audio = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("audio") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid audio upload: {}", e)))?;
            audio = Some(bytes);
            break;
        }
    }

    let audio = audio.ok_or_else(no_audio)?;
    let text = state.transcriber.transcribe(&audio).await?;

    Ok(Json(TranscriptionResponse { success: true, text }))
}
