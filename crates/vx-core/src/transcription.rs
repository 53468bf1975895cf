//! Speech-to-text seam
//!
//! No recognizer is wired in yet; the placeholder keeps the endpoint usable
//! by the frontend.

use async_trait::async_trait;

use crate::Result;

/// Text returned until a recognizer is integrated
pub const PLACEHOLDER_TRANSCRIPT: &str = "Speech transcription placeholder - integrate with STT service";

/// Turns recorded audio into text
#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Returns the fixed placeholder transcript for any input
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTranscriber;

#[async_trait]
impl SpeechTranscriber for PlaceholderTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        tracing::debug!("Received {} bytes of audio for transcription", audio.len());
        Ok(PLACEHOLDER_TRANSCRIPT.to_string())
    }
}
