//! Session manager
//!
//! Orchestrates a practice conversation: scoring each student message,
//! advancing the dialogue, composing feedback and summarizing at the end.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::dialogue::DialogueEngine;
use crate::error::{Error, Result};
use crate::feedback::{Feedback, FeedbackComposer};
use crate::persona;
use crate::scoring::{ScoreSet, Scorer};

use super::store::SessionStore;
use super::types::{Session, SessionSummary};

/// Result of starting a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStart {
    pub session_id: String,
    pub patient_message: String,
    pub persona_name: String,
}

/// Result of one student turn
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub patient_message: String,
    pub scores: ScoreSet,
    pub feedback: Feedback,
}

/// Session manager
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    scorer: Scorer,
    composer: FeedbackComposer,
    engine: DialogueEngine,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, engine: DialogueEngine) -> Self {
        Self {
            store,
            scorer: Scorer::new(),
            composer: FeedbackComposer::new(),
            engine,
        }
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    /// Number of live sessions
    pub async fn active_sessions(&self) -> Result<usize> {
        self.store.len().await
    }

    /// Start a session; unknown persona keys get the default persona
    pub async fn start(&self, persona_key: &str) -> Result<SessionStart> {
        let persona = persona::resolve(persona_key);
        let session = Session::new(persona);

        let start = SessionStart {
            session_id: session.id.clone(),
            patient_message: session.opening_message().to_string(),
            persona_name: persona.name.to_string(),
        };

        self.store.put(session).await?;
        info!(
            "Started session {} with persona {} ({})",
            start.session_id, persona.key, persona.name
        );

        Ok(start)
    }

    /// Score a student message and produce the patient's reply and feedback
    pub async fn advance(&self, session_id: &str, message: &str) -> Result<Exchange> {
        let mut session = self
            .store
            .get(session_id)
            .await?
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;

        let scores = self.scorer.score(message);
        let reply = self.engine.advance(&mut session, message, &scores).await?;
        // The session may have been ended while the reply was generated
        self.store.replace(session).await?;

        let feedback = self.composer.compose(message, &scores);
        debug!(
            "Session {}: overall feedback tier {}",
            session_id, feedback.overall_tier
        );

        Ok(Exchange {
            patient_message: reply,
            scores,
            feedback,
        })
    }

    /// Summarize and remove a session
    pub async fn end(&self, session_id: &str) -> Result<SessionSummary> {
        let session = self
            .store
            .delete(session_id)
            .await?
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;

        let summary = session.summary();
        info!(
            "Ended session {} after {} turns (openness {:.2})",
            session_id, summary.turn_count, summary.final_openness
        );

        Ok(summary)
    }
}
