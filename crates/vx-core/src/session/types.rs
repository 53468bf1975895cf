//! Session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persona::Persona;
use crate::scoring::{AverageScores, ScoreSet};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Patient,
    Student,
}

/// One utterance in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn patient(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Patient,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn student(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Student,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Per-session conversational state
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque unique identifier
    pub id: String,
    pub persona: &'static Persona,
    /// Append-only; starts with the persona's opening line
    pub conversation_history: Vec<Turn>,
    /// One entry per student turn
    pub scores_history: Vec<ScoreSet>,
    /// Always within [0, 1]
    pub openness_level: f64,
    /// Number of student turns processed
    pub turn_count: u32,
    pub start_time: DateTime<Utc>,
}

impl Session {
    /// Create a session seeded from `persona`, opening line included
    pub fn new(persona: &'static Persona) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            persona,
            conversation_history: vec![Turn::patient(persona.initial_message)],
            scores_history: Vec::new(),
            openness_level: persona.openness,
            turn_count: 0,
            start_time: Utc::now(),
        }
    }

    /// The persona's opening line
    pub fn opening_message(&self) -> &str {
        self.persona.initial_message
    }

    /// Snapshot for the end of a session, measured at `now`
    pub fn summary_at(&self, now: DateTime<Utc>) -> SessionSummary {
        let elapsed = (now - self.start_time).num_milliseconds().max(0);

        SessionSummary {
            duration_minutes: elapsed as f64 / 60_000.0,
            turn_count: self.turn_count,
            final_openness: self.openness_level,
            average_scores: AverageScores::of(&self.scores_history),
            persona_name: self.persona.name.to_string(),
            conversation_history: self.conversation_history.clone(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary_at(Utc::now())
    }
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub duration_minutes: f64,
    pub turn_count: u32,
    pub final_openness: f64,
    pub average_scores: AverageScores,
    pub persona_name: String,
    pub conversation_history: Vec<Turn>,
}
