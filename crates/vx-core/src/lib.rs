//! vx-core: conversation trainer core library
//!
//! Scoring of student messages, feedback composition, the simulated patient's
//! dialogue engine and session management.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod persona;
pub mod scoring;
pub mod session;
pub mod transcription;

pub use config::{ApiConfig, Config, DialogueConfig, LlmConfig, LlmProvider};
pub use dialogue::{DialogueEngine, RandomSelector, ReplySelector, ReplyStrategy, SeededSelector};
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackComposer, Level};
pub use llm::{LlmClient, TextGenerator};
pub use persona::Persona;
pub use scoring::{AverageScores, ScoreSet, Scorer};
pub use session::{
    Exchange, InMemorySessionStore, Session, SessionManager, SessionStart, SessionStore, SessionSummary,
};
pub use transcription::{PlaceholderTranscriber, SpeechTranscriber};
