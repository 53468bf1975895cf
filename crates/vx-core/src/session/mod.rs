//! Session management module
//!
//! Per-conversation state, its storage, and the manager that ties scoring,
//! dialogue and feedback together.

mod manager;
mod store;
mod types;

pub use manager::{Exchange, SessionManager, SessionStart};
pub use store::{InMemorySessionStore, SessionStore};
pub use types::{Session, SessionSummary, Speaker, Turn};
