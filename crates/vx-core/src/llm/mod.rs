//! Generation backend client and types
//!
//! Supports both OpenAI-compatible APIs and the Anthropic Messages API.

mod client;
mod types;

pub use client::{LlmClient, TextGenerator};
pub use types::*;
