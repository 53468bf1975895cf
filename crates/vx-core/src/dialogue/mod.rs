//! Dialogue engine
//!
//! The simulated patient's side of the conversation: openness tracking and
//! interchangeable reply strategies.

mod engine;
mod fallback;
mod generated;
mod openness;
mod prompt;
mod rules;
mod selector;

pub use engine::{DialogueEngine, ReplyContext, ReplyStrategy};
pub use fallback::FallbackStrategy;
pub use generated::{DEFAULT_HISTORY_WINDOW, GeneratedStrategy};
pub use openness::{OpennessTier, adjust_openness};
pub use prompt::{openness_descriptor, system_instruction, transcript};
pub use rules::RuleBasedStrategy;
pub use selector::{FixedSelector, RandomSelector, ReplySelector, SeededSelector};
