//! Message scoring
//!
//! Keyword and sentiment heuristics that rate a student message on
//! empathy, accuracy and clarity.

mod scorer;
mod sentiment;
mod types;

pub use scorer::Scorer;
pub(crate) use scorer::word_count;
pub use sentiment::SentimentAnalyzer;
pub use types::{AverageScores, ScoreDetails, ScoreSet, SentimentScores};
