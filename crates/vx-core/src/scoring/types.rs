//! Score types

use serde::{Deserialize, Serialize};

/// Sentiment sub-scores, each rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Auxiliary per-message details
///
/// Every field is absent for an empty message, which serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_question: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentScores>,
}

impl ScoreDetails {
    pub fn is_empty(&self) -> bool {
        self.word_count.is_none() && self.has_question.is_none() && self.sentiment.is_none()
    }
}

/// Scores for a single student message, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub empathy: f64,
    pub accuracy: f64,
    pub clarity: f64,
    #[serde(default)]
    pub details: ScoreDetails,
}

impl ScoreSet {
    /// All-zero scores with empty details
    pub fn zero() -> Self {
        Self::default()
    }

    /// Mean of the three dimensions
    pub fn mean(&self) -> f64 {
        (self.empathy + self.accuracy + self.clarity) / 3.0
    }
}

/// Per-dimension average across a session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AverageScores {
    pub empathy: f64,
    pub accuracy: f64,
    pub clarity: f64,
}

impl AverageScores {
    /// Average of `history`; all zeros when empty
    pub fn of(history: &[ScoreSet]) -> Self {
        if history.is_empty() {
            return Self::default();
        }

        let n = history.len() as f64;
        let (e, a, c) = history.iter().fold((0.0, 0.0, 0.0), |(e, a, c), s| {
            (e + s.empathy, a + s.accuracy, c + s.clarity)
        });

        Self {
            empathy: e / n,
            accuracy: a / n,
            clarity: c / n,
        }
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(e: f64, a: f64, c: f64) -> ScoreSet {
        ScoreSet {
            empathy: e,
            accuracy: a,
            clarity: c,
            details: ScoreDetails::default(),
        }
    }

    #[test]
    fn test_zero_serializes_empty_details() {
        let json = serde_json::to_value(ScoreSet::zero()).unwrap();
        assert_eq!(json["empathy"], 0.0);
        assert_eq!(json["details"], serde_json::json!({}));
    }

    #[test]
    fn test_average_of_empty_history() {
        assert_eq!(AverageScores::of(&[]), AverageScores::default());
    }

    #[test]
    fn test_average_of_history() {
        let avg = AverageScores::of(&[scores(0.4, 0.6, 1.0), scores(0.8, 0.2, 0.0)]);
        assert!((avg.empathy - 0.6).abs() < 1e-9);
        assert!((avg.accuracy - 0.4).abs() < 1e-9);
        assert!((avg.clarity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.8449), 0.84);
        assert_eq!(round2(0.856), 0.86);
        assert_eq!(round2(-0.126), -0.13);
    }
}
