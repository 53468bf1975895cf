//! Openness state transitions

use serde::{Deserialize, Serialize};

use crate::scoring::ScoreSet;

/// Gain when the student is both empathetic and accurate
pub const OPENNESS_GAIN: f64 = 0.15;
/// Loss when the student comes across as dismissive
pub const OPENNESS_LOSS: f64 = 0.10;

/// Apply one turn's scores to the current openness level
///
/// The result always stays within [0, 1].
pub fn adjust_openness(current: f64, scores: &ScoreSet) -> f64 {
    if scores.empathy > 0.7 && scores.accuracy > 0.6 {
        (current + OPENNESS_GAIN).min(1.0)
    } else if scores.empathy < 0.4 {
        (current - OPENNESS_LOSS).max(0.0)
    } else {
        current
    }
}

/// Coarse openness band used to pick a reply pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpennessTier {
    Low,
    Medium,
    High,
}

impl OpennessTier {
    pub fn from_level(level: f64) -> Self {
        if level > 0.7 {
            OpennessTier::High
        } else if level > 0.4 {
            OpennessTier::Medium
        } else {
            OpennessTier::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(empathy: f64, accuracy: f64) -> ScoreSet {
        ScoreSet {
            empathy,
            accuracy,
            ..ScoreSet::zero()
        }
    }

    #[test]
    fn test_increase_when_empathetic_and_accurate() {
        let next = adjust_openness(0.5, &scores(0.85, 0.81));
        assert!((next - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_increase_is_capped() {
        assert_eq!(adjust_openness(0.95, &scores(0.9, 0.9)), 1.0);
    }

    #[test]
    fn test_decrease_when_dismissive() {
        let next = adjust_openness(0.3, &scores(0.2, 0.9));
        assert!((next - 0.2).abs() < 1e-9);
        assert_eq!(adjust_openness(0.05, &scores(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_unchanged_in_between() {
        assert_eq!(adjust_openness(0.5, &scores(0.6, 0.9)), 0.5);
        assert_eq!(adjust_openness(0.5, &scores(0.8, 0.6)), 0.5);
        assert_eq!(adjust_openness(0.5, &scores(0.4, 0.2)), 0.5);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(OpennessTier::from_level(0.71), OpennessTier::High);
        assert_eq!(OpennessTier::from_level(0.7), OpennessTier::Medium);
        assert_eq!(OpennessTier::from_level(0.41), OpennessTier::Medium);
        assert_eq!(OpennessTier::from_level(0.4), OpennessTier::Low);
        assert_eq!(OpennessTier::from_level(0.0), OpennessTier::Low);
    }
}
