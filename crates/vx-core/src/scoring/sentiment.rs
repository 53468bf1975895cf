//! Sentiment analysis
//!
//! Thin wrapper over the VADER lexicon and rule set from `vader_sentiment`,
//! rounding its polarity scores to two decimals.

use vader_sentiment::SentimentIntensityAnalyzer;

use super::types::{SentimentScores, round2};

/// VADER sentiment analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Polarity scores for `text`, rounded to two decimals
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        if text.trim().is_empty() {
            return SentimentScores::default();
        }

        // The analyzer only borrows the crate's static lexicons
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        SentimentScores {
            compound: round2(get("compound")),
            positive: round2(get("pos")),
            negative: round2(get("neg")),
            neutral: round2(get("neu")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        SentimentAnalyzer::new().polarity_scores(text).compound
    }

    #[test]
    fn test_empty_text() {
        let scores = SentimentAnalyzer::new().polarity_scores("   ");
        assert_eq!(scores, SentimentScores::default());
    }

    #[test]
    fn test_neutral_text() {
        let scores = SentimentAnalyzer::new().polarity_scores("The clinic opens at nine");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);
    }

    #[test]
    fn test_positive_and_negative() {
        assert!(compound("This is a good idea.") > 0.1);
        assert!(compound("That is a terrible and dangerous idea.") < -0.1);
    }

    #[test]
    fn test_everyday_conversation_words() {
        assert!(compound("I'm so sorry, that sounds frustrating and stressful.") < -0.1);
        assert!(compound("That sounds awesome, I'm grateful you asked!") > 0.1);
        assert!(compound("It's natural to feel nervous and scared.") < 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(compound("This is good") > 0.0);
        assert!(compound("This is not good") < 0.0);
        assert!(compound("This isn't good") < 0.0);
    }

    #[test]
    fn test_booster_increases_intensity() {
        assert!(compound("This is extremely good") > compound("This is good"));
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        assert!(compound("It is bad but the results are great") > 0.0);
        assert!(compound("It is great but the results are bad") < 0.0);
    }

    #[test]
    fn test_exclamation_emphasis() {
        assert!(compound("This is great!!") > compound("This is great"));
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let s = SentimentAnalyzer::new().polarity_scores("I worry, but the data looks good");
        let total = s.positive + s.negative + s.neutral;
        assert!((total - 1.0).abs() <= 0.02);
    }
}
