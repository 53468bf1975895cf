//! Heuristic message scorer
//!
//! Every dimension starts at 0.5 and is nudged by keyword, sentiment and
//! structure checks, then clamped to [0, 1] and rounded to two decimals.
//! Keyword matching is case-insensitive substring matching.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::sentiment::SentimentAnalyzer;
use super::types::{ScoreDetails, ScoreSet, SentimentScores, round2};

const BASE_SCORE: f64 = 0.5;

const EMPATHY_KEYWORDS: &[&str] = &[
    "understand",
    "feel",
    "concern",
    "worry",
    "appreciate",
    "valid",
    "important",
    "hear",
    "listening",
    "respect",
    "i see",
    "makes sense",
    "thank you",
    "natural",
    "normal",
];

const ACKNOWLEDGMENT_PHRASES: &[&str] = &["your concern", "your worry", "you feel", "you're"];

const DISMISSIVE_PHRASES: &[&str] = &["just", "simply", "you should", "you must", "you need to"];

const VACCINE_FACTS: &[&str] = &[
    "clinical trial",
    "fda approved",
    "tested",
    "study",
    "research",
    "data",
    "evidence",
    "scientist",
    "peer-reviewed",
    "effective",
];

const SAFETY_FACTS: &[&str] = &[
    "safe",
    "monitored",
    "side effects are",
    "rare",
    "temporary",
    "benefits outweigh",
    "millions",
    "approved",
];

const IMMUNE_SYSTEM_FACTS: &[&str] = &[
    "immune response",
    "antibodies",
    "protection",
    "immunity",
    "immune system",
    "body's defense",
];

const MISINFORMATION_FLAGS: &[&str] = &[
    "chip",
    "tracking",
    "dna change",
    "alter dna",
    "experimental",
    "not tested",
    "rushed",
    "conspiracy",
];

const HEDGING_WORDS: &[&str] = &["generally", "typically", "usually", "most", "many"];

const JARGON_TERMS: &[&str] = &[
    "immunoglobulin",
    "mrna",
    "adjuvant",
    "epitope",
    "pathogen",
    "antigen",
    "cytokine",
];

const CLARITY_PHRASES: &[&str] = &[
    "in other words",
    "for example",
    "this means",
    "let me explain",
    "simply put",
];

static NUMERIC_FIGURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+%|\d+ percent").expect("numeric figure pattern is valid"));

/// Scores student messages on empathy, accuracy and clarity
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    sentiment: SentimentAnalyzer,
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
        }
    }

    /// Score a message. Empty or whitespace-only input scores all zeros.
    pub fn score(&self, message: &str) -> ScoreSet {
        if message.trim().is_empty() {
            return ScoreSet::zero();
        }

        let lower = message.to_lowercase();
        let sentiment = self.sentiment.polarity_scores(message);

        let scores = ScoreSet {
            empathy: round2(empathy_score(&lower, &sentiment)),
            accuracy: round2(accuracy_score(&lower)),
            clarity: round2(clarity_score(message, &lower)),
            details: ScoreDetails {
                word_count: Some(word_count(message)),
                has_question: Some(message.contains('?')),
                sentiment: Some(sentiment),
            },
        };

        debug!(
            "Scored message: empathy={} accuracy={} clarity={}",
            scores.empathy, scores.accuracy, scores.clarity
        );

        scores
    }
}

pub(crate) fn word_count(message: &str) -> usize {
    message.split_whitespace().count()
}

fn count_matches(lower: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| lower.contains(*t)).count()
}

fn contains_any(lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| lower.contains(t))
}

fn empathy_score(lower: &str, sentiment: &SentimentScores) -> f64 {
    let mut score = BASE_SCORE;

    score += (count_matches(lower, EMPATHY_KEYWORDS) as f64 * 0.1).min(0.3);

    if contains_any(lower, ACKNOWLEDGMENT_PHRASES) {
        score += 0.15;
    }

    if sentiment.compound > 0.1 {
        score += 0.1;
    } else if sentiment.compound < -0.1 {
        score -= 0.15;
    }

    if contains_any(lower, DISMISSIVE_PHRASES) {
        score -= 0.1;
    }

    // "why" questions read as challenging rather than engaging
    if lower.contains('?') && !lower.contains("why") {
        score += 0.05;
    }

    score.clamp(0.0, 1.0)
}

fn accuracy_score(lower: &str) -> f64 {
    let mut score = BASE_SCORE;

    let factual = [VACCINE_FACTS, SAFETY_FACTS, IMMUNE_SYSTEM_FACTS]
        .iter()
        .map(|terms| count_matches(lower, terms))
        .sum::<usize>();
    score += (factual as f64 * 0.08).min(0.4);

    // flat penalty regardless of how many flags appear
    if contains_any(lower, MISINFORMATION_FLAGS) {
        score -= 0.3;
    }

    if NUMERIC_FIGURE.is_match(lower) || lower.contains("study") || lower.contains("trial") {
        score += 0.15;
    }

    if contains_any(lower, HEDGING_WORDS) {
        score += 0.05;
    }

    score.clamp(0.0, 1.0)
}

fn clarity_score(message: &str, lower: &str) -> f64 {
    let mut score = BASE_SCORE;

    let words = word_count(message);
    if (15..=60).contains(&words) {
        score += 0.2;
    } else if words < 10 {
        score -= 0.2;
    } else if words > 100 {
        score -= 0.15;
    }

    let sentences = message.split('.').filter(|s| !s.trim().is_empty()).count();
    if (1..=4).contains(&sentences) {
        score += 0.15;
    } else if sentences > 6 {
        score -= 0.1;
    }

    if has_well_formed_sentence(message) {
        score += 0.1;
    }

    let jargon = count_matches(lower, JARGON_TERMS);
    if jargon > 2 {
        score -= 0.15;
    } else if jargon == 1 {
        score += 0.05;
    }

    if contains_any(lower, CLARITY_PHRASES) {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// At least one terminator-delimited segment containing a word
fn has_well_formed_sentence(message: &str) -> bool {
    message
        .split(['.', '!', '?'])
        .any(|s| s.chars().any(char::is_alphanumeric))
}
