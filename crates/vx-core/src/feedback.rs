//! Feedback composition
//!
//! Deterministic template selection from a message and its scores.

use serde::{Deserialize, Serialize};

use crate::scoring::{ScoreSet, word_count};

/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 3;

const SUGGESTION_THRESHOLD: f64 = 0.6;
const STRENGTH_THRESHOLD: f64 = 0.7;

const PERSPECTIVE_PHRASES: &[&str] = &["understand", "i hear", "appreciate"];

const FALLBACK_STRENGTH: &str = "Keep practicing to develop your strengths";

/// Performance tier, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Fair,
    Good,
    Excellent,
}

impl Level {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Level::Excellent
        } else if score >= 0.65 {
            Level::Good
        } else if score >= 0.5 {
            Level::Fair
        } else {
            Level::NeedsImprovement
        }
    }

    fn overall_summary(&self) -> &'static str {
        match self {
            Level::Excellent => {
                "Excellent response! You demonstrated strong empathy, provided accurate information, and communicated clearly."
            }
            Level::Good => {
                "Good response. You're on the right track, but there's room for improvement in some areas."
            }
            Level::Fair => {
                "Fair response. Consider focusing on building rapport and providing clearer information."
            }
            Level::NeedsImprovement => {
                "This response needs improvement. Focus on being more empathetic and providing accurate, clear information."
            }
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Excellent => write!(f, "Excellent"),
            Level::Good => write!(f, "Good"),
            Level::Fair => write!(f, "Fair"),
            Level::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Feedback for one scoring dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionFeedback {
    pub score: f64,
    pub level: Level,
    pub message: String,
}

impl DimensionFeedback {
    fn new(score: f64, message: &str) -> Self {
        Self {
            score,
            level: Level::from_score(score),
            message: message.to_string(),
        }
    }
}

/// An actionable improvement tip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub tip: String,
    pub example: String,
}

impl Suggestion {
    fn new(category: &str, tip: &str, example: &str) -> Self {
        Self {
            category: category.to_string(),
            tip: tip.to_string(),
            example: example.to_string(),
        }
    }
}

/// Structured feedback for a student message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub overall: String,
    pub overall_tier: Level,
    pub empathy: DimensionFeedback,
    pub accuracy: DimensionFeedback,
    pub clarity: DimensionFeedback,
    pub suggestions: Vec<Suggestion>,
    pub strengths: Vec<String>,
}

/// Builds [`Feedback`] from a message and its scores
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackComposer;

impl FeedbackComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, message: &str, scores: &ScoreSet) -> Feedback {
        let words = word_count(message);
        let tier = Level::from_score(scores.mean());

        Feedback {
            overall: tier.overall_summary().to_string(),
            overall_tier: tier,
            empathy: DimensionFeedback::new(scores.empathy, empathy_message(scores.empathy)),
            accuracy: DimensionFeedback::new(scores.accuracy, accuracy_message(scores.accuracy)),
            clarity: DimensionFeedback::new(scores.clarity, clarity_message(scores.clarity, words)),
            suggestions: suggestions(message, scores, words),
            strengths: strengths(message, scores),
        }
    }
}

fn empathy_message(score: f64) -> &'static str {
    if score >= 0.75 {
        "You demonstrated excellent empathy by acknowledging the patient's concerns and showing understanding."
    } else if score >= 0.6 {
        "You showed good empathy. To improve, try using more phrases that validate the patient's feelings."
    } else if score >= 0.4 {
        "Your empathy could be stronger. Remember to acknowledge the patient's concerns before providing information."
    } else {
        "Try to be more empathetic. Start by validating the patient's feelings with phrases like 'I understand your concern' or 'That's a valid worry.'"
    }
}

fn accuracy_message(score: f64) -> &'static str {
    if score >= 0.75 {
        "You provided accurate, evidence-based information. Well done!"
    } else if score >= 0.6 {
        "Good accuracy. Consider adding specific data or studies to strengthen your response."
    } else if score >= 0.4 {
        "Include more factual information. Reference clinical trials, FDA approval, or specific statistics."
    } else {
        "Your response needs more accurate information. Avoid speculation and focus on evidence-based facts about vaccine safety and efficacy."
    }
}

fn clarity_message(score: f64, words: usize) -> &'static str {
    if score >= 0.75 {
        "Your message was clear and well-structured. Great job!"
    } else if score >= 0.6 {
        "Generally clear. Try to organize your thoughts into 2-3 concise sentences."
    } else if score >= 0.4 {
        if words < 15 {
            "Your response is too brief. Provide more detail to address the patient's concerns."
        } else {
            "Simplify your language. Avoid excessive jargon and keep sentences concise."
        }
    } else if words < 10 {
        "Your response is too short. Elaborate more to address the patient's concerns thoroughly."
    } else {
        "Your response is unclear or too complex. Use simpler language and break down information into digestible parts."
    }
}

fn suggestions(message: &str, scores: &ScoreSet, words: usize) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if scores.empathy < SUGGESTION_THRESHOLD {
        suggestions.push(Suggestion::new(
            "Empathy",
            "Start your response by acknowledging the patient's feelings: 'I understand why you might feel that way...'",
            "I can see why you're concerned about side effects. Many people share that worry, and it's completely valid.",
        ));
    }

    if scores.accuracy < SUGGESTION_THRESHOLD {
        suggestions.push(Suggestion::new(
            "Accuracy",
            "Include specific facts and data to support your points.",
            "Clinical trials with over 30,000 participants showed that the vaccine is over 90% effective and has a strong safety profile.",
        ));
    }

    if scores.clarity < SUGGESTION_THRESHOLD {
        if words < 15 {
            suggestions.push(Suggestion::new(
                "Clarity",
                "Provide more detailed information while staying focused.",
                "Expand your response to include specific examples and explanations that address the patient's concern.",
            ));
        } else {
            suggestions.push(Suggestion::new(
                "Clarity",
                "Keep your response concise and focused on 1-2 main points.",
                "Break complex information into shorter, more digestible sentences.",
            ));
        }
    }

    if !message.contains('?') {
        suggestions.push(Suggestion::new(
            "Engagement",
            "Ask follow-up questions to better understand the patient's concerns.",
            "What specifically worries you most about the vaccine?",
        ));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn strengths(message: &str, scores: &ScoreSet) -> Vec<String> {
    let lower = message.to_lowercase();

    let checks = [
        (scores.empathy >= STRENGTH_THRESHOLD, "Strong empathetic communication"),
        (scores.accuracy >= STRENGTH_THRESHOLD, "Accurate, evidence-based information"),
        (scores.clarity >= STRENGTH_THRESHOLD, "Clear and concise communication"),
        (message.contains('?'), "Good use of questions for engagement"),
        (
            PERSPECTIVE_PHRASES.iter().any(|p| lower.contains(p)),
            "Acknowledges patient perspective",
        ),
    ];

    let strengths: Vec<String> = checks
        .iter()
        .filter(|(holds, _)| *holds)
        .map(|(_, text)| text.to_string())
        .collect();

    if strengths.is_empty() {
        vec![FALLBACK_STRENGTH.to_string()]
    } else {
        strengths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreDetails;

    fn scores(empathy: f64, accuracy: f64, clarity: f64) -> ScoreSet {
        ScoreSet {
            empathy,
            accuracy,
            clarity,
            details: ScoreDetails::default(),
        }
    }

    fn compose(message: &str, s: &ScoreSet) -> Feedback {
        FeedbackComposer::new().compose(message, s)
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(Level::from_score(0.8), Level::Excellent);
        assert_eq!(Level::from_score(0.79), Level::Good);
        assert_eq!(Level::from_score(0.65), Level::Good);
        assert_eq!(Level::from_score(0.5), Level::Fair);
        assert_eq!(Level::from_score(0.49), Level::NeedsImprovement);
        assert!(Level::Excellent > Level::Good);
        assert!(Level::Fair > Level::NeedsImprovement);
    }

    #[test]
    fn test_level_serialization() {
        let json = serde_json::to_string(&Level::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
        assert_eq!(Level::NeedsImprovement.to_string(), "Needs Improvement");
    }

    #[test]
    fn test_overall_tier_from_mean() {
        let fb = compose("Hello?", &scores(0.9, 0.9, 0.9));
        assert_eq!(fb.overall_tier, Level::Excellent);
        assert!(fb.overall.starts_with("Excellent response!"));

        let fb = compose("Hello?", &scores(0.2, 0.3, 0.4));
        assert_eq!(fb.overall_tier, Level::NeedsImprovement);
    }

    #[test]
    fn test_dimension_messages_use_own_thresholds() {
        let fb = compose("Hello?", &scores(0.76, 0.61, 0.45));
        assert_eq!(fb.empathy.level, Level::Good);
        assert!(fb.empathy.message.starts_with("You demonstrated excellent empathy"));
        assert_eq!(fb.accuracy.level, Level::Fair);
        assert!(fb.accuracy.message.starts_with("Good accuracy"));
        assert_eq!(fb.clarity.score, 0.45);
    }

    #[test]
    fn test_clarity_message_branches_on_length() {
        let short = "Get the vaccine.";
        let long = "The vaccine works by training the immune system with a harmless signal so that later exposure finds defenses ready.";

        assert!(compose(short, &scores(0.5, 0.5, 0.5)).clarity.message.contains("too brief"));
        assert!(compose(long, &scores(0.5, 0.5, 0.5)).clarity.message.starts_with("Simplify"));
        assert!(compose(short, &scores(0.5, 0.5, 0.3)).clarity.message.contains("too short"));
        assert!(compose(long, &scores(0.5, 0.5, 0.3)).clarity.message.contains("unclear or too complex"));
    }

    #[test]
    fn test_suggestions_priority_and_limit() {
        let fb = compose("No question here.", &scores(0.1, 0.1, 0.1));
        assert_eq!(fb.suggestions.len(), MAX_SUGGESTIONS);
        let categories: Vec<_> = fb.suggestions.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Empathy", "Accuracy", "Clarity"]);
    }

    #[test]
    fn test_engagement_suggestion_when_no_question() {
        let fb = compose("Statement only.", &scores(0.9, 0.9, 0.9));
        assert_eq!(fb.suggestions.len(), 1);
        assert_eq!(fb.suggestions[0].category, "Engagement");

        let fb = compose("Any questions?", &scores(0.9, 0.9, 0.9));
        assert!(fb.suggestions.is_empty());
    }

    #[test]
    fn test_clarity_suggestion_wording() {
        let fb = compose("Short one?", &scores(0.9, 0.9, 0.3));
        assert_eq!(fb.suggestions[0].tip, "Provide more detailed information while staying focused.");
    }

    #[test]
    fn test_strengths_collected() {
        let fb = compose("I understand. What worries you?", &scores(0.7, 0.75, 0.9));
        assert_eq!(
            fb.strengths,
            vec![
                "Strong empathetic communication",
                "Accurate, evidence-based information",
                "Clear and concise communication",
                "Good use of questions for engagement",
                "Acknowledges patient perspective",
            ]
        );
    }

    #[test]
    fn test_perspective_phrase_is_case_insensitive() {
        let fb = compose("I hear you.", &scores(0.1, 0.1, 0.1));
        assert_eq!(fb.strengths, vec!["Acknowledges patient perspective"]);
    }

    #[test]
    fn test_strengths_fallback() {
        let fb = compose("Get it.", &scores(0.1, 0.1, 0.1));
        assert_eq!(fb.strengths, vec![FALLBACK_STRENGTH]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let s = scores(0.55, 0.62, 0.48);
        assert_eq!(compose("Hello there", &s), compose("Hello there", &s));
    }
}
