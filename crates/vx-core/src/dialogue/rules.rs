//! Rule-based reply strategy

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;

use super::engine::{ReplyContext, ReplyStrategy};
use super::openness::OpennessTier;
use super::selector::ReplySelector;

/// Patient is coming around
pub const CONVINCED_REPLIES: &[&str] = &[
    "You know, that actually makes sense. I hadn't thought about it that way before.",
    "I appreciate you taking the time to explain this. I'm starting to feel better about it.",
    "Thank you for addressing my concerns. I think I understand better now.",
    "That's reassuring to hear. Maybe I was worrying too much.",
];

/// Added to the convinced pool once the conversation has gone on a while
pub const READY_REPLIES: &[&str] = &[
    "Okay, I think you've convinced me. What are the next steps to get vaccinated?",
    "I feel much better about this now. Thank you for being so patient with me.",
];

pub const SIDE_EFFECT_REPLIES: &[&str] = &[
    "I see. But what about the people who have had severe reactions?",
    "That helps, but I'm still worried about potential side effects.",
    "How common are these side effects you mentioned?",
];

pub const SAFETY_REPLIES: &[&str] = &[
    "I understand they did testing, but was it really enough time?",
    "That's somewhat reassuring, but I still have some doubts.",
    "Can you tell me more about the testing process?",
];

pub const LISTENING_REPLIES: &[&str] = &[
    "I'm listening, but I'm not entirely convinced yet.",
    "That's interesting. Can you explain more?",
    "I appreciate the information, but I still have questions.",
];

/// Student came across as dismissive
pub const PUSHBACK_REPLIES: &[&str] = &[
    "You're not really listening to my concerns.",
    "I don't think you understand how I feel about this.",
    "This doesn't feel like you care about my worries.",
];

pub const SKEPTICAL_REPLIES: &[&str] = &[
    "I've heard that before, but I'm still not sure I believe it.",
    "But what about all the stories I've heard?",
    "I don't know... I'm still very skeptical.",
    "That's what they say, but how can I be sure?",
];

/// Turns after which a convinced patient may ask how to proceed
const READY_AFTER_TURNS: u32 = 3;

/// Picks a canned reply from a pool chosen by openness and message content
pub struct RuleBasedStrategy {
    selector: Arc<dyn ReplySelector>,
}

impl RuleBasedStrategy {
    pub fn new(selector: Arc<dyn ReplySelector>) -> Self {
        Self { selector }
    }

    /// The pool a reply for `ctx` is drawn from
    pub fn candidates(ctx: &ReplyContext<'_>) -> Vec<&'static str> {
        let message = ctx.message.to_lowercase();

        match OpennessTier::from_level(ctx.openness) {
            OpennessTier::High => {
                let mut pool = CONVINCED_REPLIES.to_vec();
                if ctx.turn_count > READY_AFTER_TURNS {
                    pool.extend_from_slice(READY_REPLIES);
                }
                pool
            }
            OpennessTier::Medium => {
                if message.contains("side effect") || message.contains("reaction") {
                    SIDE_EFFECT_REPLIES.to_vec()
                } else if message.contains("safe") || message.contains("tested") {
                    SAFETY_REPLIES.to_vec()
                } else {
                    LISTENING_REPLIES.to_vec()
                }
            }
            OpennessTier::Low => {
                if ctx.scores.empathy < 0.4 {
                    PUSHBACK_REPLIES.to_vec()
                } else {
                    SKEPTICAL_REPLIES.to_vec()
                }
            }
        }
    }

    /// Choose a single reply without going through the async trait
    pub fn choose(&self, ctx: &ReplyContext<'_>) -> String {
        let pool = Self::candidates(ctx);
        let index = self.selector.select(pool.len()).min(pool.len() - 1);
        pool[index].to_string()
    }
}

#[async_trait]
impl ReplyStrategy for RuleBasedStrategy {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    async fn reply(&self, ctx: &ReplyContext<'_>) -> Result<String> {
        Ok(self.choose(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::selector::{FixedSelector, SeededSelector};
    use crate::persona;
    use crate::scoring::ScoreSet;

    fn ctx<'a>(openness: f64, turn_count: u32, message: &'a str, scores: &'a ScoreSet) -> ReplyContext<'a> {
        ReplyContext {
            persona: persona::resolve("default"),
            history: &[],
            openness,
            turn_count,
            message,
            scores,
        }
    }

    fn with_empathy(empathy: f64) -> ScoreSet {
        ScoreSet {
            empathy,
            ..ScoreSet::zero()
        }
    }

    #[test]
    fn test_high_openness_pool() {
        let scores = with_empathy(0.9);
        assert_eq!(RuleBasedStrategy::candidates(&ctx(0.8, 2, "hi", &scores)), CONVINCED_REPLIES);

        let extended = RuleBasedStrategy::candidates(&ctx(0.8, 4, "hi", &scores));
        assert_eq!(extended.len(), CONVINCED_REPLIES.len() + READY_REPLIES.len());
        assert!(extended.contains(&READY_REPLIES[0]));
    }

    #[test]
    fn test_medium_openness_branches_on_topic() {
        let scores = with_empathy(0.5);
        assert_eq!(
            RuleBasedStrategy::candidates(&ctx(0.5, 1, "Most Side Effects are mild", &scores)),
            SIDE_EFFECT_REPLIES
        );
        assert_eq!(
            RuleBasedStrategy::candidates(&ctx(0.5, 1, "allergic reactions are rare", &scores)),
            SIDE_EFFECT_REPLIES
        );
        assert_eq!(
            RuleBasedStrategy::candidates(&ctx(0.5, 1, "It was tested on thousands", &scores)),
            SAFETY_REPLIES
        );
        assert_eq!(
            RuleBasedStrategy::candidates(&ctx(0.5, 1, "Tell me more", &scores)),
            LISTENING_REPLIES
        );
    }

    #[test]
    fn test_low_openness_branches_on_empathy() {
        let cold = with_empathy(0.3);
        let warm = with_empathy(0.6);
        assert_eq!(RuleBasedStrategy::candidates(&ctx(0.3, 1, "x", &cold)), PUSHBACK_REPLIES);
        assert_eq!(RuleBasedStrategy::candidates(&ctx(0.3, 1, "x", &warm)), SKEPTICAL_REPLIES);
    }

    #[tokio::test]
    async fn test_reply_uses_selector() {
        let strategy = RuleBasedStrategy::new(Arc::new(FixedSelector(2)));
        let scores = with_empathy(0.3);
        let reply = strategy.reply(&ctx(0.2, 1, "x", &scores)).await.unwrap();
        assert_eq!(reply, PUSHBACK_REPLIES[2]);
    }

    #[tokio::test]
    async fn test_seeded_reply_is_from_pool() {
        let strategy = RuleBasedStrategy::new(Arc::new(SeededSelector::new(7)));
        let scores = with_empathy(0.6);
        for _ in 0..10 {
            let reply = strategy.reply(&ctx(0.3, 1, "x", &scores)).await.unwrap();
            assert!(SKEPTICAL_REPLIES.contains(&reply.as_str()));
        }
    }
}
