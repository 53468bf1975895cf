//! Dialogue engine
//!
//! Applies the openness rule, asks the configured strategy for a reply and
//! records the exchange on the session.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::Result;
use crate::config::Config;
use crate::llm::LlmClient;
use crate::persona::Persona;
use crate::scoring::ScoreSet;
use crate::session::{Session, Turn};

use super::fallback::FallbackStrategy;
use super::generated::GeneratedStrategy;
use super::openness::adjust_openness;
use super::rules::RuleBasedStrategy;
use super::selector::ReplySelector;

/// Everything a strategy may look at when producing a reply
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext<'a> {
    pub persona: &'static Persona,
    /// Conversation so far, not including the current student message
    pub history: &'a [Turn],
    /// Openness after this turn's update
    pub openness: f64,
    /// Student turns including this one
    pub turn_count: u32,
    pub message: &'a str,
    pub scores: &'a ScoreSet,
}

/// Produces the patient's next line
#[async_trait]
pub trait ReplyStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn reply(&self, ctx: &ReplyContext<'_>) -> Result<String>;
}

/// Drives one side of the conversation for every session in the process
#[derive(Clone)]
pub struct DialogueEngine {
    strategy: Arc<dyn ReplyStrategy>,
}

impl DialogueEngine {
    pub fn new(strategy: Arc<dyn ReplyStrategy>) -> Self {
        Self { strategy }
    }

    /// Engine that never calls out of process
    pub fn rule_based(selector: Arc<dyn ReplySelector>) -> Self {
        Self::new(Arc::new(RuleBasedStrategy::new(selector)))
    }

    /// Generated replies with a rule-based fallback for failed turns
    pub fn generated(
        generator: Arc<dyn crate::llm::TextGenerator>,
        history_window: usize,
        selector: Arc<dyn ReplySelector>,
    ) -> Self {
        let primary = Arc::new(GeneratedStrategy::new(generator, history_window));
        let fallback = Arc::new(RuleBasedStrategy::new(selector));
        Self::new(Arc::new(FallbackStrategy::new(primary, fallback)))
    }

    /// Resolve the strategy once from configuration
    ///
    /// A configured credential selects generated replies; otherwise only the
    /// rule-based pools are used.
    pub fn from_config(config: &Config, selector: Arc<dyn ReplySelector>) -> Result<Self> {
        if !config.llm.is_enabled() {
            info!("No generation credential configured, using rule-based replies");
            return Ok(Self::rule_based(selector));
        }

        let client = LlmClient::new(&config.llm)?;
        info!(
            "Using generated replies: provider={:?}, model={}",
            client.provider(),
            client.model()
        );

        Ok(Self::generated(
            Arc::new(client),
            config.dialogue.history_window,
            selector,
        ))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Process one student message and return the patient's reply
    pub async fn advance(&self, session: &mut Session, message: &str, scores: &ScoreSet) -> Result<String> {
        session.turn_count += 1;

        let previous = session.openness_level;
        session.openness_level = adjust_openness(previous, scores);
        debug!(
            "Session {} turn {}: openness {:.2} -> {:.2}",
            session.id, session.turn_count, previous, session.openness_level
        );

        let reply = {
            let ctx = ReplyContext {
                persona: session.persona,
                history: &session.conversation_history,
                openness: session.openness_level,
                turn_count: session.turn_count,
                message,
                scores,
            };
            self.strategy.reply(&ctx).await?
        };

        session.conversation_history.push(Turn::student(message));
        session.scores_history.push(scores.clone());
        session.conversation_history.push(Turn::patient(reply.clone()));

        Ok(reply)
    }
}
