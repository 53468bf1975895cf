//! Generated-text reply strategy

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::Result;
use crate::llm::{GenerationRequest, TextGenerator};

use super::engine::{ReplyContext, ReplyStrategy};
use super::prompt;

/// Default number of prior turns sent to the backend
pub const DEFAULT_HISTORY_WINDOW: usize = 4;

/// Asks a text generation backend to reply in character
pub struct GeneratedStrategy {
    generator: Arc<dyn TextGenerator>,
    history_window: usize,
}

impl GeneratedStrategy {
    pub fn new(generator: Arc<dyn TextGenerator>, history_window: usize) -> Self {
        Self {
            generator,
            history_window,
        }
    }

    /// Request sent to the backend for `ctx`
    pub fn request(&self, ctx: &ReplyContext<'_>) -> GenerationRequest {
        GenerationRequest {
            system: prompt::system_instruction(ctx.persona, ctx.openness),
            messages: prompt::transcript(ctx.history, self.history_window, ctx.message),
        }
    }
}

#[async_trait]
impl ReplyStrategy for GeneratedStrategy {
    fn name(&self) -> &'static str {
        "generated"
    }

    async fn reply(&self, ctx: &ReplyContext<'_>) -> Result<String> {
        let request = self.request(ctx);
        debug!(
            "Requesting generated reply for {} ({} messages)",
            ctx.persona.name,
            request.messages.len()
        );
        self.generator.generate(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use crate::persona;
    use crate::scoring::ScoreSet;
    use crate::session::Turn;
    use std::sync::Mutex;

    /// Records the last request and answers with a fixed line
    struct Recording {
        last: Mutex<Option<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGenerator for Recording {
        async fn generate(&self, request: GenerationRequest) -> Result<String> {
            *self.last.lock().unwrap() = Some(request);
            Ok("Maybe you're right.".to_string())
        }
    }

    #[tokio::test]
    async fn test_reply_passes_prompt_to_generator() {
        let generator = Arc::new(Recording {
            last: Mutex::new(None),
        });
        let strategy = GeneratedStrategy::new(generator.clone(), DEFAULT_HISTORY_WINDOW);

        let history = vec![Turn::patient("I'm worried.")];
        let scores = ScoreSet::zero();
        let ctx = ReplyContext {
            persona: persona::resolve("default"),
            history: &history,
            openness: 0.7,
            turn_count: 1,
            message: "That's understandable.",
            scores: &scores,
        };

        let reply = strategy.reply(&ctx).await.unwrap();
        assert_eq!(reply, "Maybe you're right.");

        let request = generator.last.lock().unwrap().clone().unwrap();
        assert!(request.system.contains("Alex"));
        assert!(request.system.contains("fairly open"));
        assert_eq!(
            request.messages,
            vec![Message::assistant("I'm worried."), Message::user("That's understandable.")]
        );
    }
}
