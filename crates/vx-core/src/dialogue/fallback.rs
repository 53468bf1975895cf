//! Fallback decorator

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::Result;

use super::engine::{ReplyContext, ReplyStrategy};

/// Uses `primary`, and `fallback` for any turn where `primary` fails
pub struct FallbackStrategy {
    primary: Arc<dyn ReplyStrategy>,
    fallback: Arc<dyn ReplyStrategy>,
}

impl FallbackStrategy {
    pub fn new(primary: Arc<dyn ReplyStrategy>, fallback: Arc<dyn ReplyStrategy>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl ReplyStrategy for FallbackStrategy {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn reply(&self, ctx: &ReplyContext<'_>) -> Result<String> {
        match self.primary.reply(ctx).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    "{} reply failed, falling back to {}: {}",
                    self.primary.name(),
                    self.fallback.name(),
                    e
                );
                self.fallback.reply(ctx).await
            }
        }
    }
}
