//! Generation API HTTP client
//!
//! Supports OpenAI-compatible chat completions and the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{LlmConfig, LlmProvider};
use crate::error::{Error, Result};

use super::types::*;

/// Produces a single reply for a system instruction and transcript
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One synchronous round trip; any failure is an error, never a panic
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// Generation API client
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider: LlmProvider,
    max_tokens: u64,
    temperature: f32,
}

impl LlmClient {
    /// Create a client; fails when no credential is configured
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|_| config.is_enabled())
            .ok_or_else(|| Error::Config("LLM API key not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_key,
            model: config.model().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            provider: config.provider.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the provider type
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Send a request to the configured provider
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        match self.provider {
            LlmProvider::OpenAi => self.send_openai_request(request).await,
            LlmProvider::Claude => self.send_claude_request(request).await,
        }
    }

    fn build_request(&self, request: GenerationRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: Some(request.system),
            messages: request.messages,
        }
    }

    async fn send_claude_request(&self, mut request: MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/messages", self.base_url);
        debug!("Sending request to Messages API: {}", url);

        // The Messages API requires the transcript to open with a user turn
        if request.messages.first().is_some_and(Message::is_assistant) {
            request.messages.insert(0, Message::user("(The student joins the conversation.)"));
        }

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Messages API error: {} - {}", status, body);
            return Err(Error::Generation(format!("{}: {}", status, body)));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Generation(format!("Failed to parse response: {} - {}", e, body)))?;

        debug!(
            "Messages API response: stop_reason={:?}, tokens={}",
            parsed.stop_reason,
            parsed.usage.as_ref().map(|u| u.output_tokens).unwrap_or(0)
        );

        Ok(parsed)
    }

    async fn send_openai_request(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending request to OpenAI-compatible API: {}", url);

        let chat_request = ChatCompletionRequest::from_messages_request(&request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("OpenAI API error: {} - {}", status, body);
            return Err(Error::Generation(format!("{}: {}", status, body)));
        }

        let chat_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Generation(format!("Failed to parse response: {} - {}", e, body)))?;

        let parsed = chat_response.to_messages_response();

        debug!(
            "OpenAI API response: stop_reason={:?}, tokens={}",
            parsed.stop_reason,
            parsed.usage.as_ref().map(|u| u.output_tokens).unwrap_or(0)
        );

        Ok(parsed)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let response = self.messages(self.build_request(request)).await?;
        let text = response.text().trim().to_string();

        if text.is_empty() {
            return Err(Error::Generation("response contained no text".to_string()));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> LlmConfig {
        LlmConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some("http://localhost:9/v1/".to_string()),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_new_requires_key() {
        let err = LlmClient::new(&LlmConfig::default()).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_new_uses_config() {
        let client = LlmClient::new(&enabled_config()).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.provider(), &LlmProvider::OpenAi);
        assert_eq!(client.base_url, "http://localhost:9/v1");
    }

    #[test]
    fn test_build_request_applies_limits() {
        let client = LlmClient::new(&enabled_config()).unwrap();
        let req = client.build_request(GenerationRequest {
            system: "sys".to_string(),
            messages: vec![Message::user("hello")],
        });
        assert_eq!(req.max_tokens, 150);
        assert_eq!(req.temperature, 0.8);
        assert_eq!(req.system.as_deref(), Some("sys"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let mut config = enabled_config();
        config.timeout_secs = 1;
        let client = LlmClient::new(&config).unwrap();

        let result = client
            .generate(GenerationRequest {
                system: "sys".to_string(),
                messages: vec![Message::user("hello")],
            })
            .await;
        assert!(result.is_err());
    }
}
