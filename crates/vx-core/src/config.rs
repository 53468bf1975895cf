//! Configuration management
//!
//! Settings are read in the following priority order:
//! 1. Environment variables
//! 2. `vx-trainer.toml` in the working directory
//! 3. Built-in defaults
//!
//! `${VAR_NAME}` inside the config file is expanded from the environment.
//! A missing LLM credential is valid: it selects the rule-based reply strategy.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Default config file name
pub const CONFIG_FILE: &str = "vx-trainer.toml";

/// Generation backend wire format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API
    #[default]
    OpenAi,
    /// Anthropic Messages API
    Claude,
}

impl LlmProvider {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "claude" | "anthropic" => LlmProvider::Claude,
            _ => LlmProvider::OpenAi,
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "gpt-4o-mini",
            LlmProvider::Claude => "claude-3-5-haiku-latest",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "https://api.openai.com/v1",
            LlmProvider::Claude => "https://api.anthropic.com/v1",
        }
    }
}

/// Generation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; `None` disables the generation backend
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier (provider default when unset)
    pub model: Option<String>,

    /// API provider
    #[serde(default)]
    pub provider: LlmProvider,

    /// Alternate service endpoint
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            provider: LlmProvider::OpenAi,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    /// Whether a credential for the generation backend is present
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Configured model, or the provider's default
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Configured endpoint, or the provider's default
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u64 {
    150
}

fn default_temperature() -> f32 {
    0.8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port for the HTTP server
    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Allowed CORS origins; permissive when unset
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,

    /// Directory holding the browser frontend (served as the router fallback)
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            allowed_origins: None,
            static_dir: None,
        }
    }
}

fn default_api_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Number of prior turns sent to the generation backend
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
        }
    }
}

fn default_history_window() -> usize {
    4
}

/// Main configuration for vx-trainer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` references from the environment.
    ///
    /// Unknown variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        Self::expand_vars(value, |name| std::env::var(name).ok())
    }

    fn expand_vars(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Some(env_value) = lookup(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse a TOML document (after env expansion) without env overrides
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let mut cfg: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let mut cfg = Self::read_toml_file(path)?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn read_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load `vx-trainer.toml` when present, otherwise the environment alone
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }
        Ok(Self::from_env())
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg
    }

    fn apply_env_overrides(&mut self) {
        // LLM_API_KEY wins over the provider-specific name
        if let Some(key) = non_empty_var("LLM_API_KEY").or_else(|| non_empty_var("OPENAI_API_KEY")) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = non_empty_var("LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(provider) = non_empty_var("LLM_PROVIDER") {
            self.llm.provider = LlmProvider::parse(&provider);
        }
        if let Some(base_url) = non_empty_var("LLM_BASE_URL") {
            self.llm.base_url = Some(base_url);
        }
        if let Some(secs) = non_empty_var("LLM_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.llm.timeout_secs = secs;
        }

        if let Some(port) = non_empty_var("API_PORT").and_then(|p| p.parse().ok()) {
            self.api.port = port;
        }
        if let Some(origins) = non_empty_var("API_ALLOWED_ORIGINS") {
            self.api.allowed_origins = Some(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        if let Some(dir) = non_empty_var("STATIC_DIR") {
            self.api.static_dir = Some(dir);
        }

        if let Some(window) = non_empty_var("DIALOGUE_HISTORY_WINDOW").and_then(|w| w.parse().ok()) {
            self.dialogue.history_window = window;
        }

        self.normalize();
    }

    /// An empty credential in the file means "absent"
    fn normalize(&mut self) {
        if !self.llm.is_enabled() {
            self.llm.api_key = None;
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
