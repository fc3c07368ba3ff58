//! LLM client abstraction and HTTP implementation.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Default chat-completions endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Errors from a single LLM call attempt.
///
/// A malformed response is treated identically to a network failure by the
/// orchestrator: both count against the attempt budget.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("service returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response missing narrative content")]
    MalformedResponse,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

pub type LlmResult<T> = Result<T, LlmError>;

/// One synchronous request/response contract against the narrative service.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a system + user prompt pair, returning the narrative text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String>;

    /// Model name for logging.
    fn model_name(&self) -> &str;
}

/// Configuration for the HTTP LLM client.
///
/// Generation parameters are fixed per client: a bounded completion size and
/// a low temperature for report consistency.
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Completion token bound.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

/// HTTP client for an OpenAI-style chat-completions service.
pub struct HttpLlmClient {
    config: LlmClientConfig,
    client: reqwest::Client,
}

impl HttpLlmClient {
    /// Create a client with the given configuration.
    pub fn new(config: LlmClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create from environment variables.
    ///
    /// `KENNELWORKS_LLM_API_KEY` is required; `KENNELWORKS_LLM_ENDPOINT` and
    /// `KENNELWORKS_LLM_MODEL` override the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("KENNELWORKS_LLM_API_KEY")
            .map_err(|_| anyhow!("KENNELWORKS_LLM_API_KEY environment variable not set"))?;

        let mut config = LlmClientConfig {
            api_key,
            ..Default::default()
        };
        if let Ok(endpoint) = std::env::var("KENNELWORKS_LLM_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("KENNELWORKS_LLM_MODEL") {
            config.model = model;
        }

        Ok(Self::new(config))
    }
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Pull the narrative text out of a chat-completions response body.
fn extract_narrative(body: &str) -> LlmResult<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|_| LlmError::MalformedResponse)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(LlmError::MalformedResponse)
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String> {
        let body = serde_json::json!({
            "model": &self.config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let narrative = extract_narrative(&text)?;
        tracing::debug!(
            model = %self.config.model,
            chars = narrative.len(),
            "narrative received"
        );
        Ok(narrative)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
