//! Client for the OpenAI chat completions API.
//!
//! One non-streaming request per call, no retries. Any failure (transport
//! error, non-200 status, undecodable body) is logged and reported as
//! `None` so the caller can fall back.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::OpenAiConfig;
use crate::error::{Result, ServiceError};

/// Chat completion request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model ID to use for completion.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0–2.0).
    pub temperature: f64,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author (`system`, `user`, `assistant`).
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// A `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

/// Build the request body for `prompt`.
pub fn build_request(config: &OpenAiConfig, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}

/// HTTP client for the chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Full URL of the chat completions endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{base}/v1/chat/completions")
    }

    /// Send `prompt` and return the decoded JSON response on HTTP 200.
    pub async fn complete(&self, prompt: &str, api_key: &str) -> Option<serde_json::Value> {
        let body = build_request(&self.config, prompt);
        let url = self.endpoint();
        debug!(model = %self.config.model, %url, "calling generation API");

        let response = match self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "error calling generation API");
                return None;
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "generation API error");
            return None;
        }

        match response.json::<serde_json::Value>().await {
            Ok(json) => Some(json),
            Err(e) => {
                error!(error = %e, "generation API returned an undecodable body");
                None
            }
        }
    }
}
