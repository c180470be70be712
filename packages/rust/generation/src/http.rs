//! HTTP generator for OpenRouter-compatible chat-completions endpoints.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use copyforge_shared::{CopyforgeError, LlmConfig, Result};

use crate::protocol::{Generated, GenerationRequest, Generator};

/// Generator that POSTs prompts to a chat-completions endpoint and parses
/// the assistant message as JSON.
pub struct HttpGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl HttpGenerator {
    /// Build a client from config. Fails if the API key env var is unset.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                CopyforgeError::config(format!(
                    "LLM API key not found. Set the {} environment variable.",
                    config.api_key_env
                ))
            })?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("copyforge/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CopyforgeError::Generation(format!("client build: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Generated> {
        let started = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);

        debug!(method = %request.method, prompt_len = request.prompt.len(), "dispatching generation");

        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CopyforgeError::Generation(format!("{}: {e}", request.method)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CopyforgeError::Generation(format!(
                "{}: HTTP {status}: {}",
                request.method,
                &text[..text.len().min(200)]
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| CopyforgeError::Generation(format!("invalid response body: {e}")))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| CopyforgeError::Generation("response contained no choices".into()))?;

        let data: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            CopyforgeError::Generation(format!(
                "model output for '{}' is not valid JSON: {e}",
                request.method
            ))
        })?;

        let usage = chat.usage.unwrap_or_default();
        Ok(Generated {
            data,
            tokens_in: usage.prompt_tokens,
            tokens_out: usage.completion_tokens,
            model: chat.model.unwrap_or_else(|| self.model.clone()),
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}
