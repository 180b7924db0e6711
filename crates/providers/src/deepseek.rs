//! Client for DeepSeek's OpenAI-compatible `/chat/completions` endpoint.

use crate::traits::*;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection and sampling settings for [`DeepSeekProvider`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub struct DeepSeekProvider {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl DeepSeekProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.trim().to_string(),
            model: settings.model,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages,
        }
    }
}

/// Pull the assistant text out of a `chat/completions` response body.
fn extract_content(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Parse(format!("Failed to parse response: {}", e)))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse(format!("Unexpected response format: {}", body)))?;

    choice
        .message
        .content
        .map(|content| content.trim().to_string())
        .ok_or_else(|| ProviderError::Parse(format!("Unexpected response format: {}", body)))
}

#[async_trait]
impl ChatBackend for DeepSeekProvider {
    async fn send(&self, messages: &[Message]) -> Result<String, ProviderError> {
        debug!(url = %self.api_url, model = %self.model, messages = messages.len(), "chat request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::Http(format!("Network connection failed: {}", e))
                } else {
                    ProviderError::Http(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            let message = match status.as_u16() {
                401 => format!("Authentication failed. Check your API key. Details: {}", body),
                429 => format!("Rate limit exceeded. Details: {}", body),
                _ => format!("HTTP {}. Details: {}", status, body),
            };
            return Err(ProviderError::Api(message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to read response: {}", e)))?;

        extract_content(&body)
    }

    fn name(&self) -> &str {
        "DeepSeek"
    }
}
