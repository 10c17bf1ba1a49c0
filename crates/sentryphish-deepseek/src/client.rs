// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the DeepSeek chat-completion API.
//!
//! Provides [`DeepseekClient`] with a short per-request timeout; DeepSeek
//! is positioned as the fast tier in the provider chain.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use sentryphish_core::SentryError;
use tracing::debug;

use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Base URL for the DeepSeek chat-completion endpoint.
const API_BASE_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// HTTP client for DeepSeek API communication.
#[derive(Debug, Clone)]
pub struct DeepseekClient {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
    temperature: f64,
    timeout: Duration,
    base_url: String,
}

impl DeepseekClient {
    /// Creates a new DeepSeek API client.
    pub fn new(
        api_key: String,
        model: String,
        timeout: Duration,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<Self, SentryError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                SentryError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SentryError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            max_tokens,
            temperature,
            timeout,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a chat request and returns the assistant's reply text.
    ///
    /// A 402 status gets a dedicated hint about account credits since it
    /// is the most common misconfiguration for this API.
    pub async fn chat(
        &self,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<String, SentryError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: system_prompt.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: user_content.into(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SentryError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    SentryError::Provider {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, "DeepSeek response received");

        if status.as_u16() == 402 {
            return Err(SentryError::Provider {
                message: "DeepSeek API returned 402 Payment Required. Check account status and available credits.".into(),
                source: None,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentryError::Provider {
                message: format!("DeepSeek API returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| SentryError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| SentryError::Provider {
                message: format!("failed to parse DeepSeek response: {e}"),
                source: Some(Box::new(e)),
            })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SentryError::Provider {
                message: "DeepSeek response contained no choices".into(),
                source: None,
            })
    }
}
