// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Grok chat-completion API.
//!
//! Provides [`GrokClient`] which handles request construction,
//! bearer authentication, and timeout mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use sentryphish_core::SentryError;
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// Base URL for the Grok chat-completion endpoint.
const API_BASE_URL: &str = "https://api.x.ai/v1/chat/completions";

/// HTTP client for Grok API communication.
///
/// Manages authentication headers and the per-request timeout. Each
/// request gets a single attempt; the detector moves on to the next
/// provider on failure.
#[derive(Debug, Clone)]
pub struct GrokClient {
    client: reqwest::Client,
    model: String,
    timeout: Duration,
    base_url: String,
}

impl GrokClient {
    /// Creates a new Grok API client.
    ///
    /// # Arguments
    /// * `api_key` - Grok API key for bearer authentication
    /// * `model` - Model identifier
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, SentryError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                SentryError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

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
            max_tokens: 1000,
            temperature: 0.7,
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
        debug!(status = %status, "Grok response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("Grok API error ({status}): {}", api_err.error)
            } else {
                format!("Grok API returned {status}: {body}")
            };
            return Err(SentryError::Provider {
                message: error_msg,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| SentryError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| SentryError::Provider {
                message: format!("failed to parse Grok response: {e}"),
                source: Some(Box::new(e)),
            })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SentryError::Provider {
                message: "Grok response contained no choices".into(),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GrokClient {
        GrokClient::new(
            "test-api-key".into(),
            "grok-2-latest".into(),
            Duration::from_secs(15),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn chat_returns_first_choice_content() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "reply text"}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client.chat("system", "user text").await.unwrap();
        assert_eq!(reply, "reply text");
    }

    #[tokio::test]
    async fn chat_sends_bearer_auth_and_model() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "ok"}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "grok-2-latest",
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat("system", "user").await;
        assert!(result.is_ok(), "headers/body should match: {result:?}");
    }

    #[tokio::test]
    async fn chat_fails_on_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "invalid key"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("invalid key"), "got: {err}");
    }

    #[tokio::test]
    async fn chat_fails_on_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("no choices"), "got: {err}");
    }
}
