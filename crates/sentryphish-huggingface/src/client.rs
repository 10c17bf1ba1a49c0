// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Hugging Face Inference API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use sentryphish_core::SentryError;
use tracing::debug;

use crate::types::{ClassifyRequest, ClassifyResponse};

/// Base URL for the Hugging Face Inference API.
const API_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// HTTP client for zero-shot classification requests.
#[derive(Debug, Clone)]
pub struct HuggingfaceClient {
    client: reqwest::Client,
    model: String,
    timeout: Duration,
    base_url: String,
}

impl HuggingfaceClient {
    /// Creates a new Hugging Face Inference API client.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, SentryError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                SentryError::Config(format!("invalid API token header value: {e}"))
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

    /// Classifies the input against the phishing/legitimate label pair.
    pub async fn classify(&self, content: &str) -> Result<ClassifyResponse, SentryError> {
        let url = format!("{}/{}", self.base_url, self.model);
        let request = ClassifyRequest::phishing(content);

        let response = self
            .client
            .post(&url)
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
        debug!(status = %status, model = self.model, "Hugging Face response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentryError::Provider {
                message: format!("Hugging Face API returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| SentryError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| SentryError::Provider {
            message: format!("failed to parse Hugging Face response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
