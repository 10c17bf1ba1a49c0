// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek provider adapter for the Sentryphish detection pipeline.
//!
//! Implements [`ProviderAdapter`] against the DeepSeek chat-completion API
//! with a short timeout and low temperature tuned for fast classification.

pub mod client;
pub mod types;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use sentryphish_config::SentryConfig;
use sentryphish_core::error::SentryError;
use sentryphish_core::traits::{PluginAdapter, ProviderAdapter};
use sentryphish_core::types::{AdapterType, HealthStatus, ProviderAnalysis};
use tracing::{debug, info, warn};

use crate::client::DeepseekClient;
use crate::types::ReplyVerdict;

/// System prompt instructing the model to answer with JSON only.
const ANALYSIS_PROMPT: &str = "You are a specialized, highly efficient phishing detector. \
Analyze the provided text and determine whether it contains phishing. \
Respond ONLY with JSON in the format:\n\
{\n\
  \"isPhishing\": boolean,\n\
  \"confidence\": number (0.0-1.0),\n\
  \"explanation\": \"short explanation\",\n\
  \"suspiciousWords\": [\"word1\", \"word2\"],\n\
  \"suspiciousUrls\": [\"url1\", \"url2\"]\n\
}";

/// Matches the JSON object spanning the reply text.
static REPLY_JSON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// DeepSeek provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `DEEPSEEK_API_KEY` env var -> error.
pub struct DeepseekProvider {
    client: DeepseekClient,
}

impl DeepseekProvider {
    /// Creates a new DeepSeek provider from the given configuration.
    pub fn new(config: &SentryConfig) -> Result<Self, SentryError> {
        let api_key = resolve_api_key(&config.deepseek.api_key)?;
        let client = DeepseekClient::new(
            api_key,
            config.deepseek.model.clone(),
            std::time::Duration::from_secs(config.deepseek.timeout_secs),
            config.deepseek.max_tokens,
            config.deepseek.temperature,
        )?;

        info!(model = config.deepseek.model, "DeepSeek provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: DeepseekClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for DeepseekProvider {
    fn name(&self) -> &str {
        "deepseek"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, SentryError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SentryError> {
        debug!("DeepSeek provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for DeepseekProvider {
    async fn analyze(&self, content: &str) -> Result<ProviderAnalysis, SentryError> {
        let reply = self.client.chat(ANALYSIS_PROMPT, content).await?;
        Ok(parse_reply(&reply))
    }
}

/// Parses the model's reply into a [`ProviderAnalysis`].
///
/// Extracts the JSON object spanning the reply. When parsing fails, falls
/// back to scanning the reply text for verdict keywords, with 0.7
/// confidence on a hit and 0.3 otherwise.
fn parse_reply(reply: &str) -> ProviderAnalysis {
    if let Some(m) = REPLY_JSON.find(reply) {
        match serde_json::from_str::<ReplyVerdict>(m.as_str()) {
            Ok(verdict) => {
                return ProviderAnalysis {
                    is_phishing: verdict.is_phishing,
                    confidence: verdict.confidence,
                    explanation: verdict
                        .explanation
                        .unwrap_or_else(|| "No explanation provided".to_string()),
                    suspicious_words: verdict.suspicious_words,
                    suspicious_urls: verdict.suspicious_urls,
                };
            }
            Err(e) => {
                warn!(error = %e, "failed to parse JSON verdict from DeepSeek reply");
            }
        }
    }

    let lower = reply.to_lowercase();
    let is_phishing =
        lower.contains("phishing") || lower.contains("suspicious") || lower.contains("fraudulent");

    ProviderAnalysis {
        is_phishing,
        confidence: if is_phishing { 0.7 } else { 0.3 },
        explanation: reply.to_string(),
        suspicious_words: vec![],
        suspicious_urls: vec![],
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, SentryError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("DEEPSEEK_API_KEY").map_err(|_| {
        SentryError::Config(
            "DeepSeek API key not found. Set deepseek.api_key in config or DEEPSEEK_API_KEY environment variable.".into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": content}}
            ]
        })
    }

    fn test_provider(base_url: &str) -> DeepseekProvider {
        let client = DeepseekClient::new(
            "test-key".into(),
            "deepseek-chat".into(),
            std::time::Duration::from_secs(5),
            800,
            0.2,
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        DeepseekProvider::with_client(client)
    }

    #[test]
    fn parse_reply_json_verdict() {
        let reply = "{\"isPhishing\": true, \"confidence\": 0.88, \"explanation\": \"asks for card number\", \"suspiciousWords\": [\"card\"], \"suspiciousUrls\": []}";
        let analysis = parse_reply(reply);
        assert!(analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.88);
        assert_eq!(analysis.suspicious_words, vec!["card"]);
    }

    #[test]
    fn parse_reply_missing_confidence_defaults() {
        let reply = "{\"isPhishing\": true, \"explanation\": \"fraud\"}";
        let analysis = parse_reply(reply);
        assert!(analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.5);
    }

    #[test]
    fn parse_reply_keyword_fallback() {
        let reply = "The content appears fraudulent based on its tone.";
        let analysis = parse_reply(reply);
        assert!(analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.7);

        let clean = parse_reply("Nothing noteworthy in this text.");
        assert!(!clean.is_phishing);
        assert_eq!(clean.confidence, 0.3);
    }

    #[tokio::test]
    async fn analyze_parses_structured_verdict() {
        let server = MockServer::start().await;

        let content = "{\"isPhishing\": false, \"confidence\": 0.95, \"explanation\": \"routine notification\", \"suspiciousWords\": [], \"suspiciousUrls\": []}";
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(content)))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let analysis = provider
            .analyze("Your package was delivered to the front desk")
            .await
            .unwrap();
        assert!(!analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.95);
    }

    #[tokio::test]
    async fn analyze_propagates_402() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(402).set_body_string("payment required"))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let err = provider
            .analyze("suspicious content to classify")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("credits"), "got: {err}");
    }

    #[test]
    fn adapter_metadata() {
        let client = DeepseekClient::new(
            "k".into(),
            "deepseek-chat".into(),
            std::time::Duration::from_secs(5),
            800,
            0.2,
        )
        .unwrap();
        let provider = DeepseekProvider::with_client(client);
        assert_eq!(provider.name(), "deepseek");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }
}
