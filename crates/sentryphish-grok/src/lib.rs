// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grok provider adapter for the Sentryphish detection pipeline.
//!
//! This crate implements [`ProviderAdapter`] against the Grok chat-completion
//! API. The model is prompted to return a structured JSON verdict; replies
//! that fail to parse fall back to a keyword scan of the reply text.

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

use crate::client::GrokClient;
use crate::types::ReplyVerdict;

/// System prompt instructing the model to emit a JSON verdict.
const ANALYSIS_PROMPT: &str = "You are a security analyzer specialized in detecting phishing. \
Analyze the provided text and identify whether it contains phishing or fraud attempts. \
Return your analysis as JSON with the following fields:\n\
{\n\
  \"isPhishing\": boolean,\n\
  \"confidence\": number (0-1),\n\
  \"explanation\": string,\n\
  \"suspiciousWords\": string[],\n\
  \"suspiciousUrls\": string[]\n\
}";

/// Matches a reply-embedded JSON object fenced in a ```json block.
static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\n(.*?)\n```").unwrap());

/// Matches the first bare JSON object in the reply text.
static BARE_JSON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*?\}").unwrap());

/// Grok provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GROK_API_KEY` env var -> error.
pub struct GrokProvider {
    client: GrokClient,
}

impl GrokProvider {
    /// Creates a new Grok provider from the given configuration.
    pub fn new(config: &SentryConfig) -> Result<Self, SentryError> {
        let api_key = resolve_api_key(&config.grok.api_key)?;
        let client = GrokClient::new(
            api_key,
            config.grok.model.clone(),
            std::time::Duration::from_secs(config.grok.timeout_secs),
        )?;

        info!(model = config.grok.model, "Grok provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GrokClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for GrokProvider {
    fn name(&self) -> &str {
        "grok"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, SentryError> {
        // Avoid consuming tokens on health checks; constructability implies
        // a usable key and endpoint.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SentryError> {
        debug!("Grok provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GrokProvider {
    async fn analyze(&self, content: &str) -> Result<ProviderAnalysis, SentryError> {
        let reply = self.client.chat(ANALYSIS_PROMPT, content).await?;
        Ok(parse_reply(&reply))
    }
}

/// Parses the model's reply into a [`ProviderAnalysis`].
///
/// Looks for a fenced ```json block first, then a bare JSON object. When
/// neither parses, falls back to scanning the reply text for verdict
/// keywords, with 0.5 confidence on a hit and 0.1 otherwise.
fn parse_reply(reply: &str) -> ProviderAnalysis {
    let json_str = FENCED_JSON
        .captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .or_else(|| BARE_JSON.find(reply).map(|m| m.as_str()));

    if let Some(json_str) = json_str {
        match serde_json::from_str::<ReplyVerdict>(json_str) {
            Ok(verdict) => {
                return ProviderAnalysis {
                    is_phishing: verdict.is_phishing,
                    confidence: verdict.confidence,
                    explanation: verdict
                        .explanation
                        .unwrap_or_else(|| "No explanation available".to_string()),
                    suspicious_words: verdict.suspicious_words,
                    suspicious_urls: verdict.suspicious_urls,
                };
            }
            Err(e) => {
                warn!(error = %e, "failed to parse JSON verdict from Grok reply");
            }
        }
    }

    // Keyword fallback over the raw reply.
    let lower = reply.to_lowercase();
    let is_phishing =
        lower.contains("phishing") || lower.contains("suspicious") || lower.contains("fraud");

    ProviderAnalysis {
        is_phishing,
        confidence: if is_phishing { 0.5 } else { 0.1 },
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

    std::env::var("GROK_API_KEY").map_err(|_| {
        SentryError::Config(
            "Grok API key not found. Set grok.api_key in config or GROK_API_KEY environment variable.".into(),
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

    fn test_provider(base_url: &str) -> GrokProvider {
        let client = GrokClient::new(
            "test-key".into(),
            "grok-2-latest".into(),
            std::time::Duration::from_secs(15),
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        GrokProvider::with_client(client)
    }

    #[test]
    fn parse_reply_fenced_json() {
        let reply = "Here is my analysis:\n```json\n{\"isPhishing\": true, \"confidence\": 0.92, \"explanation\": \"credential harvest\", \"suspiciousWords\": [\"password\"], \"suspiciousUrls\": [\"http://evil.example\"]}\n```";
        let analysis = parse_reply(reply);
        assert!(analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.92);
        assert_eq!(analysis.explanation, "credential harvest");
        assert_eq!(analysis.suspicious_words, vec!["password"]);
        assert_eq!(analysis.suspicious_urls, vec!["http://evil.example"]);
    }

    #[test]
    fn parse_reply_bare_json() {
        let reply = "{\"isPhishing\": false, \"confidence\": 0.8, \"explanation\": \"looks fine\"}";
        let analysis = parse_reply(reply);
        assert!(!analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.8);
        assert_eq!(analysis.explanation, "looks fine");
        assert!(analysis.suspicious_words.is_empty());
    }

    #[test]
    fn parse_reply_keyword_fallback_positive() {
        let reply = "This message looks like phishing to me, be careful.";
        let analysis = parse_reply(reply);
        assert!(analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.5);
        assert_eq!(analysis.explanation, reply);
    }

    #[test]
    fn parse_reply_keyword_fallback_negative() {
        let reply = "This message is a routine delivery update.";
        let analysis = parse_reply(reply);
        assert!(!analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.1);
    }

    #[test]
    fn parse_reply_missing_explanation_uses_placeholder() {
        let reply = "{\"isPhishing\": true, \"confidence\": 0.7}";
        let analysis = parse_reply(reply);
        assert_eq!(analysis.explanation, "No explanation available");
    }

    #[tokio::test]
    async fn analyze_parses_structured_verdict() {
        let server = MockServer::start().await;

        let content = "```json\n{\"isPhishing\": true, \"confidence\": 0.9, \"explanation\": \"urgent credential request\", \"suspiciousWords\": [\"urgent\"], \"suspiciousUrls\": []}\n```";
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(content)))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let analysis = provider
            .analyze("Your account will be suspended! Verify now")
            .await
            .unwrap();
        assert!(analysis.is_phishing);
        assert_eq!(analysis.confidence, 0.9);
        assert_eq!(analysis.suspicious_words, vec!["urgent"]);
    }

    #[tokio::test]
    async fn analyze_propagates_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let result = provider.analyze("some suspicious content here").await;
        assert!(result.is_err());
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(&Some("from-config".into())).unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn adapter_metadata() {
        // Constructing via config requires a key; metadata is static.
        let client = GrokClient::new(
            "k".into(),
            "grok-2-latest".into(),
            std::time::Duration::from_secs(15),
        )
        .unwrap();
        let provider = GrokProvider::with_client(client);
        assert_eq!(provider.name(), "grok");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }
}
