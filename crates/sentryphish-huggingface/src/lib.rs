// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hugging Face zero-shot provider adapter for the Sentryphish pipeline.
//!
//! Implements [`ProviderAdapter`] using zero-shot classification with a
//! phishing/legitimate label pair. The winning label's score becomes the
//! verdict confidence.

pub mod client;
pub mod types;

use async_trait::async_trait;
use sentryphish_config::SentryConfig;
use sentryphish_core::error::SentryError;
use sentryphish_core::traits::{PluginAdapter, ProviderAdapter};
use sentryphish_core::types::{AdapterType, HealthStatus, ProviderAnalysis};
use sentryphish_detector::heuristic;
use tracing::{debug, info};

use crate::client::HuggingfaceClient;
use crate::types::{LEGITIMATE_LABEL, PHISHING_LABEL};

/// Hugging Face zero-shot provider implementing [`ProviderAdapter`].
///
/// API token resolution order: config -> `HUGGINGFACE_API_KEY` env var -> error.
pub struct HuggingfaceProvider {
    client: HuggingfaceClient,
}

impl HuggingfaceProvider {
    /// Creates a new Hugging Face provider from the given configuration.
    pub fn new(config: &SentryConfig) -> Result<Self, SentryError> {
        let api_key = resolve_api_key(&config.huggingface.api_key)?;
        let client = HuggingfaceClient::new(
            api_key,
            config.huggingface.model.clone(),
            std::time::Duration::from_secs(config.huggingface.timeout_secs),
        )?;

        info!(
            model = config.huggingface.model,
            "Hugging Face provider initialized"
        );

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: HuggingfaceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for HuggingfaceProvider {
    fn name(&self) -> &str {
        "huggingface"
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
        debug!("Hugging Face provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for HuggingfaceProvider {
    async fn analyze(&self, content: &str) -> Result<ProviderAnalysis, SentryError> {
        let response = self.client.classify(content).await?;

        let phishing_score = response.score_for(PHISHING_LABEL);
        let legitimate_score = response.score_for(LEGITIMATE_LABEL);

        // Both labels must be present; otherwise the verdict is a neutral 0.5.
        let (is_phishing, confidence) = match (phishing_score, legitimate_score) {
            (Some(p), Some(l)) => {
                let is_phishing = p > l;
                (is_phishing, if is_phishing { p } else { l })
            }
            _ => (false, 0.5),
        };

        let explanation = if is_phishing {
            "This message was classified as possible phishing by content analysis".to_string()
        } else {
            "This message appears to be legitimate".to_string()
        };

        // Zero-shot classification returns no evidence, so words and URLs
        // are extracted locally.
        Ok(ProviderAnalysis {
            is_phishing,
            confidence,
            explanation,
            suspicious_words: heuristic::extract_suspicious_words(content),
            suspicious_urls: heuristic::extract_urls(content),
        })
    }
}

/// Resolves the API token from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, SentryError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("HUGGINGFACE_API_KEY").map_err(|_| {
        SentryError::Config(
            "Hugging Face API token not found. Set huggingface.api_key in config or HUGGINGFACE_API_KEY environment variable.".into(),
        )
    })
}
