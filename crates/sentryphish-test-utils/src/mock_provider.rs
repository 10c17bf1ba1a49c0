// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock classification provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured analyses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sentryphish_core::traits::adapter::PluginAdapter;
use sentryphish_core::traits::provider::ProviderAdapter;
use sentryphish_core::types::{AdapterType, HealthStatus, ProviderAnalysis};
use sentryphish_core::SentryError;

/// A queued outcome for the next `analyze` call.
enum MockOutcome {
    Analysis(ProviderAnalysis),
    Error(String),
}

/// A mock provider that returns pre-configured analyses.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a benign default analysis is returned. Error entries make the next
/// call fail, which exercises the detector's fallback chain.
pub struct MockProvider {
    name: String,
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty outcome queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful analysis for a future `analyze` call.
    pub async fn push_analysis(&self, analysis: ProviderAnalysis) {
        self.outcomes
            .lock()
            .await
            .push_back(MockOutcome::Analysis(analysis));
    }

    /// Queue an error for a future `analyze` call.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(MockOutcome::Error(message.into()));
    }

    /// Returns the contents analyzed so far, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Builds a phishing analysis with the given confidence.
    pub fn phishing_analysis(confidence: f64) -> ProviderAnalysis {
        ProviderAnalysis {
            is_phishing: true,
            confidence,
            explanation: "mock phishing verdict".to_string(),
            suspicious_words: vec!["urgent".to_string()],
            suspicious_urls: vec![],
        }
    }

    /// Builds a benign analysis with the given confidence.
    pub fn safe_analysis(confidence: f64) -> ProviderAnalysis {
        ProviderAnalysis {
            is_phishing: false,
            confidence,
            explanation: "mock safe verdict".to_string(),
            suspicious_words: vec![],
            suspicious_urls: vec![],
        }
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        &self.name
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
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn analyze(&self, content: &str) -> Result<ProviderAnalysis, SentryError> {
        self.calls.lock().await.push(content.to_string());

        match self.outcomes.lock().await.pop_front() {
            Some(MockOutcome::Analysis(analysis)) => Ok(analysis),
            Some(MockOutcome::Error(message)) => Err(SentryError::Provider {
                message,
                source: None,
            }),
            None => Ok(Self::safe_analysis(0.8)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_pops_outcomes_in_order() {
        let provider = MockProvider::new("mock");
        provider
            .push_analysis(MockProvider::phishing_analysis(0.9))
            .await;
        provider.push_error("simulated outage").await;

        let first = provider.analyze("first").await.unwrap();
        assert!(first.is_phishing);

        let second = provider.analyze("second").await;
        assert!(second.is_err());

        // Empty queue returns the benign default.
        let third = provider.analyze("third").await.unwrap();
        assert!(!third.is_phishing);

        assert_eq!(provider.calls().await, vec!["first", "second", "third"]);
    }
}
