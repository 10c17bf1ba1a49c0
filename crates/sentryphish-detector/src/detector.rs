// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification orchestrator.
//!
//! Runs content through skip rules, the result cache, the configured
//! provider chain (one attempt per provider, no retries), and finally the
//! offline heuristic. Always produces a verdict; provider failures degrade
//! the chain instead of failing the classification.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use sentryphish_config::model::DetectorConfig;
use sentryphish_core::traits::ProviderAdapter;
use sentryphish_core::types::{
    DetectedThreats, DetectionResult, MonitorableMessage, Provenance, ProviderAnalysis, RiskLevel,
};

use crate::cache::{CacheEntry, DetectionCache};
use crate::heuristic;
use crate::skip;

/// Orchestrates the full classification pipeline.
pub struct PhishingDetector {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    cache: Mutex<DetectionCache>,
    pending: Mutex<HashSet<String>>,
    min_content_chars: usize,
    red_threshold: f64,
}

impl PhishingDetector {
    /// Creates a detector over the given provider chain.
    ///
    /// Providers are tried in order; the list may be empty, in which case
    /// every classification falls through to the heuristic.
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &DetectorConfig) -> Self {
        Self {
            providers,
            cache: Mutex::new(DetectionCache::new(
                config.cache_max_entries,
                config.cache_ttl_hours,
            )),
            pending: Mutex::new(HashSet::new()),
            min_content_chars: config.min_content_chars,
            red_threshold: config.red_confidence_threshold,
        }
    }

    /// Classifies message content, always producing a verdict.
    pub async fn classify(&self, content: &str) -> DetectionResult {
        // Skip rules run before anything else; their verdicts are cheaper
        // than a cache lookup and are not cached.
        if let Some(skip) = skip::check(content, self.min_content_chars) {
            debug!(confidence = skip.confidence, "skip rule classified content safe");
            return DetectionResult {
                risk: RiskLevel::Green,
                confidence: skip.confidence,
                explanation: skip.explanation,
                threats: DetectedThreats::default(),
                suggested_actions: vec![],
                provenance: Provenance::skip_rule(),
            };
        }

        if let Some(cached) = self.cache.lock().await.get(content) {
            debug!("classification served from cache");
            return cached.clone();
        }

        let result = self.run_chain(content).await;
        self.cache.lock().await.insert(content, result.clone());
        result
    }

    /// Classifies a monitored message, deduplicating concurrent work.
    ///
    /// Returns `None` when the message id is already being classified.
    pub async fn classify_message(&self, message: &MonitorableMessage) -> Option<DetectionResult> {
        {
            let mut pending = self.pending.lock().await;
            if !pending.insert(message.id.clone()) {
                debug!(id = message.id, "classification already in flight");
                return None;
            }
        }

        let result = self.classify(&message.content).await;
        self.pending.lock().await.remove(&message.id);
        Some(result)
    }

    /// Exports the cache contents for persistence.
    pub async fn export_cache(&self) -> Vec<(String, CacheEntry)> {
        self.cache.lock().await.snapshot()
    }

    /// Restores the cache from a persisted snapshot, dropping expired entries.
    pub async fn restore_cache(&self, snapshot: Vec<(String, CacheEntry)>) {
        self.cache.lock().await.restore(snapshot);
    }

    /// Drops all cached classifications.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Tries each provider once, falling through to the heuristic.
    async fn run_chain(&self, content: &str) -> DetectionResult {
        for provider in &self.providers {
            match provider.analyze(content).await {
                Ok(analysis) => {
                    info!(
                        provider = provider.name(),
                        is_phishing = analysis.is_phishing,
                        confidence = analysis.confidence,
                        "provider classified content"
                    );
                    return self.from_provider(provider.name(), analysis);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next tier"
                    );
                }
            }
        }

        let verdict = heuristic::evaluate(content);
        info!(
            is_phishing = verdict.is_phishing,
            confidence = verdict.confidence,
            "heuristic classified content"
        );
        self.from_heuristic(verdict)
    }

    /// Builds a result from a provider analysis.
    fn from_provider(&self, provider_name: &str, analysis: ProviderAnalysis) -> DetectionResult {
        let risk = self.map_risk(analysis.is_phishing, analysis.confidence);
        DetectionResult {
            risk,
            confidence: analysis.confidence,
            explanation: analysis.explanation,
            threats: DetectedThreats {
                suspicious_links: analysis.suspicious_urls,
                sensitive_data_requests: vec![],
                urgent_language: vec![],
                other: analysis.suspicious_words,
            },
            suggested_actions: suggested_actions(risk),
            provenance: Provenance::provider(provider_name),
        }
    }

    /// Builds a result from a heuristic verdict.
    fn from_heuristic(&self, verdict: heuristic::HeuristicVerdict) -> DetectionResult {
        let risk = self.map_risk(verdict.is_phishing, verdict.confidence);
        DetectionResult {
            risk,
            confidence: verdict.confidence,
            explanation: verdict.explanation,
            threats: DetectedThreats {
                suspicious_links: verdict.suspicious_urls,
                sensitive_data_requests: verdict.sensitive_requests,
                urgent_language: verdict.urgency_markers,
                other: verdict.suspicious_words,
            },
            suggested_actions: suggested_actions(risk),
            provenance: Provenance::heuristic(),
        }
    }

    /// Maps a phishing verdict and confidence to a risk tier.
    ///
    /// Non-phishing is green. Phishing at or above the red threshold is
    /// red; below it the verdict lands in the yellow band.
    fn map_risk(&self, is_phishing: bool, confidence: f64) -> RiskLevel {
        if !is_phishing {
            RiskLevel::Green
        } else if confidence >= self.red_threshold {
            RiskLevel::Red
        } else {
            RiskLevel::Yellow
        }
    }
}

/// Actions suggested to the user for a given risk tier.
fn suggested_actions(risk: RiskLevel) -> Vec<String> {
    match risk {
        RiskLevel::Red => vec![
            "Do not click any links in this message".to_string(),
            "Do not reply or share personal data".to_string(),
            "Block the sender".to_string(),
            "Delete the message".to_string(),
        ],
        RiskLevel::Yellow => vec![
            "Verify the sender through another channel".to_string(),
            "Avoid clicking links until the sender is verified".to_string(),
        ],
        RiskLevel::Green => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentryphish_core::types::MessageSource;
    use sentryphish_test_utils::MockProvider;

    const PHISHY: &str =
        "URGENT: your bank account is suspended, verify your password at https://bit.ly/x1";
    const BENIGN: &str = "The quarterly report is attached, see section three for details.";

    fn config() -> DetectorConfig {
        DetectorConfig::default()
    }

    fn detector_with(providers: Vec<Arc<dyn ProviderAdapter>>) -> PhishingDetector {
        PhishingDetector::new(providers, &config())
    }

    #[tokio::test]
    async fn skip_rule_short_circuits_providers() {
        let provider = Arc::new(MockProvider::new("mock"));
        let detector = detector_with(vec![provider.clone()]);

        let result = detector.classify("ok").await;
        assert_eq!(result.risk, RiskLevel::Green);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.provenance.to_string(), "skip-rule");
        assert!(provider.calls().await.is_empty());
    }

    #[tokio::test]
    async fn first_provider_verdict_wins() {
        let first = Arc::new(MockProvider::new("first"));
        let second = Arc::new(MockProvider::new("second"));
        first
            .push_analysis(MockProvider::phishing_analysis(0.9))
            .await;

        let detector = detector_with(vec![first.clone(), second.clone()]);
        let result = detector.classify(PHISHY).await;

        assert_eq!(result.risk, RiskLevel::Red);
        assert_eq!(result.provenance.to_string(), "first");
        assert!(second.calls().await.is_empty());
    }

    #[tokio::test]
    async fn failed_provider_falls_to_next() {
        let first = Arc::new(MockProvider::new("first"));
        let second = Arc::new(MockProvider::new("second"));
        first.push_error("simulated outage").await;
        second
            .push_analysis(MockProvider::phishing_analysis(0.95))
            .await;

        let detector = detector_with(vec![first.clone(), second.clone()]);
        let result = detector.classify(PHISHY).await;

        assert_eq!(result.provenance.to_string(), "second");
        assert_eq!(result.risk, RiskLevel::Red);
        assert_eq!(first.calls().await.len(), 1);
        assert_eq!(second.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn exhausted_chain_uses_heuristic() {
        let provider = Arc::new(MockProvider::new("mock"));
        provider.push_error("down").await;

        let detector = detector_with(vec![provider]);
        let result = detector.classify(PHISHY).await;

        assert_eq!(result.provenance.to_string(), "heuristic");
        assert!(result.is_suspect());
        assert!(!result.threats.urgent_language.is_empty());
    }

    #[tokio::test]
    async fn empty_chain_uses_heuristic() {
        let detector = detector_with(vec![]);
        let result = detector.classify(BENIGN).await;
        assert_eq!(result.provenance.to_string(), "heuristic");
        assert_eq!(result.risk, RiskLevel::Green);
    }

    #[tokio::test]
    async fn low_confidence_phishing_is_yellow() {
        let provider = Arc::new(MockProvider::new("mock"));
        provider
            .push_analysis(MockProvider::phishing_analysis(0.5))
            .await;

        let detector = detector_with(vec![provider]);
        let result = detector.classify(PHISHY).await;
        assert_eq!(result.risk, RiskLevel::Yellow);
        assert!(!result.suggested_actions.is_empty());
    }

    #[tokio::test]
    async fn cached_result_skips_providers() {
        let provider = Arc::new(MockProvider::new("mock"));
        provider
            .push_analysis(MockProvider::safe_analysis(0.9))
            .await;

        let detector = detector_with(vec![provider.clone()]);
        let first = detector.classify(BENIGN).await;
        let second = detector.classify(BENIGN).await;

        assert_eq!(first.explanation, second.explanation);
        assert_eq!(provider.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn classify_message_deduplicates_by_id() {
        let detector = detector_with(vec![]);
        let message = MonitorableMessage::new(MessageSource::Sms, "+15550100", PHISHY);

        // Mark the id as pending, as a concurrent classification would.
        detector.pending.lock().await.insert(message.id.clone());
        assert!(detector.classify_message(&message).await.is_none());

        detector.pending.lock().await.remove(&message.id);
        assert!(detector.classify_message(&message).await.is_some());
    }

    #[tokio::test]
    async fn cache_snapshot_round_trip() {
        let detector = detector_with(vec![]);
        detector.classify(BENIGN).await;

        let snapshot = detector.export_cache().await;
        assert_eq!(snapshot.len(), 1);

        let fresh = detector_with(vec![Arc::new(MockProvider::new("unused"))]);
        fresh.restore_cache(snapshot).await;
        // Restored entry is served without touching providers.
        let result = fresh.classify(BENIGN).await;
        assert_eq!(result.provenance.to_string(), "heuristic");
    }
}
