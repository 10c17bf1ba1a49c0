// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the configured components into a running pipeline.

use std::sync::Arc;

use sentryphish_alert::{AlertService, LogSink};
use sentryphish_config::SentryConfig;
use sentryphish_core::{ProviderAdapter, SentryError, StorageAdapter};
use sentryphish_deepseek::DeepseekProvider;
use sentryphish_detector::PhishingDetector;
use sentryphish_grok::GrokProvider;
use sentryphish_huggingface::HuggingfaceProvider;
use sentryphish_monitor::MessageMonitor;
use sentryphish_storage::JsonStore;
use tracing::warn;

/// The assembled pipeline components.
pub struct Pipeline {
    pub detector: Arc<PhishingDetector>,
    pub alerts: Arc<AlertService>,
    pub store: Arc<JsonStore>,
}

/// Builds the remote provider chain in configured order.
///
/// Providers whose API key is missing are skipped with a warning; the
/// detector falls back to the local heuristic when the chain is empty.
pub fn build_providers(config: &SentryConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();
    for name in &config.detector.provider_order {
        let built: Result<Arc<dyn ProviderAdapter>, SentryError> = match name.as_str() {
            "grok" => GrokProvider::new(config).map(|p| Arc::new(p) as _),
            "deepseek" => DeepseekProvider::new(config).map(|p| Arc::new(p) as _),
            "huggingface" => HuggingfaceProvider::new(config).map(|p| Arc::new(p) as _),
            other => {
                warn!(provider = other, "unknown provider in provider_order, skipping");
                continue;
            }
        };
        match built {
            Ok(provider) => providers.push(provider),
            Err(err) => warn!(provider = %name, error = %err, "provider unavailable, skipping"),
        }
    }
    providers
}

/// Builds the detector, alert service, and store, and restores persisted
/// state.
pub async fn build(config: &SentryConfig) -> Result<Pipeline, SentryError> {
    let store = Arc::new(JsonStore::new(config));
    store.initialize().await?;

    let detector = Arc::new(PhishingDetector::new(
        build_providers(config),
        &config.detector,
    ));
    detector.restore_cache(store.load_cache().await).await;

    let alerts = Arc::new(AlertService::new(config, vec![Arc::new(LogSink::new())]));
    alerts.restore_lists(store.load_senders().await).await;

    Ok(Pipeline {
        detector,
        alerts,
        store,
    })
}

impl Pipeline {
    /// Builds a monitor over the given sources, sharing this pipeline's
    /// components.
    pub fn monitor(
        &self,
        config: &SentryConfig,
        sources: Vec<Arc<dyn sentryphish_core::SourceAdapter>>,
    ) -> MessageMonitor {
        MessageMonitor::new(
            config,
            sources,
            Arc::clone(&self.detector),
            Arc::clone(&self.alerts),
            Arc::clone(&self.store),
        )
    }
}
