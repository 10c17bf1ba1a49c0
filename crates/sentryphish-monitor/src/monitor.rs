// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The polling monitor that drives the analysis pipeline.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sentryphish_alert::AlertService;
use sentryphish_config::SentryConfig;
use sentryphish_core::{DetectionResult, SourceAdapter};
use sentryphish_detector::PhishingDetector;
use sentryphish_storage::{HistoryEntry, JsonStore};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polls the registered sources on a fixed interval and feeds every unseen
/// message through detection, alerting, and history.
///
/// Messages are processed sequentially in one cooperative loop; sources are
/// free to re-deliver messages, the monitor de-duplicates by message id.
pub struct MessageMonitor {
    sources: Vec<Arc<dyn SourceAdapter>>,
    detector: Arc<PhishingDetector>,
    alerts: Arc<AlertService>,
    store: Arc<JsonStore>,
    seen: Mutex<HashSet<String>>,
    scan_interval: Duration,
}

impl MessageMonitor {
    pub fn new(
        config: &SentryConfig,
        sources: Vec<Arc<dyn SourceAdapter>>,
        detector: Arc<PhishingDetector>,
        alerts: Arc<AlertService>,
        store: Arc<JsonStore>,
    ) -> Self {
        Self {
            sources,
            detector,
            alerts,
            store,
            seen: Mutex::new(HashSet::new()),
            scan_interval: Duration::from_secs(config.monitor.scan_interval_secs),
        }
    }

    /// Overrides the configured scan interval, typically with a value the
    /// user persisted in runtime settings.
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    /// Runs the scan loop until the token is cancelled, then persists the
    /// sender lists and cache one final time.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            interval_secs = self.scan_interval.as_secs(),
            sources = self.sources.len(),
            "monitor started"
        );
        let mut interval = tokio::time::interval(self.scan_interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("monitor stopping");
                    break;
                }
                _ = interval.tick() => {
                    let analyzed = self.scan().await;
                    debug!(analyzed, "scan pass complete");
                }
            }
        }
        self.persist_state().await;
    }

    /// One polling pass over all sources. Returns the number of messages
    /// analyzed.
    pub async fn scan(&self) -> usize {
        let mut analyzed = 0;
        for source in &self.sources {
            let batch = match source.poll().await {
                Ok(batch) => batch,
                Err(err) => {
                    warn!(source = source.name(), error = %err, "source poll failed");
                    continue;
                }
            };
            for message in batch {
                {
                    let mut seen = self.seen.lock().await;
                    if !seen.insert(message.id.clone()) {
                        continue;
                    }
                }
                let Some(result) = self.detector.classify_message(&message).await else {
                    continue;
                };
                if let Err(err) = self.alerts.dispatch(&result, &message).await {
                    warn!(error = %err, "alert dispatch failed");
                }
                let entry = HistoryEntry::from_message(&message, result);
                if let Err(err) = self.store.add_history(entry).await {
                    warn!(error = %err, "failed to record history entry");
                }
                analyzed += 1;
            }
        }
        if analyzed > 0 {
            self.persist_state().await;
        }
        analyzed
    }

    /// Manual submission path: classifies user-entered content and records
    /// it to history under the "manual" source label.
    pub async fn submit(&self, content: &str) -> DetectionResult {
        let result = self.detector.classify(content).await;
        let entry = HistoryEntry {
            content: content.to_string(),
            sender: "user".to_string(),
            source: "manual".to_string(),
            result: result.clone(),
            timestamp: Utc::now(),
        };
        if let Err(err) = self.store.add_history(entry).await {
            warn!(error = %err, "failed to record history entry");
        }
        result
    }

    /// Restores sender lists and the detection cache from the store.
    pub async fn restore_state(&self) {
        self.alerts.restore_lists(self.store.load_senders().await).await;
        self.detector.restore_cache(self.store.load_cache().await).await;
    }

    async fn persist_state(&self) {
        let lists = self.alerts.export_lists().await;
        if let Err(err) = self.store.save_senders(&lists).await {
            warn!(error = %err, "failed to persist sender lists");
        }
        let snapshot = self.detector.export_cache().await;
        if let Err(err) = self.store.save_cache(&snapshot).await {
            warn!(error = %err, "failed to persist detection cache");
        }
    }
}
