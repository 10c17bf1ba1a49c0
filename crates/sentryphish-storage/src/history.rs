// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis history and the statistics computed over it.

use chrono::{DateTime, Duration, Utc};
use sentryphish_core::{DetectionResult, MonitorableMessage, RiskLevel, SentryError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::store::{HISTORY_FILE, JsonStore};

/// One analyzed message as recorded in `history.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub content: String,
    pub sender: String,
    /// Source label, e.g. "sms" or "manual".
    pub source: String,
    pub result: DetectionResult,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_message(message: &MonitorableMessage, result: DetectionResult) -> Self {
        Self {
            content: message.content.clone(),
            sender: message.sender.clone(),
            source: message.source.to_string(),
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Confidence distribution across the recorded history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregate statistics over the recorded history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_analyzed: usize,
    pub phishing_detected: usize,
    pub detected_last_week: usize,
    /// Entry counts keyed by source label.
    pub per_source: BTreeMap<String, usize>,
    pub confidence: ConfidenceStats,
}

impl JsonStore {
    /// Prepends an entry to the history, enforcing the size cap, and writes
    /// the history file.
    pub async fn add_history(&self, entry: HistoryEntry) -> Result<(), SentryError> {
        let mut entries = self.history.lock().await;
        entries.insert(0, entry);
        entries.truncate(self.history_cap);
        self.write_blob(HISTORY_FILE, &*entries).await
    }

    /// Returns the most recent entries, newest first.
    pub async fn history(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        let entries = self.history.lock().await;
        let take = limit.unwrap_or(entries.len());
        entries.iter().take(take).cloned().collect()
    }

    /// Empties the history and removes its file.
    pub async fn clear_history(&self) -> Result<(), SentryError> {
        self.history.lock().await.clear();
        let path = self.path(HISTORY_FILE);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SentryError::Storage {
                source: Box::new(err),
            }),
        }
    }

    /// Computes aggregate statistics over the recorded history.
    pub async fn stats(&self) -> HistoryStats {
        let entries = self.history.lock().await;
        let week_ago = Utc::now() - Duration::days(7);

        let mut phishing_detected = 0;
        let mut detected_last_week = 0;
        let mut per_source: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_confidence = 0.0;
        let mut min = 1.0;
        let mut max = 0.0;

        for entry in entries.iter() {
            if entry.result.risk != RiskLevel::Green {
                phishing_detected += 1;
                if entry.timestamp >= week_ago {
                    detected_last_week += 1;
                }
            }
            *per_source.entry(entry.source.clone()).or_default() += 1;
            total_confidence += entry.result.confidence;
            if entry.result.confidence < min {
                min = entry.result.confidence;
            }
            if entry.result.confidence > max {
                max = entry.result.confidence;
            }
        }

        // An empty history reports flat zeros rather than the fold's
        // untouched min/max seeds.
        let confidence = if entries.is_empty() {
            ConfidenceStats {
                average: 0.0,
                min: 0.0,
                max: 0.0,
            }
        } else {
            ConfidenceStats {
                average: total_confidence / entries.len() as f64,
                min,
                max,
            }
        };

        HistoryStats {
            total_analyzed: entries.len(),
            phishing_detected,
            detected_last_week,
            per_source,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use sentryphish_core::{DetectedThreats, MessageSource, Provenance, StorageAdapter};

    use super::*;

    fn entry(source: MessageSource, risk: RiskLevel, confidence: f64) -> HistoryEntry {
        let message = MonitorableMessage::new(source, "sender@example.com", "some content");
        HistoryEntry::from_message(
            &message,
            DetectionResult {
                risk,
                confidence,
                explanation: "test".to_string(),
                threats: DetectedThreats::default(),
                suggested_actions: Vec::new(),
                provenance: Provenance::heuristic(),
            },
        )
    }

    async fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path(), 100);
        store.initialize().await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn history_is_newest_first_and_capped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path(), 3);
        store.initialize().await.unwrap();

        for i in 0..5 {
            let mut e = entry(MessageSource::Sms, RiskLevel::Green, 0.9);
            e.content = format!("message {i}");
            store.add_history(e).await.unwrap();
        }

        let entries = store.history(None).await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].content, "message 4");
        assert_eq!(entries[2].content, "message 2");
    }

    #[tokio::test]
    async fn history_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonStore::with_data_dir(dir.path(), 100);
            store.initialize().await.unwrap();
            store
                .add_history(entry(MessageSource::Email, RiskLevel::Red, 0.8))
                .await
                .unwrap();
        }

        let store = JsonStore::with_data_dir(dir.path(), 100);
        store.initialize().await.unwrap();
        let entries = store.history(None).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].result.risk, RiskLevel::Red);
    }

    #[tokio::test]
    async fn limit_truncates_the_returned_entries() {
        let (_dir, store) = store().await;
        for _ in 0..4 {
            store
                .add_history(entry(MessageSource::Notification, RiskLevel::Green, 0.9))
                .await
                .unwrap();
        }
        assert_eq!(store.history(Some(2)).await.len(), 2);
    }

    #[tokio::test]
    async fn clear_history_removes_entries_and_file() {
        let (_dir, store) = store().await;
        store
            .add_history(entry(MessageSource::Sms, RiskLevel::Yellow, 0.5))
            .await
            .unwrap();
        store.clear_history().await.unwrap();
        assert!(store.history(None).await.is_empty());
        assert!(!store.path(HISTORY_FILE).exists());
        // Clearing twice is fine.
        store.clear_history().await.unwrap();
    }

    #[tokio::test]
    async fn stats_count_suspect_verdicts_and_sources() {
        let (_dir, store) = store().await;
        store
            .add_history(entry(MessageSource::Sms, RiskLevel::Red, 0.9))
            .await
            .unwrap();
        store
            .add_history(entry(MessageSource::Sms, RiskLevel::Yellow, 0.5))
            .await
            .unwrap();
        store
            .add_history(entry(MessageSource::Email, RiskLevel::Green, 0.7))
            .await
            .unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.total_analyzed, 3);
        assert_eq!(stats.phishing_detected, 2);
        assert_eq!(stats.detected_last_week, 2);
        assert_eq!(stats.per_source.get("sms"), Some(&2));
        assert_eq!(stats.per_source.get("email"), Some(&1));
        assert!((stats.confidence.average - 0.7).abs() < 1e-9);
        assert!((stats.confidence.min - 0.5).abs() < 1e-9);
        assert!((stats.confidence.max - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn stats_on_empty_history_report_zeroed_confidence_bounds() {
        let (_dir, store) = store().await;
        let stats = store.stats().await;
        assert_eq!(stats.total_analyzed, 0);
        assert_eq!(stats.confidence.average, 0.0);
        assert_eq!(stats.confidence.min, 0.0);
        assert_eq!(stats.confidence.max, 0.0);
    }
}
