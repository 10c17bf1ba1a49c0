// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert dispatch: routes detection results to sinks and maintains the
//! sender lists.

use std::sync::Arc;

use sentryphish_config::SentryConfig;
use sentryphish_core::{DetectionResult, MonitorableMessage, RiskLevel, SentryError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::senders::SenderLists;
use crate::sink::AlertSink;

/// Routes detection results to the configured sinks and applies the
/// automatic sender list policy.
///
/// Red verdicts block the sender (when `alerts.auto_block_red` is set) and
/// yellow verdicts put the sender under observation (when
/// `alerts.watch_on_yellow` is set). Green verdicts are dropped silently.
pub struct AlertService {
    sinks: Vec<Arc<dyn AlertSink>>,
    lists: Mutex<SenderLists>,
    auto_block_red: bool,
    watch_on_yellow: bool,
}

impl AlertService {
    pub fn new(config: &SentryConfig, sinks: Vec<Arc<dyn AlertSink>>) -> Self {
        Self {
            sinks,
            lists: Mutex::new(SenderLists::new()),
            auto_block_red: config.alerts.auto_block_red,
            watch_on_yellow: config.alerts.watch_on_yellow,
        }
    }

    /// Delivers alerts for one analyzed message and updates the sender
    /// lists according to the verdict.
    ///
    /// Sink failures are logged and do not prevent the list updates or the
    /// remaining sinks from running.
    pub async fn dispatch(
        &self,
        result: &DetectionResult,
        message: &MonitorableMessage,
    ) -> Result<(), SentryError> {
        match result.risk {
            RiskLevel::Green => {
                debug!(sender = %message.sender, "message classified green, no alert");
                return Ok(());
            }
            RiskLevel::Red => {
                for sink in &self.sinks {
                    if let Err(err) = sink.strong_alert(result, message).await {
                        warn!(sink = sink.name(), error = %err, "alert sink failed");
                    }
                }
                if self.auto_block_red {
                    let mut lists = self.lists.lock().await;
                    lists.add_block(&message.sender);
                    info!(sender = %message.sender, "sender blocked after red verdict");
                }
            }
            RiskLevel::Yellow => {
                for sink in &self.sinks {
                    if let Err(err) = sink.soft_alert(result, message).await {
                        warn!(sink = sink.name(), error = %err, "alert sink failed");
                    }
                }
                if self.watch_on_yellow {
                    let mut lists = self.lists.lock().await;
                    if lists.add_watch(&message.sender) {
                        info!(sender = %message.sender, "sender added to watch list");
                    }
                }
            }
        }
        Ok(())
    }

    /// Marks a sender as trusted.
    pub async fn add_safe_sender(&self, sender: &str) {
        self.lists.lock().await.add_safe(sender);
    }

    /// Puts a sender under observation, unless it is already trusted or
    /// blocked. Returns true if the sender was added.
    pub async fn add_watched_sender(&self, sender: &str) -> bool {
        self.lists.lock().await.add_watch(sender)
    }

    /// Blocks a sender.
    pub async fn add_blocked_sender(&self, sender: &str) {
        self.lists.lock().await.add_block(sender);
    }

    /// Removes a sender from all lists. Returns true if the sender was on
    /// one of them.
    pub async fn remove_sender(&self, sender: &str) -> bool {
        self.lists.lock().await.remove(sender)
    }

    pub async fn is_blocked(&self, sender: &str) -> bool {
        self.lists.lock().await.is_blocked(sender)
    }

    /// Snapshot of the current sender lists, for persistence.
    pub async fn export_lists(&self) -> SenderLists {
        self.lists.lock().await.clone()
    }

    /// Replaces the sender lists with a previously persisted snapshot.
    pub async fn restore_lists(&self, lists: SenderLists) {
        *self.lists.lock().await = lists;
    }
}

#[cfg(test)]
mod tests {
    use sentryphish_core::{DetectedThreats, MessageSource, Provenance};

    use super::*;
    use crate::sink::LogSink;

    fn result(risk: RiskLevel) -> DetectionResult {
        DetectionResult {
            risk,
            confidence: 0.9,
            explanation: "test verdict".to_string(),
            threats: DetectedThreats::default(),
            suggested_actions: Vec::new(),
            provenance: Provenance::heuristic(),
        }
    }

    fn service(config: &SentryConfig) -> AlertService {
        AlertService::new(config, vec![Arc::new(LogSink::new())])
    }

    #[tokio::test]
    async fn red_verdict_blocks_the_sender() {
        let config = SentryConfig::default();
        let svc = service(&config);
        let msg = MonitorableMessage::new(MessageSource::Sms, "scam@example.com", "body");

        svc.dispatch(&result(RiskLevel::Red), &msg).await.unwrap();
        assert!(svc.is_blocked("scam@example.com").await);
    }

    #[tokio::test]
    async fn yellow_verdict_watches_the_sender() {
        let config = SentryConfig::default();
        let svc = service(&config);
        let msg = MonitorableMessage::new(MessageSource::Email, "odd@example.com", "body");

        svc.dispatch(&result(RiskLevel::Yellow), &msg).await.unwrap();
        let lists = svc.export_lists().await;
        assert!(lists.is_watched("odd@example.com"));
        assert!(!lists.is_blocked("odd@example.com"));
    }

    #[tokio::test]
    async fn yellow_verdict_never_watches_a_safe_sender() {
        let config = SentryConfig::default();
        let svc = service(&config);
        svc.add_safe_sender("bank@example.com").await;
        let msg = MonitorableMessage::new(MessageSource::Email, "bank@example.com", "body");

        svc.dispatch(&result(RiskLevel::Yellow), &msg).await.unwrap();
        let lists = svc.export_lists().await;
        assert!(lists.is_safe("bank@example.com"));
        assert!(!lists.is_watched("bank@example.com"));
    }

    #[tokio::test]
    async fn green_verdict_leaves_lists_untouched() {
        let config = SentryConfig::default();
        let svc = service(&config);
        let msg = MonitorableMessage::new(MessageSource::Notification, "ok@example.com", "body");

        svc.dispatch(&result(RiskLevel::Green), &msg).await.unwrap();
        assert!(svc.export_lists().await.is_empty());
    }

    #[tokio::test]
    async fn policy_flags_disable_automatic_list_updates() {
        let mut config = SentryConfig::default();
        config.alerts.auto_block_red = false;
        config.alerts.watch_on_yellow = false;
        let svc = service(&config);
        let msg = MonitorableMessage::new(MessageSource::Sms, "manual@example.com", "body");

        svc.dispatch(&result(RiskLevel::Red), &msg).await.unwrap();
        svc.dispatch(&result(RiskLevel::Yellow), &msg).await.unwrap();
        assert!(svc.export_lists().await.is_empty());
    }

    #[tokio::test]
    async fn restore_replaces_the_lists() {
        let config = SentryConfig::default();
        let svc = service(&config);
        let mut lists = SenderLists::new();
        lists.add_block("old@example.com");
        svc.restore_lists(lists).await;
        assert!(svc.is_blocked("old@example.com").await);

        assert!(svc.remove_sender("old@example.com").await);
        assert!(!svc.is_blocked("old@example.com").await);
    }
}
