// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulated message sources.
//!
//! There is no device notification, SMS, or email access in this binary,
//! so the watch loop runs against scripted sources: each poll pops the
//! next queued batch, and an exhausted script yields empty batches.

use std::collections::VecDeque;

use async_trait::async_trait;
use sentryphish_core::{
    AdapterType, HealthStatus, MessageSource, MonitorableMessage, PluginAdapter, SentryError,
    SourceAdapter,
};
use tokio::sync::Mutex;

/// A source that replays a script of message batches, one batch per poll.
pub struct SimulatedSource {
    name: String,
    source: MessageSource,
    batches: Mutex<VecDeque<Vec<MonitorableMessage>>>,
}

impl SimulatedSource {
    pub fn new(source: MessageSource) -> Self {
        Self {
            name: format!("{source}-sim"),
            source,
            batches: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_script(
        source: MessageSource,
        batches: impl IntoIterator<Item = Vec<MonitorableMessage>>,
    ) -> Self {
        let mut sim = Self::new(source);
        sim.batches = Mutex::new(batches.into_iter().collect());
        sim
    }

    /// Queues a batch for a future poll.
    pub async fn push_batch(&self, batch: Vec<MonitorableMessage>) {
        self.batches.lock().await.push_back(batch);
    }

    /// A source seeded with demonstration traffic: one obvious phishing
    /// attempt and one benign message.
    pub fn demo(source: MessageSource) -> Self {
        let phishy = MonitorableMessage::new(
            source,
            "security@paypa1-alerts.example",
            "URGENT: your account has been blocked. Click here to verify \
             your password now: https://bit.ly/acct-verify",
        );
        let benign = MonitorableMessage::new(
            source,
            "newsletter@example.com",
            "Your weekly digest is ready. Here is what happened this week \
             in the projects you follow.",
        );
        Self::with_script(source, vec![vec![phishy], vec![benign]])
    }
}

#[async_trait]
impl PluginAdapter for SimulatedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Source
    }

    async fn health_check(&self) -> Result<HealthStatus, SentryError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SentryError> {
        Ok(())
    }
}

#[async_trait]
impl SourceAdapter for SimulatedSource {
    fn source(&self) -> MessageSource {
        self.source
    }

    async fn poll(&self) -> Result<Vec<MonitorableMessage>, SentryError> {
        Ok(self.batches.lock().await.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_source_replays_its_script_in_order() {
        let source = SimulatedSource::with_script(
            MessageSource::Sms,
            vec![
                vec![MonitorableMessage::new(MessageSource::Sms, "+15550100", "one")],
                vec![MonitorableMessage::new(MessageSource::Sms, "+15550101", "two")],
            ],
        );

        assert_eq!(source.name(), "sms-sim");
        assert_eq!(source.poll().await.unwrap()[0].content, "one");
        assert_eq!(source.poll().await.unwrap()[0].content, "two");
        assert!(source.poll().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_source_yields_a_phishy_then_a_benign_batch() {
        let source = SimulatedSource::demo(MessageSource::Email);
        let first = source.poll().await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].content.contains("URGENT"));
        let second = source.poll().await.unwrap();
        assert_eq!(second.len(), 1);
    }
}
