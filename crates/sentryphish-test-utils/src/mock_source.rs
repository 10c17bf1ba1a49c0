// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock message source for deterministic monitor testing.
//!
//! `MockSource` implements `SourceAdapter` with scripted message batches,
//! one batch per poll, so monitor tests can control exactly what arrives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sentryphish_core::traits::adapter::PluginAdapter;
use sentryphish_core::traits::source::SourceAdapter;
use sentryphish_core::types::{AdapterType, HealthStatus, MessageSource, MonitorableMessage};
use sentryphish_core::SentryError;

/// A mock source that serves scripted message batches.
///
/// Each `poll` call pops the next batch from the queue; an exhausted
/// queue yields empty batches.
pub struct MockSource {
    source: MessageSource,
    batches: Arc<Mutex<VecDeque<Vec<MonitorableMessage>>>>,
    poll_count: Arc<Mutex<usize>>,
}

impl MockSource {
    /// Create a new mock source with no scripted batches.
    pub fn new(source: MessageSource) -> Self {
        Self {
            source,
            batches: Arc::new(Mutex::new(VecDeque::new())),
            poll_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a batch of messages for a future poll.
    pub async fn push_batch(&self, batch: Vec<MonitorableMessage>) {
        self.batches.lock().await.push_back(batch);
    }

    /// Returns the number of polls served so far.
    pub async fn poll_count(&self) -> usize {
        *self.poll_count.lock().await
    }

    /// Builds a message from this source with the given sender and content.
    pub fn message(&self, sender: &str, content: &str) -> MonitorableMessage {
        MonitorableMessage::new(self.source, sender, content)
    }
}

#[async_trait]
impl PluginAdapter for MockSource {
    fn name(&self) -> &str {
        "mock-source"
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
impl SourceAdapter for MockSource {
    fn source(&self) -> MessageSource {
        self.source
    }

    async fn poll(&self) -> Result<Vec<MonitorableMessage>, SentryError> {
        *self.poll_count.lock().await += 1;
        Ok(self.batches.lock().await.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_source_serves_batches_in_order() {
        let source = MockSource::new(MessageSource::Sms);
        source
            .push_batch(vec![source.message("+15550100", "first batch")])
            .await;

        let first = source.poll().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].sender, "+15550100");
        assert_eq!(first[0].source, MessageSource::Sms);

        let second = source.poll().await.unwrap();
        assert!(second.is_empty());
        assert_eq!(source.poll_count().await, 2);
    }
}
