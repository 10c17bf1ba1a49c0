// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert sink adapter trait and the default log-based sink.

use async_trait::async_trait;
use sentryphish_core::{
    AdapterType, DetectionResult, HealthStatus, MonitorableMessage, PluginAdapter, SentryError,
};

/// An adapter that delivers user-facing alerts for suspect messages.
///
/// Green verdicts never reach a sink; the dispatcher only forwards red and
/// yellow results.
#[async_trait]
pub trait AlertSink: PluginAdapter {
    /// Delivers a high-urgency alert for a red verdict.
    async fn strong_alert(
        &self,
        result: &DetectionResult,
        message: &MonitorableMessage,
    ) -> Result<(), SentryError>;

    /// Delivers a low-urgency alert for a yellow verdict.
    async fn soft_alert(
        &self,
        result: &DetectionResult,
        message: &MonitorableMessage,
    ) -> Result<(), SentryError>;
}

/// Default sink that emits alerts through the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginAdapter for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Alert
    }

    async fn health_check(&self) -> Result<HealthStatus, SentryError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SentryError> {
        Ok(())
    }
}

#[async_trait]
impl AlertSink for LogSink {
    async fn strong_alert(
        &self,
        result: &DetectionResult,
        message: &MonitorableMessage,
    ) -> Result<(), SentryError> {
        tracing::error!(
            sender = %message.sender,
            source = %message.source,
            confidence = result.confidence,
            "phishing detected: {}",
            result.explanation
        );
        Ok(())
    }

    async fn soft_alert(
        &self,
        result: &DetectionResult,
        message: &MonitorableMessage,
    ) -> Result<(), SentryError> {
        tracing::warn!(
            sender = %message.sender,
            source = %message.source,
            confidence = result.confidence,
            "suspicious message: {}",
            result.explanation
        );
        Ok(())
    }
}
