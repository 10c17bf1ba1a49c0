// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the detection pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The surface a candidate message was observed on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    Notification,
    Sms,
    Email,
}

/// A candidate message to be analyzed for phishing.
///
/// Created when a source observes an event or the user submits content
/// manually. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorableMessage {
    pub id: String,
    pub source: MessageSource,
    pub sender: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl MonitorableMessage {
    /// Creates a new unread message with a generated id and current timestamp.
    pub fn new(
        source: MessageSource,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{source}-{}", uuid::Uuid::new_v4()),
            source,
            sender: sender.into(),
            title: None,
            content: content.into(),
            timestamp: Utc::now(),
            read: false,
        }
    }
}

/// Normalized output of a classification provider call.
///
/// Every provider adapter maps its vendor-specific JSON response into this
/// shape before the orchestrator sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAnalysis {
    pub is_phishing: bool,
    /// Confidence in the verdict, clamped to [0, 1].
    pub confidence: f64,
    pub explanation: String,
    #[serde(default)]
    pub suspicious_words: Vec<String>,
    #[serde(default)]
    pub suspicious_urls: Vec<String>,
}

/// Risk tier assigned to an analyzed message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// High risk: strong phishing verdict.
    Red,
    /// Moderate risk: weak phishing verdict or failed analysis.
    Yellow,
    /// No detected risk.
    Green,
}

/// Identifies which adapter (or built-in rule) produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance(pub String);

impl Provenance {
    /// Result produced by a named remote provider adapter.
    pub fn provider(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Result produced by the local keyword/URL heuristic.
    pub fn heuristic() -> Self {
        Self("heuristic".to_string())
    }

    /// Result produced by a pre-analysis skip rule (no network call made).
    pub fn skip_rule() -> Self {
        Self("skip-rule".to_string())
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Threat evidence collected during analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectedThreats {
    #[serde(default)]
    pub suspicious_links: Vec<String>,
    #[serde(default)]
    pub sensitive_data_requests: Vec<String>,
    #[serde(default)]
    pub urgent_language: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl DetectedThreats {
    /// True when no evidence of any category was collected.
    pub fn is_empty(&self) -> bool {
        self.suspicious_links.is_empty()
            && self.sensitive_data_requests.is_empty()
            && self.urgent_language.is_empty()
            && self.other.is_empty()
    }
}

/// The unified result of analyzing one message.
///
/// Produced by exactly one provider call (or the fallback heuristic, or a
/// skip rule) per message; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub risk: RiskLevel,
    pub confidence: f64,
    pub explanation: String,
    #[serde(default)]
    pub threats: DetectedThreats,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
    pub provenance: Provenance,
}

impl DetectionResult {
    /// True for red and yellow verdicts.
    pub fn is_suspect(&self) -> bool {
        self.risk != RiskLevel::Green
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter in the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Source,
    Storage,
    Alert,
}
