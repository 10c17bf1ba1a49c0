// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for remote classifier integrations (Grok, DeepSeek, etc.).

use async_trait::async_trait;

use crate::error::SentryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ProviderAnalysis;

/// Adapter for remote phishing classifier APIs.
///
/// Provider adapters handle communication with a vendor classification
/// endpoint and normalize its response into [`ProviderAnalysis`]. Each call
/// is single-attempt: any failure (timeout, non-2xx status, malformed JSON)
/// is returned as an error so the orchestrator can move to the next
/// provider in its chain.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Classifies the given content, returning a normalized analysis.
    async fn analyze(&self, content: &str) -> Result<ProviderAnalysis, SentryError>;
}
