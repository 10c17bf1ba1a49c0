// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source adapter trait for monitored message surfaces (notifications, SMS, email).

use async_trait::async_trait;

use crate::error::SentryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{MessageSource, MonitorableMessage};

/// Adapter for a monitored message surface.
///
/// Source adapters expose candidate messages observed on one surface. The
/// monitor polls each registered source on its scan interval; sources may
/// return messages already seen on a previous poll, so the monitor
/// de-duplicates by message id.
#[async_trait]
pub trait SourceAdapter: PluginAdapter {
    /// The surface this adapter observes.
    fn source(&self) -> MessageSource;

    /// Returns the current batch of observable messages.
    async fn poll(&self) -> Result<Vec<MonitorableMessage>, SentryError>;
}
