// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends.

use async_trait::async_trait;

use crate::error::SentryError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for storage and persistence backends.
///
/// Storage adapters manage the lifecycle of the backing store and provide
/// the foundation for history, sender lists, cache snapshots, and runtime
/// settings persistence.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (directories, file handles, etc.).
    async fn initialize(&self) -> Result<(), SentryError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), SentryError>;
}
