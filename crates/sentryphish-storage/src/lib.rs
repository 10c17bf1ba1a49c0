// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-blob persistence for Sentryphish.
//!
//! [`JsonStore`] implements the core `StorageAdapter` trait and keeps one
//! file per concern under the configured data directory: analysis history,
//! sender lists, detection cache snapshots, and runtime settings.

pub mod history;
pub mod store;

pub use history::{ConfidenceStats, HistoryEntry, HistoryStats};
pub use store::{JsonStore, RuntimeSettings};
