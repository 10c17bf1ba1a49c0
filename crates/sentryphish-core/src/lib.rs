// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sentryphish detection pipeline.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Sentryphish workspace. All adapter
//! plugins implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SentryError;
pub use types::{
    AdapterType, DetectedThreats, DetectionResult, HealthStatus, MessageSource,
    MonitorableMessage, ProviderAnalysis, Provenance, RiskLevel,
};

// Re-export all adapter traits at crate root.
pub use traits::{PluginAdapter, ProviderAdapter, SourceAdapter, StorageAdapter};
