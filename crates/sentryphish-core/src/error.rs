// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sentryphish detection pipeline.

use thiserror::Error;

/// The primary error type used across all Sentryphish adapter traits and
/// pipeline operations.
#[derive(Debug, Error)]
pub enum SentryError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Classifier provider errors (API failure, non-2xx status, malformed JSON).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Message source errors (poll failure, malformed payload).
    #[error("source error: {message}")]
    Source {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (file I/O, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Alert delivery errors.
    #[error("alert error: {0}")]
    Alert(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
