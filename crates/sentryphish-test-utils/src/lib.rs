// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sentryphish integration tests.
//!
//! Provides mock adapters implementing the core traits so detector and
//! monitor behavior can be tested without external APIs.

pub mod mock_provider;
pub mod mock_source;

pub use mock_provider::MockProvider;
pub use mock_source::MockSource;
