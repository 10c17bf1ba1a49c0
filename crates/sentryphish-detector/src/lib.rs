// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification pipeline for the Sentryphish detection system.
//!
//! The [`PhishingDetector`] runs content through skip rules, a capped TTL
//! result cache, the configured provider chain, and an offline keyword
//! heuristic that guarantees a verdict even when every provider is down.

pub mod cache;
pub mod detector;
pub mod heuristic;
pub mod skip;

pub use cache::{CacheEntry, DetectionCache};
pub use detector::PhishingDetector;
