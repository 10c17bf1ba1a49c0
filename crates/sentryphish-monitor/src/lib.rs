// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message monitoring for Sentryphish.
//!
//! [`MessageMonitor`] polls registered sources on a configurable interval
//! and feeds unseen messages through the detector, the alert service, and
//! the history store. [`SimulatedSource`] provides scripted traffic for the
//! watch loop and tests.

pub mod monitor;
pub mod sources;

pub use monitor::MessageMonitor;
pub use sources::SimulatedSource;
