// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert layer for Sentryphish.
//!
//! Takes detection results from the pipeline, delivers alerts through one or
//! more [`AlertSink`]s, and maintains the safe, watch, and block sender
//! lists.

pub mod senders;
pub mod service;
pub mod sink;

pub use senders::SenderLists;
pub use service::AlertService;
pub use sink::{AlertSink, LogSink};
