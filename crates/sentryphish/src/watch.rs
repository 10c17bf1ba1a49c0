// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sentryphish watch` command implementation.
//!
//! Runs the polling monitor over the enabled (simulated) sources until
//! Ctrl-C, then flushes persisted state.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sentryphish_config::SentryConfig;
use sentryphish_core::{MessageSource, SentryError, SourceAdapter, StorageAdapter};
use sentryphish_monitor::SimulatedSource;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::pipeline;

pub async fn run(config: &SentryConfig) -> Result<(), SentryError> {
    let pipeline = pipeline::build(config).await?;

    let settings = pipeline.store.load_settings().await;
    if !settings.monitoring_enabled {
        info!("monitoring is disabled in settings, nothing to do");
        return Ok(());
    }

    let mut monitor = pipeline.monitor(config, build_sources(config));
    if let Some(minutes) = settings.scan_interval_minutes {
        info!(minutes, "using persisted scan interval");
        monitor = monitor.with_scan_interval(Duration::from_secs(minutes * 60));
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(error = %err, "failed to listen for shutdown signal");
            }
            cancel.cancel();
        });
    }

    info!("watching for messages, press Ctrl-C to stop");
    monitor.run(cancel).await;

    pipeline.store.close().await?;
    Ok(())
}

/// One simulated source per enabled surface, seeded with demo traffic.
fn build_sources(config: &SentryConfig) -> Vec<Arc<dyn SourceAdapter>> {
    let mut sources: Vec<Arc<dyn SourceAdapter>> = Vec::new();
    for name in &config.monitor.enabled_sources {
        match MessageSource::from_str(name) {
            Ok(source) => sources.push(Arc::new(SimulatedSource::demo(source))),
            Err(_) => warn!(source = %name, "unknown source in enabled_sources, skipping"),
        }
    }
    sources
}
