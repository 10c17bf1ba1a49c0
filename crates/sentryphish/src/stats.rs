// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sentryphish stats` command implementation.

use sentryphish_config::SentryConfig;
use sentryphish_core::{SentryError, StorageAdapter};
use sentryphish_storage::JsonStore;

pub async fn run(config: &SentryConfig) -> Result<(), SentryError> {
    let store = JsonStore::new(config);
    store.initialize().await?;

    let stats = store.stats().await;
    println!("analyzed:            {}", stats.total_analyzed);
    println!("phishing detected:   {}", stats.phishing_detected);
    println!("detected last 7d:    {}", stats.detected_last_week);

    if !stats.per_source.is_empty() {
        println!("by source:");
        for (source, count) in &stats.per_source {
            println!("  {source:<12} {count}");
        }
    }
    if stats.total_analyzed > 0 {
        println!(
            "confidence:          avg {:.2}  min {:.2}  max {:.2}",
            stats.confidence.average, stats.confidence.min, stats.confidence.max
        );
    }
    Ok(())
}
