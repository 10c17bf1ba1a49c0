// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sentryphish history` command implementation.

use colored::Colorize;
use sentryphish_config::SentryConfig;
use sentryphish_core::{RiskLevel, SentryError, StorageAdapter};
use sentryphish_storage::JsonStore;

pub async fn run(config: &SentryConfig, limit: Option<usize>) -> Result<(), SentryError> {
    let store = JsonStore::new(config);
    store.initialize().await?;

    let entries = store.history(limit).await;
    if entries.is_empty() {
        println!("no analyzed messages yet");
        return Ok(());
    }

    for entry in entries {
        let label = match entry.result.risk {
            RiskLevel::Red => "RED   ".red().bold(),
            RiskLevel::Yellow => "YELLOW".yellow().bold(),
            RiskLevel::Green => "GREEN ".green().bold(),
        };
        let preview: String = entry.content.chars().take(60).collect();
        println!(
            "{}  {label}  [{}] {}: {preview}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.source,
            entry.sender,
        );
    }
    Ok(())
}
