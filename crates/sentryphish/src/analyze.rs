// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sentryphish analyze` command implementation.
//!
//! One-shot classification of user-supplied text through the full
//! pipeline, recording the verdict to history.

use colored::Colorize;
use sentryphish_config::SentryConfig;
use sentryphish_core::{DetectionResult, RiskLevel, SentryError, StorageAdapter};

use crate::pipeline;

pub async fn run(config: &SentryConfig, text: &str) -> Result<(), SentryError> {
    let pipeline = pipeline::build(config).await?;
    let monitor = pipeline.monitor(config, vec![]);

    let result = monitor.submit(text).await;
    print_verdict(&result);

    pipeline.store.close().await?;
    Ok(())
}

fn print_verdict(result: &DetectionResult) {
    let label = match result.risk {
        RiskLevel::Red => "RED".red().bold(),
        RiskLevel::Yellow => "YELLOW".yellow().bold(),
        RiskLevel::Green => "GREEN".green().bold(),
    };
    println!(
        "{label}  confidence {:.0}%  ({})",
        result.confidence * 100.0,
        result.provenance
    );
    println!("{}", result.explanation);

    if !result.threats.suspicious_links.is_empty() {
        println!("suspicious links: {}", result.threats.suspicious_links.join(", "));
    }
    if !result.threats.sensitive_data_requests.is_empty() {
        println!(
            "sensitive data requests: {}",
            result.threats.sensitive_data_requests.join(", ")
        );
    }
    if !result.threats.urgent_language.is_empty() {
        println!("urgent language: {}", result.threats.urgent_language.join(", "));
    }
    if !result.threats.other.is_empty() {
        println!("other indicators: {}", result.threats.other.join(", "));
    }
    for action in &result.suggested_actions {
        println!("  - {action}");
    }
}
