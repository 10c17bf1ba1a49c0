// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as known provider names, threshold ranges, and positive intervals.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::SentryConfig;

/// Provider names the detector knows how to construct.
pub const KNOWN_PROVIDERS: &[&str] = &["huggingface", "grok", "deepseek"];

/// Message source names the monitor knows how to construct.
pub const KNOWN_SOURCES: &[&str] = &["notification", "sms", "email"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SentryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate data_dir is not empty
    if config.storage.data_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.data_dir must not be empty".to_string(),
        });
    }

    // Validate history cap is positive
    if config.storage.history_max_entries == 0 {
        errors.push(ConfigError::Validation {
            message: "storage.history_max_entries must be at least 1".to_string(),
        });
    }

    // Validate scan interval is positive
    if config.monitor.scan_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "monitor.scan_interval_secs must be at least 1".to_string(),
        });
    }

    // Validate enabled sources are known and not duplicated
    let mut seen_sources = HashSet::new();
    for source in &config.monitor.enabled_sources {
        if !KNOWN_SOURCES.contains(&source.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "monitor.enabled_sources contains unknown source `{source}` (known: {})",
                    KNOWN_SOURCES.join(", ")
                ),
            });
        }
        if !seen_sources.insert(source) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate source `{source}` in monitor.enabled_sources"),
            });
        }
    }

    // Validate provider order is non-empty, known, and not duplicated
    if config.detector.provider_order.is_empty() {
        errors.push(ConfigError::Validation {
            message: "detector.provider_order must name at least one provider".to_string(),
        });
    }

    let mut seen_providers = HashSet::new();
    for provider in &config.detector.provider_order {
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "detector.provider_order contains unknown provider `{provider}` (known: {})",
                    KNOWN_PROVIDERS.join(", ")
                ),
            });
        }
        if !seen_providers.insert(provider) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate provider `{provider}` in detector.provider_order"),
            });
        }
    }

    // Validate red threshold is a confidence in [0, 1]
    let threshold = config.detector.red_confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "detector.red_confidence_threshold must be between 0.0 and 1.0, got {threshold}"
            ),
        });
    }

    // Validate cache cap and TTL are positive
    if config.detector.cache_max_entries == 0 {
        errors.push(ConfigError::Validation {
            message: "detector.cache_max_entries must be at least 1".to_string(),
        });
    }

    if config.detector.cache_ttl_hours == 0 {
        errors.push(ConfigError::Validation {
            message: "detector.cache_ttl_hours must be at least 1".to_string(),
        });
    }

    // Validate DeepSeek temperature range
    let temp = config.deepseek.temperature;
    if !(0.0..=2.0).contains(&temp) {
        errors.push(ConfigError::Validation {
            message: format!("deepseek.temperature must be between 0.0 and 2.0, got {temp}"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SentryConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_data_dir_fails_validation() {
        let mut config = SentryConfig::default();
        config.storage.data_dir = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("data_dir"))));
    }

    #[test]
    fn unknown_provider_fails_validation() {
        let mut config = SentryConfig::default();
        config.detector.provider_order = vec!["openai".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("openai"))));
    }

    #[test]
    fn empty_provider_order_fails_validation() {
        let mut config = SentryConfig::default();
        config.detector.provider_order = vec![];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("provider_order"))));
    }

    #[test]
    fn duplicate_provider_fails_validation() {
        let mut config = SentryConfig::default();
        config.detector.provider_order = vec!["grok".to_string(), "grok".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate provider"))));
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = SentryConfig::default();
        config.detector.red_confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("red_confidence_threshold"))));
    }

    #[test]
    fn zero_scan_interval_fails_validation() {
        let mut config = SentryConfig::default();
        config.monitor.scan_interval_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("scan_interval_secs"))));
    }

    #[test]
    fn unknown_source_fails_validation() {
        let mut config = SentryConfig::default();
        config.monitor.enabled_sources = vec!["carrier-pigeon".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("carrier-pigeon"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = SentryConfig::default();
        config.detector.provider_order = vec!["grok".to_string()];
        config.monitor.enabled_sources = vec!["sms".to_string()];
        config.storage.data_dir = "/tmp/sentryphish-test".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
