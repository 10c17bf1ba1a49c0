// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sentryphish.toml` > `~/.config/sentryphish/sentryphish.toml`
//! > `/etc/sentryphish/sentryphish.toml` with environment variable overrides via
//! `SENTRYPHISH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SentryConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sentryphish/sentryphish.toml` (system-wide)
/// 3. `~/.config/sentryphish/sentryphish.toml` (user XDG config)
/// 4. `./sentryphish.toml` (local directory)
/// 5. `SENTRYPHISH_*` environment variables
pub fn load_config() -> Result<SentryConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SentryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SentryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SentryConfig::default()))
        .merge(Toml::file("/etc/sentryphish/sentryphish.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sentryphish/sentryphish.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sentryphish.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `SENTRYPHISH_GROK_API_KEY` must
/// map to `grok.api_key`, not `grok.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SENTRYPHISH_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SENTRYPHISH_GROK_API_KEY -> "grok_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("monitor_", "monitor.", 1)
            .replacen("detector_", "detector.", 1)
            .replacen("grok_", "grok.", 1)
            .replacen("deepseek_", "deepseek.", 1)
            .replacen("huggingface_", "huggingface.", 1)
            .replacen("alerts_", "alerts.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
