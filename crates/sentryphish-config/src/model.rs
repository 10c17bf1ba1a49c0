// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sentryphish detection pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Sentryphish configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SentryConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Message monitoring loop settings.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Detection pipeline settings.
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Grok API settings.
    #[serde(default)]
    pub grok: GrokConfig,

    /// DeepSeek API settings.
    #[serde(default)]
    pub deepseek: DeepseekConfig,

    /// Hugging Face Inference API settings.
    #[serde(default)]
    pub huggingface: HuggingfaceConfig,

    /// Alert dispatch settings.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "sentryphish".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Message monitoring loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Seconds between polling passes over enabled sources.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Message sources to monitor (notification, sms, email).
    #[serde(default = "default_enabled_sources")]
    pub enabled_sources: Vec<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            enabled_sources: default_enabled_sources(),
        }
    }
}

fn default_scan_interval_secs() -> u64 {
    30
}

fn default_enabled_sources() -> Vec<String> {
    vec![
        "notification".to_string(),
        "sms".to_string(),
        "email".to_string(),
    ]
}

/// Detection pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorConfig {
    /// Provider fallback order. Each provider gets one attempt before
    /// the next is tried; the local heuristic runs when all fail.
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,

    /// Messages with trimmed content shorter than this are classified
    /// safe without calling any provider.
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Minimum confidence for a phishing verdict to be rated red
    /// rather than yellow.
    #[serde(default = "default_red_confidence_threshold")]
    pub red_confidence_threshold: f64,

    /// Maximum number of cached classification results.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Hours before a cached classification expires.
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            provider_order: default_provider_order(),
            min_content_chars: default_min_content_chars(),
            red_confidence_threshold: default_red_confidence_threshold(),
            cache_max_entries: default_cache_max_entries(),
            cache_ttl_hours: default_cache_ttl_hours(),
        }
    }
}

fn default_provider_order() -> Vec<String> {
    vec![
        "huggingface".to_string(),
        "grok".to_string(),
        "deepseek".to_string(),
    ]
}

fn default_min_content_chars() -> usize {
    15
}

fn default_red_confidence_threshold() -> f64 {
    0.7
}

fn default_cache_max_entries() -> usize {
    100
}

fn default_cache_ttl_hours() -> u64 {
    24
}

/// Grok API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GrokConfig {
    /// Grok API key. `None` disables the provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for classification requests.
    #[serde(default = "default_grok_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_grok_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GrokConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_grok_model(),
            timeout_secs: default_grok_timeout_secs(),
        }
    }
}

fn default_grok_model() -> String {
    "grok-2-latest".to_string()
}

fn default_grok_timeout_secs() -> u64 {
    15
}

/// DeepSeek API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeepseekConfig {
    /// DeepSeek API key. `None` disables the provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for classification requests.
    #[serde(default = "default_deepseek_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_deepseek_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_deepseek_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for classification requests.
    #[serde(default = "default_deepseek_temperature")]
    pub temperature: f64,
}

impl Default for DeepseekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_deepseek_model(),
            timeout_secs: default_deepseek_timeout_secs(),
            max_tokens: default_deepseek_max_tokens(),
            temperature: default_deepseek_temperature(),
        }
    }
}

fn default_deepseek_model() -> String {
    "deepseek-chat".to_string()
}

fn default_deepseek_timeout_secs() -> u64 {
    5
}

fn default_deepseek_max_tokens() -> u32 {
    800
}

fn default_deepseek_temperature() -> f64 {
    0.2
}

/// Hugging Face Inference API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HuggingfaceConfig {
    /// Hugging Face API token. `None` disables the provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Zero-shot classification model identifier.
    #[serde(default = "default_huggingface_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_huggingface_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HuggingfaceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_huggingface_model(),
            timeout_secs: default_huggingface_timeout_secs(),
        }
    }
}

fn default_huggingface_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_huggingface_timeout_secs() -> u64 {
    10
}

/// Alert dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AlertsConfig {
    /// Automatically add red-rated senders to the block list.
    #[serde(default = "default_auto_block")]
    pub auto_block_red: bool,

    /// Automatically add yellow-rated senders to the watch list.
    #[serde(default = "default_watch_on_yellow")]
    pub watch_on_yellow: bool,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            auto_block_red: default_auto_block(),
            watch_on_yellow: default_watch_on_yellow(),
        }
    }
}

fn default_auto_block() -> bool {
    true
}

fn default_watch_on_yellow() -> bool {
    true
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory where history, sender lists, cache snapshots, and
    /// settings JSON files are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Maximum number of history entries retained (oldest dropped first).
    #[serde(default = "default_history_max_entries")]
    pub history_max_entries: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_max_entries: default_history_max_entries(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("sentryphish"))
        .unwrap_or_else(|| std::path::PathBuf::from("sentryphish-data"))
        .to_string_lossy()
        .into_owned()
}

fn default_history_max_entries() -> usize {
    100
}
