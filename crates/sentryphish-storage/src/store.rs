// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-blob store backing history, sender lists, cache snapshots, and
//! runtime settings.
//!
//! One file per concern under the configured data directory. Missing or
//! corrupt files are logged and treated as empty rather than failing the
//! pipeline.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sentryphish_alert::SenderLists;
use sentryphish_config::SentryConfig;
use sentryphish_core::{AdapterType, HealthStatus, PluginAdapter, SentryError, StorageAdapter};
use sentryphish_detector::CacheEntry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::history::HistoryEntry;

pub(crate) const HISTORY_FILE: &str = "history.json";
const SENDERS_FILE: &str = "senders.json";
const CACHE_FILE: &str = "cache.json";
const SETTINGS_FILE: &str = "settings.json";

/// Runtime toggles persisted across restarts.
///
/// Unknown or missing fields fall back to defaults on load, so older
/// settings files keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default = "default_true")]
    pub monitoring_enabled: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub vibration_enabled: bool,
    /// Persisted override for the configured scan interval. `None` keeps
    /// the interval from the monitor configuration.
    #[serde(default)]
    pub scan_interval_minutes: Option<u64>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            monitoring_enabled: true,
            sound_enabled: true,
            vibration_enabled: true,
            scan_interval_minutes: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// File-backed store for all persisted Sentryphish state.
pub struct JsonStore {
    data_dir: PathBuf,
    pub(crate) history: Mutex<Vec<HistoryEntry>>,
    pub(crate) history_cap: usize,
}

impl JsonStore {
    pub fn new(config: &SentryConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.storage.data_dir),
            history: Mutex::new(Vec::new()),
            history_cap: config.storage.history_max_entries,
        }
    }

    /// Store rooted at an explicit directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>, history_cap: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            history: Mutex::new(Vec::new()),
            history_cap,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Reads a JSON blob, falling back to the default value when the file
    /// is missing or unparsable.
    pub(crate) async fn read_blob<T>(&self, file: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return T::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read store file");
                return T::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "store file is corrupt, ignoring");
                T::default()
            }
        }
    }

    /// Serializes a value to its JSON blob file.
    pub(crate) async fn write_blob<T>(&self, file: &str, value: &T) -> Result<(), SentryError>
    where
        T: Serialize,
    {
        let path = self.path(file);
        let bytes = serde_json::to_vec_pretty(value).map_err(|err| SentryError::Storage {
            source: Box::new(err),
        })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| SentryError::Storage {
                source: Box::new(err),
            })?;
        debug!(path = %path.display(), "store file written");
        Ok(())
    }

    /// Loads the persisted sender lists.
    pub async fn load_senders(&self) -> SenderLists {
        self.read_blob(SENDERS_FILE).await
    }

    /// Persists the sender lists.
    pub async fn save_senders(&self, lists: &SenderLists) -> Result<(), SentryError> {
        self.write_blob(SENDERS_FILE, lists).await
    }

    /// Loads the detection cache snapshot. Expired entries are dropped by
    /// the cache itself at restore time.
    pub async fn load_cache(&self) -> Vec<(String, CacheEntry)> {
        self.read_blob(CACHE_FILE).await
    }

    /// Persists a detection cache snapshot.
    pub async fn save_cache(&self, snapshot: &[(String, CacheEntry)]) -> Result<(), SentryError> {
        self.write_blob(CACHE_FILE, &snapshot).await
    }

    /// Loads runtime settings, merging over defaults.
    pub async fn load_settings(&self) -> RuntimeSettings {
        self.read_blob(SETTINGS_FILE).await
    }

    /// Persists runtime settings.
    pub async fn save_settings(&self, settings: &RuntimeSettings) -> Result<(), SentryError> {
        self.write_blob(SETTINGS_FILE, settings).await
    }
}

#[async_trait]
impl PluginAdapter for JsonStore {
    fn name(&self) -> &str {
        "json-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SentryError> {
        if self.data_dir.is_dir() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy(format!(
                "data directory {} does not exist",
                self.data_dir.display()
            )))
        }
    }

    async fn shutdown(&self) -> Result<(), SentryError> {
        self.close().await
    }
}

#[async_trait]
impl StorageAdapter for JsonStore {
    /// Creates the data directory and loads the persisted history into
    /// memory.
    async fn initialize(&self) -> Result<(), SentryError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|err| SentryError::Storage {
                source: Box::new(err),
            })?;
        let mut entries: Vec<HistoryEntry> = self.read_blob(HISTORY_FILE).await;
        entries.truncate(self.history_cap);
        *self.history.lock().await = entries;
        debug!(data_dir = %self.data_dir.display(), "store initialized");
        Ok(())
    }

    /// Flushes the in-memory history to disk.
    async fn close(&self) -> Result<(), SentryError> {
        let entries = self.history.lock().await;
        self.write_blob(HISTORY_FILE, &*entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initialize_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path().join("nested"), 100);
        store.initialize().await.unwrap();
        assert!(dir.path().join("nested").is_dir());
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn missing_files_load_as_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path(), 100);
        store.initialize().await.unwrap();

        assert!(store.load_senders().await.is_empty());
        assert!(store.load_cache().await.is_empty());
        let settings = store.load_settings().await;
        assert!(settings.monitoring_enabled);
        assert_eq!(settings.scan_interval_minutes, None);
    }

    #[tokio::test]
    async fn corrupt_files_load_as_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path(), 100);
        store.initialize().await.unwrap();
        tokio::fs::write(store.path(SENDERS_FILE), b"{ not json")
            .await
            .unwrap();

        assert!(store.load_senders().await.is_empty());
    }

    #[tokio::test]
    async fn sender_lists_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path(), 100);
        store.initialize().await.unwrap();

        let mut lists = SenderLists::new();
        lists.add_block("spam@example.com");
        store.save_senders(&lists).await.unwrap();

        let loaded = store.load_senders().await;
        assert!(loaded.is_blocked("spam@example.com"));
    }

    #[tokio::test]
    async fn settings_round_trip_and_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_data_dir(dir.path(), 100);
        store.initialize().await.unwrap();

        let mut settings = RuntimeSettings::default();
        settings.monitoring_enabled = false;
        settings.scan_interval_minutes = Some(5);
        store.save_settings(&settings).await.unwrap();
        assert_eq!(store.load_settings().await.scan_interval_minutes, Some(5));

        // Drop a field to simulate an older settings file.
        tokio::fs::write(
            store.path(SETTINGS_FILE),
            br#"{"monitoring_enabled": false}"#,
        )
        .await
        .unwrap();

        let loaded = store.load_settings().await;
        assert!(!loaded.monitoring_enabled);
        assert!(loaded.sound_enabled);
        assert_eq!(loaded.scan_interval_minutes, None);
    }
}
