// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capped TTL cache for classification results.
//!
//! Keyed by a content prefix so near-identical notifications hit the same
//! entry. Expiry is enforced when a snapshot is restored from storage;
//! within a process lifetime entries live until pruned by the cap.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use sentryphish_core::types::DetectionResult;

/// Number of leading characters used as the cache key.
const KEY_PREFIX_CHARS: usize = 100;

/// A cached classification with its insertion timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached classification.
    pub result: DetectionResult,
    /// When the entry was inserted.
    pub cached_at: DateTime<Utc>,
}

/// In-memory cache of classification results with a size cap and TTL.
#[derive(Debug)]
pub struct DetectionCache {
    entries: HashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl DetectionCache {
    /// Creates an empty cache with the given cap and TTL in hours.
    pub fn new(max_entries: usize, ttl_hours: u64) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    /// Derives the cache key for content: the trimmed first 100 characters.
    pub fn key(content: &str) -> String {
        content.chars().take(KEY_PREFIX_CHARS).collect::<String>().trim().to_string()
    }

    /// Looks up a cached result for the given content.
    pub fn get(&self, content: &str) -> Option<&DetectionResult> {
        self.entries.get(&Self::key(content)).map(|e| &e.result)
    }

    /// Inserts a result, pruning the oldest entries beyond the cap.
    pub fn insert(&mut self, content: &str, result: DetectionResult) {
        self.entries.insert(
            Self::key(content),
            CacheEntry {
                result,
                cached_at: Utc::now(),
            },
        );
        self.prune();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Exports all entries for persistence.
    pub fn snapshot(&self) -> Vec<(String, CacheEntry)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Restores entries from a persisted snapshot, dropping expired ones.
    pub fn restore(&mut self, snapshot: Vec<(String, CacheEntry)>) {
        let now = Utc::now();
        self.entries = snapshot
            .into_iter()
            .filter(|(_, entry)| now - entry.cached_at <= self.ttl)
            .collect();
        self.prune();
    }

    /// Removes the oldest entries until the cap is respected.
    fn prune(&mut self) {
        while self.entries.len() > self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.cached_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}
