// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender list bookkeeping: safe, watch, and block lists.
//!
//! The three lists are kept mutually disjoint. Adding a sender to one list
//! removes it from the others, except that the watch list never accepts a
//! sender already on the safe or block list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The three sender lists maintained by the alert layer.
///
/// Invariant: a sender appears on at most one list at any time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderLists {
    #[serde(default)]
    safe: HashSet<String>,
    #[serde(default)]
    watch: HashSet<String>,
    #[serde(default)]
    block: HashSet<String>,
}

impl SenderLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a sender as trusted, removing it from the watch and block lists.
    pub fn add_safe(&mut self, sender: impl Into<String>) {
        let sender = sender.into();
        self.watch.remove(&sender);
        self.block.remove(&sender);
        self.safe.insert(sender);
    }

    /// Puts a sender under observation.
    ///
    /// A sender already on the safe or block list is left where it is; those
    /// lists take precedence over watching. Returns true if the sender was
    /// added.
    pub fn add_watch(&mut self, sender: impl Into<String>) -> bool {
        let sender = sender.into();
        if self.safe.contains(&sender) || self.block.contains(&sender) {
            return false;
        }
        self.watch.insert(sender)
    }

    /// Blocks a sender, removing it from the safe and watch lists.
    pub fn add_block(&mut self, sender: impl Into<String>) {
        let sender = sender.into();
        self.safe.remove(&sender);
        self.watch.remove(&sender);
        self.block.insert(sender);
    }

    /// Removes a sender from whichever list it is on. Returns true if the
    /// sender was found.
    pub fn remove(&mut self, sender: &str) -> bool {
        self.safe.remove(sender) | self.watch.remove(sender) | self.block.remove(sender)
    }

    pub fn is_safe(&self, sender: &str) -> bool {
        self.safe.contains(sender)
    }

    pub fn is_watched(&self, sender: &str) -> bool {
        self.watch.contains(sender)
    }

    pub fn is_blocked(&self, sender: &str) -> bool {
        self.block.contains(sender)
    }

    /// Trusted senders, sorted for stable output.
    pub fn safe_senders(&self) -> Vec<String> {
        let mut out: Vec<String> = self.safe.iter().cloned().collect();
        out.sort();
        out
    }

    /// Watched senders, sorted for stable output.
    pub fn watched_senders(&self) -> Vec<String> {
        let mut out: Vec<String> = self.watch.iter().cloned().collect();
        out.sort();
        out
    }

    /// Blocked senders, sorted for stable output.
    pub fn blocked_senders(&self) -> Vec<String> {
        let mut out: Vec<String> = self.block.iter().cloned().collect();
        out.sort();
        out
    }

    pub fn is_empty(&self) -> bool {
        self.safe.is_empty() && self.watch.is_empty() && self.block.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_safe_clears_watch_and_block() {
        let mut lists = SenderLists::new();
        lists.add_watch("alice@example.com");
        lists.add_safe("alice@example.com");
        assert!(lists.is_safe("alice@example.com"));
        assert!(!lists.is_watched("alice@example.com"));

        lists.add_block("bob@example.com");
        lists.add_safe("bob@example.com");
        assert!(lists.is_safe("bob@example.com"));
        assert!(!lists.is_blocked("bob@example.com"));
    }

    #[test]
    fn watch_defers_to_safe_and_block() {
        let mut lists = SenderLists::new();
        lists.add_safe("trusted@example.com");
        assert!(!lists.add_watch("trusted@example.com"));
        assert!(lists.is_safe("trusted@example.com"));
        assert!(!lists.is_watched("trusted@example.com"));

        lists.add_block("spam@example.com");
        assert!(!lists.add_watch("spam@example.com"));
        assert!(lists.is_blocked("spam@example.com"));
        assert!(!lists.is_watched("spam@example.com"));
    }

    #[test]
    fn blocking_clears_safe_and_watch() {
        let mut lists = SenderLists::new();
        lists.add_safe("flip@example.com");
        lists.add_block("flip@example.com");
        assert!(lists.is_blocked("flip@example.com"));
        assert!(!lists.is_safe("flip@example.com"));

        lists.add_watch("flop@example.com");
        lists.add_block("flop@example.com");
        assert!(lists.is_blocked("flop@example.com"));
        assert!(!lists.is_watched("flop@example.com"));
    }

    #[test]
    fn remove_clears_membership_everywhere() {
        let mut lists = SenderLists::new();
        lists.add_watch("gone@example.com");
        assert!(lists.remove("gone@example.com"));
        assert!(!lists.is_watched("gone@example.com"));
        assert!(!lists.remove("gone@example.com"));
    }

    #[test]
    fn getters_return_sorted_senders() {
        let mut lists = SenderLists::new();
        lists.add_block("zeta@example.com");
        lists.add_block("alpha@example.com");
        assert_eq!(
            lists.blocked_senders(),
            vec!["alpha@example.com".to_string(), "zeta@example.com".to_string()]
        );
    }

    #[test]
    fn lists_round_trip_through_serde() {
        let mut lists = SenderLists::new();
        lists.add_safe("a@example.com");
        lists.add_watch("b@example.com");
        lists.add_block("c@example.com");
        let json = serde_json::to_string(&lists).unwrap();
        let back: SenderLists = serde_json::from_str(&json).unwrap();
        assert!(back.is_safe("a@example.com"));
        assert!(back.is_watched("b@example.com"));
        assert!(back.is_blocked("c@example.com"));
    }
}
