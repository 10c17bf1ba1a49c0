// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-classification skip rules.
//!
//! Cheap checks that short-circuit the provider chain for content that is
//! clearly safe: trivially short messages and routine system notifications.

/// Notification phrases that mark routine system messages.
const SAFE_PATTERNS: &[&str] = &[
    "battery",
    "update available",
    "connected",
    "backup complete",
    "sync complete",
    "new app installed",
    "weather",
    "temperature",
    "protection active",
    "monitoring",
    "scan complete",
    "reminder",
    "remember",
    "alarm",
];

/// Well-known app names that are safe absent credential or link talk.
const KNOWN_APPS: &[&str] = &[
    "google",
    "microsoft",
    "whatsapp",
    "instagram",
    "facebook",
    "calendar",
    "clock",
    "alarm",
    "app store",
    "play store",
];

/// A skip-rule verdict: content classified safe without any provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipVerdict {
    /// Confidence of the safe classification.
    pub confidence: f64,
    /// Why the content was skipped.
    pub explanation: String,
}

/// Returns a verdict when content is trivially short or a routine system
/// message, `None` when full classification is needed.
///
/// Short content (under `min_chars` after trimming) is safe at 0.9;
/// recognized system messages are safe at 0.95.
pub fn check(content: &str, min_chars: usize) -> Option<SkipVerdict> {
    if content.trim().chars().count() < min_chars {
        return Some(SkipVerdict {
            confidence: 0.9,
            explanation: "Content too short for analysis".to_string(),
        });
    }

    if is_safe_system_message(content) {
        return Some(SkipVerdict {
            confidence: 0.95,
            explanation: "System message or safe notification".to_string(),
        });
    }

    None
}

/// Recognizes routine system notifications and messages from well-known
/// apps that carry no credential requests or links.
fn is_safe_system_message(content: &str) -> bool {
    let lower = content.to_lowercase();

    if SAFE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    KNOWN_APPS.iter().any(|app| {
        lower.contains(app)
            && !lower.contains("password")
            && !lower.contains("login")
            && !lower.contains("click")
            && !lower.contains("http")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_skipped() {
        let verdict = check("hi there", 15).expect("short content skips");
        assert_eq!(verdict.confidence, 0.9);
    }

    #[test]
    fn whitespace_only_counts_as_short() {
        assert!(check("                    ", 15).is_some());
    }

    #[test]
    fn system_notification_is_skipped() {
        let verdict = check("Backup complete: 124 photos uploaded overnight", 15)
            .expect("system message skips");
        assert_eq!(verdict.confidence, 0.95);
    }

    #[test]
    fn known_app_without_links_is_skipped() {
        assert!(check("WhatsApp: you have 3 new messages waiting", 15).is_some());
    }

    #[test]
    fn known_app_with_credential_talk_is_not_skipped() {
        assert!(check("Google: enter your password to continue here", 15).is_none());
    }

    #[test]
    fn known_app_with_link_is_not_skipped() {
        assert!(check("Facebook alert, visit http://facebook.example/verify", 15).is_none());
    }

    #[test]
    fn ordinary_content_is_not_skipped() {
        assert!(check("Your parcel could not be delivered, reschedule today", 15).is_none());
    }
}
