// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local keyword heuristic, the last tier of the classification chain.
//!
//! Runs entirely offline. Scores content by counting suspicious terms,
//! then adjusts for URL shorteners, sensitive-data requests, and urgency
//! markers. Confidence is deliberately conservative so heuristic verdicts
//! rarely reach the red tier on keyword count alone.

use std::sync::LazyLock;

use regex::Regex;

/// Terms that commonly appear in phishing lures.
const SUSPICIOUS_TERMS: &[&str] = &[
    "password",
    "login",
    "account",
    "bank",
    "card",
    "credit",
    "verify",
    "update",
    "confirm",
    "urgent",
    "click",
    "won",
    "prize",
    "offer",
    "limited",
    "exclusive",
    "free",
    "payment",
    "transfer",
    "suspended",
];

/// Terms indicating a request for sensitive data.
const SENSITIVE_TERMS: &[&str] = &[
    "password",
    "login",
    "code",
    "pin",
    "card number",
    "social security",
    "update your details",
    "confirm your details",
];

/// Terms creating artificial urgency.
const URGENCY_TERMS: &[&str] = &[
    "urgent",
    "now",
    "immediately",
    "limited",
    "blocked",
    "suspended",
    "expires",
];

/// URL shortener hosts that hide the real destination.
const URL_SHORTENERS: &[&str] = &["bit.ly", "tinyurl", "goo.gl", "is.gd", "t.co"];

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Suspicious terms present in the content, in list order.
///
/// Shared with provider adapters whose APIs return a bare verdict with no
/// evidence of their own.
pub fn extract_suspicious_words(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    SUSPICIOUS_TERMS
        .iter()
        .filter(|term| lower.contains(**term))
        .map(|term| term.to_string())
        .collect()
}

/// All URLs present in the content.
pub fn extract_urls(content: &str) -> Vec<String> {
    URL_RE
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Outcome of the offline heuristic scan.
#[derive(Debug, Clone)]
pub struct HeuristicVerdict {
    /// Whether the content is judged phishing.
    pub is_phishing: bool,
    /// Verdict confidence in [0, 1].
    pub confidence: f64,
    /// Human-readable rationale.
    pub explanation: String,
    /// Suspicious terms found in the content.
    pub suspicious_words: Vec<String>,
    /// URLs found in the content.
    pub suspicious_urls: Vec<String>,
    /// Sensitive-data request markers found.
    pub sensitive_requests: Vec<String>,
    /// Urgency markers found.
    pub urgency_markers: Vec<String>,
}

/// Scans content and produces an offline verdict.
///
/// Confidence ladder by suspicious-term count: 5+ scores 0.85, 3+ scores
/// 0.7, 1+ scores 0.5, none scores 0.3. A shortener combined with a
/// sensitive-data request adds 0.2; urgency combined with a sensitive-data
/// request adds 0.15. Both adjustments cap at 0.9.
pub fn evaluate(content: &str) -> HeuristicVerdict {
    let lower = content.to_lowercase();

    let suspicious_words = extract_suspicious_words(content);
    let urls = extract_urls(content);

    let has_shortener = URL_SHORTENERS.iter().any(|host| lower.contains(host));

    let sensitive_requests: Vec<String> = SENSITIVE_TERMS
        .iter()
        .filter(|term| lower.contains(**term))
        .map(|term| term.to_string())
        .collect();

    let urgency_markers: Vec<String> = URGENCY_TERMS
        .iter()
        .filter(|term| lower.contains(**term))
        .map(|term| term.to_string())
        .collect();

    let asks_sensitive = !sensitive_requests.is_empty();
    let has_urgency = !urgency_markers.is_empty();

    let is_phishing = suspicious_words.len() >= 3
        || (has_shortener && asks_sensitive)
        || (has_urgency && asks_sensitive && !urls.is_empty());

    let mut confidence = match suspicious_words.len() {
        n if n >= 5 => 0.85,
        n if n >= 3 => 0.7,
        n if n >= 1 => 0.5,
        _ => 0.3,
    };

    if has_shortener && asks_sensitive {
        confidence = f64::min(0.9, confidence + 0.2);
    }
    if has_urgency && asks_sensitive {
        confidence = f64::min(0.9, confidence + 0.15);
    }

    let explanation = if is_phishing {
        "Offline scan found a combination of suspicious keywords and URL patterns typical of phishing".to_string()
    } else {
        "Offline scan found no strong phishing indicators".to_string()
    };

    HeuristicVerdict {
        is_phishing,
        confidence,
        explanation,
        suspicious_words,
        suspicious_urls: urls,
        sensitive_requests,
        urgency_markers,
    }
}
