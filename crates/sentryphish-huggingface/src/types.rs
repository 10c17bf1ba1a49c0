// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Hugging Face zero-shot classification API.

use serde::{Deserialize, Serialize};

/// Classification labels submitted with every request.
pub const PHISHING_LABEL: &str = "phishing";
/// Counterpart label for legitimate content.
pub const LEGITIMATE_LABEL: &str = "legitimate";

/// Request body for `POST /models/{model}`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest {
    /// Text to classify.
    pub inputs: String,
    /// Zero-shot parameters.
    pub parameters: ClassifyParameters,
}

/// Zero-shot classification parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyParameters {
    /// Candidate labels scored against the input.
    pub candidate_labels: Vec<String>,
}

impl ClassifyRequest {
    /// Builds the phishing-vs-legitimate request for the given input.
    pub fn phishing(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: ClassifyParameters {
                candidate_labels: vec![PHISHING_LABEL.into(), LEGITIMATE_LABEL.into()],
            },
        }
    }
}

/// Response body: parallel label/score arrays sorted by score descending.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    /// Candidate labels in score order.
    pub labels: Vec<String>,
    /// Scores aligned with `labels`.
    pub scores: Vec<f64>,
}

impl ClassifyResponse {
    /// Returns the score for a label, if present.
    pub fn score_for(&self, label: &str) -> Option<f64> {
        let idx = self.labels.iter().position(|l| l == label)?;
        self.scores.get(idx).copied()
    }
}
