// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the DeepSeek chat-completion API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier, e.g. "deepseek-chat".
    pub model: String,
    /// Conversation messages (system prompt + user content).
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Response body for a chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first carries the reply.
    pub choices: Vec<ChatChoice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant's reply message.
    pub message: ChatMessage,
}

/// The structured verdict the model is prompted to embed in its reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyVerdict {
    /// Whether the analyzed content is phishing.
    pub is_phishing: bool,
    /// Model confidence in [0, 1]. Missing treated as 0.5.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Short explanation of the verdict.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Words the model flagged as suspicious.
    #[serde(default)]
    pub suspicious_words: Vec<String>,
    /// URLs the model flagged as suspicious.
    #[serde(default)]
    pub suspicious_urls: Vec<String>,
}

fn default_confidence() -> f64 {
    0.5
}
