// SPDX-FileCopyrightText: 2026 Sentryphish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Grok chat-completion API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier, e.g. "grok-2-latest".
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

/// Error envelope returned by the API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// The structured verdict the model is prompted to embed in its reply.
///
/// The model emits camelCase field names inside a JSON object, either
/// fenced in a ```json block or bare in the reply text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyVerdict {
    /// Whether the analyzed content is phishing.
    pub is_phishing: bool,
    /// Model confidence in [0, 1]. Missing treated as 0.
    #[serde(default)]
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
