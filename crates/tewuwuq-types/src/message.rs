use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::now_millis;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    pub fn label(&self) -> &str {
        match self {
            Sender::User => "User",
            Sender::Ai => "AI",
        }
    }
}

/// A file attached to a message, carried inline as a data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageFile {
    pub name: String,
    /// MIME type, e.g. `image/png`
    #[serde(rename = "type")]
    pub mime_type: String,
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
    pub size: u64,
}

/// A single message in a chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<ChatMessageFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Synthesized failure bubble; never sent back to the model
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    fn new(prefix: &str, sender: Sender, text: String) -> Self {
        Self {
            id: format!("{}-{}", prefix, Uuid::new_v4()),
            text,
            sender,
            timestamp: now_millis(),
            file: None,
            reasoning: None,
            is_error: false,
        }
    }

    pub fn user(text: impl Into<String>, file: Option<ChatMessageFile>) -> Self {
        let mut msg = Self::new("user", Sender::User, text.into());
        msg.file = file;
        msg
    }

    pub fn ai(text: impl Into<String>, reasoning: Option<String>) -> Self {
        let mut msg = Self::new("ai", Sender::Ai, text.into());
        msg.reasoning = reasoning.filter(|r| !r.trim().is_empty());
        msg
    }

    pub fn error(text: impl Into<String>) -> Self {
        let mut msg = Self::new("error", Sender::Ai, text.into());
        msg.is_error = true;
        msg
    }
}

/// Text shown for a user message sent with an attachment but no text
pub fn file_placeholder_text(file_name: &str) -> String {
    format!("File: {}", file_name)
}
