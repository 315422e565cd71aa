//! Request and response shapes exchanged with the AI provider.

use serde::{Deserialize, Serialize};

use crate::message::{ChatMessage, ChatMessageFile, Sender};

/// Response persona selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    General,
    Medical,
    Child,
    Student,
}

impl ChatMode {
    pub fn all() -> &'static [ChatMode] {
        &[
            ChatMode::General,
            ChatMode::Medical,
            ChatMode::Child,
            ChatMode::Student,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::General => "general",
            ChatMode::Medical => "medical",
            ChatMode::Child => "child",
            ChatMode::Student => "student",
        }
    }

    /// Parse a mode tag. Unknown tags fall back to `General`.
    pub fn parse(tag: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or_default()
    }
}

/// Role of a prior turn in the history payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

/// Inline media reference (data URI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineMedia {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<InlineMedia>,
}

/// One prior turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub parts: Vec<HistoryPart>,
}

impl HistoryTurn {
    /// Convert a stored message into a history turn.
    /// Empty text is omitted; an attached file becomes a media part.
    pub fn from_message(msg: &ChatMessage) -> Self {
        let role = match msg.sender {
            Sender::User => HistoryRole::User,
            Sender::Ai => HistoryRole::Model,
        };

        let mut parts = Vec::new();
        if !msg.text.trim().is_empty() {
            parts.push(HistoryPart {
                text: Some(msg.text.clone()),
                media: None,
            });
        }
        if let Some(ref file) = msg.file {
            parts.push(HistoryPart {
                text: None,
                media: Some(InlineMedia {
                    url: file.data_uri.clone(),
                    content_type: Some(file.mime_type.clone()),
                    name: Some(file.name.clone()),
                }),
            });
        }

        Self { role, parts }
    }
}

/// File sent along with the current message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineFile {
    pub name: String,
    pub data_uri: String,
    pub mime_type: String,
}

impl From<&ChatMessageFile> for InlineFile {
    fn from(file: &ChatMessageFile) -> Self {
        Self {
            name: file.name.clone(),
            data_uri: file.data_uri.clone(),
            mime_type: file.mime_type.clone(),
        }
    }
}

/// Input to the respond capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub history: Vec<HistoryTurn>,
    pub current_message_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<InlineFile>,
    pub mode: ChatMode,
}

/// Output of the respond capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReply {
    pub amharic_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Attachment metadata handed to analysis (no payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFile {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

/// Simplified message shape for session analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<AnalysisFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl From<&ChatMessage> for AnalysisMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            id: msg.id.clone(),
            text: msg.text.clone(),
            sender: msg.sender,
            timestamp: msg.timestamp,
            file: msg.file.as_ref().map(|f| AnalysisFile {
                name: f.name.clone(),
                mime_type: f.mime_type.clone(),
                size: f.size,
            }),
            reasoning: msg.reasoning.clone(),
        }
    }
}

/// Input to the session analysis capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub messages: Vec<AnalysisMessage>,
    pub session_title: String,
}

/// Render messages as a plain transcript:
/// `User: ...` / `AI: ...` blocks separated by `\n---\n`.
pub fn format_transcript(messages: &[AnalysisMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            let file_info = msg
                .file
                .as_ref()
                .map(|f| format!(" [File Attached: {} ({})]", f.name, f.mime_type))
                .unwrap_or_default();
            format!("{}: {}{}", msg.sender.label(), msg.text, file_info)
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}
