use serde::{Deserialize, Serialize};

/// Events emitted by the session manager.
/// The host page drains these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatEvent {
    /// The session list (order, titles, messages) changed
    SessionsChanged,

    /// The active session pointer moved
    ActiveSessionChanged { session_id: Option<String> },

    /// Send-in-progress flag flipped
    LoadingChanged { loading: bool },

    /// Analysis-in-progress flag flipped
    AnalyzingChanged { analyzing: bool },

    /// Transient notification (toast)
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}
