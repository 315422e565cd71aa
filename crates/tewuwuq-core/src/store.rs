//! Session store: JSON records in a key-value store.
//!
//! Three records are kept:
//!   `tewuwuqChatSessions`    → array of sessions
//!   `tewuwuqActiveSessionId` → `"<id>"` or `null`
//!   `tewuwuqChatHistory`     → legacy flat message array, read once
//!
//! Reads never fail: a missing or malformed record is logged and treated
//! as empty.

use std::rc::Rc;
use serde::Deserialize;
use tewuwuq_types::{
    Result,
    message::ChatMessage,
    session::ChatSession,
};
use crate::ports::StoragePort;

pub const SESSIONS_KEY: &str = "tewuwuqChatSessions";
pub const ACTIVE_SESSION_KEY: &str = "tewuwuqActiveSessionId";
pub const LEGACY_HISTORY_KEY: &str = "tewuwuqChatHistory";

/// On-disk session shape. Older records have no `createdAt`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    id: String,
    title: String,
    timestamp: i64,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

impl From<SessionRecord> for ChatSession {
    fn from(rec: SessionRecord) -> Self {
        Self {
            id: rec.id,
            title: rec.title,
            timestamp: rec.timestamp,
            created_at: rec.created_at.unwrap_or(rec.timestamp),
            messages: rec.messages,
        }
    }
}

pub struct SessionStore {
    storage: Rc<dyn StoragePort>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    /// Read a record and decode it, treating any failure as absent.
    async fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read {} from {}: {}", key, self.backend_name(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Discarding malformed {} record: {}", key, e);
                None
            }
        }
    }

    pub async fn load(&self) -> Vec<ChatSession> {
        self.read_json::<Vec<SessionRecord>>(SESSIONS_KEY)
            .await
            .map(|records| records.into_iter().map(ChatSession::from).collect())
            .unwrap_or_default()
    }

    pub async fn save(&self, sessions: &[ChatSession]) -> Result<()> {
        let json = serde_json::to_string(sessions)?;
        self.storage.set(SESSIONS_KEY, &json).await
    }

    pub async fn load_active_id(&self) -> Option<String> {
        self.read_json::<Option<String>>(ACTIVE_SESSION_KEY)
            .await
            .flatten()
    }

    pub async fn save_active_id(&self, id: Option<&str>) -> Result<()> {
        let json = serde_json::to_string(&id)?;
        self.storage.set(ACTIVE_SESSION_KEY, &json).await
    }

    pub async fn load_legacy(&self) -> Vec<ChatMessage> {
        self.read_json::<Vec<ChatMessage>>(LEGACY_HISTORY_KEY)
            .await
            .unwrap_or_default()
    }

    pub async fn clear_legacy(&self) -> Result<()> {
        self.storage.delete(LEGACY_HISTORY_KEY).await
    }
}
