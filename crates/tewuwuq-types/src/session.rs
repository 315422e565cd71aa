use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::ChatMessage;
use crate::time::{format_day, is_same_day};

/// A persisted conversation thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    /// Last activity, epoch milliseconds
    pub timestamp: i64,
    pub created_at: i64,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(title: impl Into<String>, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            timestamp: now,
            created_at: now,
            messages: Vec::new(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            timestamp: self.timestamp,
            created_at: self.created_at,
            message_count: self.messages.len(),
        }
    }

    /// Indices of messages that start a new calendar day, i.e. where a
    /// date separator goes when rendering the transcript.
    pub fn day_breaks(&self) -> Vec<usize> {
        let mut breaks = Vec::new();
        let mut last_day: Option<i64> = None;
        for (i, msg) in self.messages.iter().enumerate() {
            let starts_day = match last_day {
                None => true,
                Some(prev) => !is_same_day(prev, msg.timestamp),
            };
            if starts_day {
                breaks.push(i);
                last_day = Some(msg.timestamp);
            }
        }
        breaks
    }

    /// Day breaks paired with the day they start, ready to render
    pub fn day_separators(&self) -> Vec<DaySeparator> {
        self.day_breaks()
            .into_iter()
            .map(|index| DaySeparator {
                index,
                label: format_day(self.messages[index].timestamp),
            })
            .collect()
    }
}

/// Date line shown before the message at `index`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySeparator {
    pub index: usize,
    pub label: String,
}

/// Summary of a session for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub timestamp: i64,
    pub created_at: i64,
    pub message_count: usize,
}

/// Sort sessions newest-first by creation time.
/// The sort is stable, so sessions created in the same millisecond keep
/// their relative order.
pub fn sort_newest_first(sessions: &mut [ChatSession]) {
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
