//! Message exchange: one user turn and the AI's answer.
//!
//! 1. Append the user message and persist it before calling out
//! 2. Send prior turns + current input to the AI port (abortable)
//! 3. Append the reply, or a visible error bubble, and persist again

use futures::future::Abortable;
use tewuwuq_types::{
    ai::{ChatMode, HistoryTurn, InlineFile, RespondRequest},
    event::Notice,
    message::{file_placeholder_text, ChatMessage, ChatMessageFile},
    time::now_millis,
};

use crate::failure::FailureKind;
use crate::manager::SessionManager;
use crate::ports::AiPort;
use crate::title::derive_title;

/// How a send ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent (empty input or session busy)
    Rejected,
    /// The AI answered and the reply was stored
    Replied,
    /// The AI call failed; an error bubble was stored
    Failed(FailureKind),
    /// The session was deleted or cleared while waiting
    Cancelled,
}

impl SessionManager {
    pub async fn send_message(
        &self,
        ai: &dyn AiPort,
        text: &str,
        mode: ChatMode,
        file: Option<ChatMessageFile>,
    ) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() && file.is_none() {
            log::debug!("Ignoring empty message");
            self.event_bus.notify(Notice::info(
                "Empty Message",
                "Type a message or attach a file first.",
            ));
            return SendOutcome::Rejected;
        }

        let session_id = match self.active_session_id() {
            Some(id) if self.has_session(&id) => id,
            _ => self.start_new_session().await,
        };

        if self.is_session_busy(&session_id) {
            log::debug!("Session {} already waiting for a reply", session_id);
            self.event_bus.notify(Notice::info(
                "Please Wait",
                "The AI is still answering the previous message.",
            ));
            return SendOutcome::Rejected;
        }

        let user_text = match file {
            Some(ref f) if text.is_empty() => file_placeholder_text(&f.name),
            _ => text.to_string(),
        };
        let user_msg = ChatMessage::user(user_text, file.clone());

        let Some(history) = self.append_user_message(&session_id, text, user_msg) else {
            return SendOutcome::Rejected;
        };
        let registration = self.begin_exchange(&session_id);
        self.persist_sessions().await;

        let req = RespondRequest {
            history,
            current_message_text: text.to_string(),
            current_file: file.as_ref().map(InlineFile::from),
            mode,
        };

        let outcome = match Abortable::new(ai.respond(req), registration).await {
            Ok(Ok(reply)) => {
                let msg = ChatMessage::ai(reply.amharic_response, reply.reasoning);
                self.append_and_persist(&session_id, msg).await;
                SendOutcome::Replied
            }
            Ok(Err(e)) => {
                let kind = FailureKind::classify(&e);
                log::error!("AI request via {} failed: {}", ai.provider_name(), e);
                self.append_and_persist(&session_id, ChatMessage::error(kind.bubble_text()))
                    .await;
                self.event_bus.notify(Notice::error("Error", kind.notice_text()));
                SendOutcome::Failed(kind)
            }
            Err(_aborted) => {
                log::info!("Exchange for session {} cancelled", session_id);
                SendOutcome::Cancelled
            }
        };

        self.end_exchange(&session_id);
        outcome
    }

    /// Append the user's message, titling the session if it is the first
    /// one. Returns the history of turns that preceded it.
    fn append_user_message(
        &self,
        session_id: &str,
        text: &str,
        msg: ChatMessage,
    ) -> Option<Vec<HistoryTurn>> {
        let max_title_chars = self.max_title_chars;
        let now = now_millis();
        self.with_session_mut(session_id, |session| {
            let history = session
                .messages
                .iter()
                .filter(|m| !m.is_error)
                .map(HistoryTurn::from_message)
                .collect();

            if session.messages.is_empty() {
                session.title = derive_title(text, msg.file.as_ref(), max_title_chars, now);
            }
            session.messages.push(msg);
            session.timestamp = now;
            history
        })
    }

    async fn append_and_persist(&self, session_id: &str, msg: ChatMessage) {
        let now = now_millis();
        let appended = self
            .with_session_mut(session_id, |session| {
                session.messages.push(msg);
                session.timestamp = now;
            })
            .is_some();

        if appended {
            self.persist_sessions().await;
        } else {
            log::warn!("Session {} vanished before the reply arrived", session_id);
        }
    }
}
