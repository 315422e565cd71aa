//! Whole-session reports: analysis and summary.

use std::future::Future;

use tewuwuq_types::{
    ChatError, Result,
    ai::{format_transcript, AnalysisMessage, AnalysisRequest},
    event::Notice,
};

use crate::failure::FailureKind;
use crate::manager::SessionManager;
use crate::ports::AiPort;

impl SessionManager {
    /// Ask the AI for a structured analysis of a session.
    /// Returns `None` (after a notice) when there is nothing to analyze or
    /// the call fails.
    pub async fn analyze(&self, ai: &dyn AiPort, session_id: Option<&str>) -> Option<String> {
        let (session_title, messages) = self.report_input(session_id)?;
        let req = AnalysisRequest {
            messages,
            session_title,
        };
        self.run_report("analysis", ai.analyze_session(req)).await
    }

    /// Ask the AI for a short summary of a session's transcript.
    pub async fn summarize(&self, ai: &dyn AiPort, session_id: Option<&str>) -> Option<String> {
        let (_, messages) = self.report_input(session_id)?;
        let transcript = format_transcript(&messages);
        self.run_report("summary", ai.summarize(&transcript)).await
    }

    fn report_input(&self, session_id: Option<&str>) -> Option<(String, Vec<AnalysisMessage>)> {
        let Some(id) = session_id else {
            self.event_bus.notify(Notice::error(
                "No Chat Selected",
                "Please select a chat session to analyze.",
            ));
            return None;
        };

        let Some(session) = self.session(id) else {
            self.event_bus.notify(Notice::error(
                "Chat Not Found",
                "The selected chat session no longer exists.",
            ));
            return None;
        };

        if session.messages.is_empty() {
            self.event_bus.notify(Notice::info(
                "Nothing to Analyze",
                "This chat session has no messages yet.",
            ));
            return None;
        }

        let messages = session.messages.iter().map(AnalysisMessage::from).collect();
        Some((session.title, messages))
    }

    async fn run_report<F>(&self, kind: &str, call: F) -> Option<String>
    where
        F: Future<Output = Result<String>>,
    {
        if !self.begin_analysis() {
            self.event_bus.notify(Notice::info(
                "Please Wait",
                "Another analysis is still running.",
            ));
            return None;
        }

        let result = call.await.and_then(|text| {
            if text.trim().is_empty() {
                Err(ChatError::Ai(format!("AI did not return a {}", kind)))
            } else {
                Ok(text)
            }
        });

        let report = match result {
            Ok(text) => Some(text),
            Err(e) => {
                let failure = FailureKind::classify(&e);
                log::error!("Session {} failed: {}", kind, e);
                self.event_bus.notify(Notice::error("Analysis Error", failure.notice_text()));
                None
            }
        };

        self.end_analysis();
        report
    }
}
