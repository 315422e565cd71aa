#[cfg(test)]
mod tests {
    use crate::ai::*;
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;
    use crate::session::*;
    use crate::time::*;

    fn png(name: &str) -> ChatMessageFile {
        ChatMessageFile {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            data_uri: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            size: 8,
        }
    }

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = ChatMessage::user("ሰላም", None);
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "ሰላም");
        assert!(msg.id.starts_with("user-"));
        assert!(msg.file.is_none());
        assert!(msg.reasoning.is_none());
        assert!(!msg.is_error);
        assert!(msg.timestamp > 0);
    }

    #[test]
    fn test_message_ai_with_reasoning() {
        let msg = ChatMessage::ai("መልስ", Some("ምክንያታዊነት: ...".to_string()));
        assert_eq!(msg.sender, Sender::Ai);
        assert!(msg.id.starts_with("ai-"));
        assert_eq!(msg.reasoning.as_deref(), Some("ምክንያታዊነት: ..."));
    }

    #[test]
    fn test_message_ai_blank_reasoning_dropped() {
        let msg = ChatMessage::ai("መልስ", Some("   ".to_string()));
        assert!(msg.reasoning.is_none());
    }

    #[test]
    fn test_message_error_flag() {
        let msg = ChatMessage::error("failed");
        assert_eq!(msg.sender, Sender::Ai);
        assert!(msg.is_error);
        assert!(msg.id.starts_with("error-"));
    }

    #[test]
    fn test_message_ids_unique() {
        let a = ChatMessage::user("a", None);
        let b = ChatMessage::user("a", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_json_layout() {
        let msg = ChatMessage::user("hi", Some(png("scan.png")));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "user");
        assert_eq!(value["file"]["type"], "image/png");
        assert_eq!(value["file"]["dataUri"], "data:image/png;base64,iVBORw0KGgo=");
        assert!(value.get("isError").is_none());
        assert!(value.get("reasoning").is_none());
    }

    #[test]
    fn test_message_reads_legacy_record() {
        // Older records carried an `isLoading` flag and nothing else optional
        let json = r#"{"id":"user-1700000000000","text":"hello","sender":"user","timestamp":1700000000000,"isLoading":false}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "user-1700000000000");
        assert_eq!(msg.sender, Sender::User);
        assert!(!msg.is_error);
    }

    #[test]
    fn test_file_placeholder_text() {
        assert_eq!(file_placeholder_text("report.pdf"), "File: report.pdf");
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), r#""ai""#);
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_new() {
        let session = ChatSession::new("New Chat", 1_000);
        assert_eq!(session.title, "New Chat");
        assert_eq!(session.created_at, 1_000);
        assert_eq!(session.timestamp, 1_000);
        assert!(session.messages.is_empty());
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_session_json_uses_camel_case() {
        let session = ChatSession::new("t", 5);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["createdAt"], 5);
        assert_eq!(value["timestamp"], 5);
        assert!(value["messages"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_session_summary() {
        let mut session = ChatSession::new("Chat about Rust", 10);
        session.messages.push(ChatMessage::user("one", None));
        let summary = session.summary();
        assert_eq!(summary.id, session.id);
        assert_eq!(summary.message_count, 1);
        assert_eq!(summary.created_at, 10);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut sessions = vec![
            ChatSession::new("old", 100),
            ChatSession::new("new", 300),
            ChatSession::new("mid", 200),
        ];
        sort_newest_first(&mut sessions);
        let titles: Vec<&str> = sessions.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_day_breaks() {
        const DAY: i64 = 24 * 60 * 60 * 1000;
        // Noon UTC on a fixed day keeps every local zone on one date
        let base = 1_760_875_200_000;
        let mut session = ChatSession::new("t", base);
        for ts in [base, base + 60_000, base + DAY, base + DAY + 1_000, base + 3 * DAY] {
            let mut msg = ChatMessage::user("x", None);
            msg.timestamp = ts;
            session.messages.push(msg);
        }
        assert_eq!(session.day_breaks(), vec![0, 2, 4]);
    }

    #[test]
    fn test_day_breaks_empty() {
        let session = ChatSession::new("t", 1);
        assert!(session.day_breaks().is_empty());
        assert!(session.day_separators().is_empty());
    }

    #[test]
    fn test_day_separators_label_each_day() {
        const DAY: i64 = 24 * 60 * 60 * 1000;
        let base = 1_760_875_200_000;
        let mut session = ChatSession::new("t", base);
        for ts in [base, base + 60_000, base + DAY] {
            let mut msg = ChatMessage::user("x", None);
            msg.timestamp = ts;
            session.messages.push(msg);
        }
        let separators = session.day_separators();
        assert_eq!(separators.len(), 2);
        assert_eq!(separators[0].index, 0);
        assert_eq!(separators[0].label, format_day(base));
        assert_eq!(separators[1].index, 2);
        assert_eq!(separators[1].label, format_day(base + DAY));
        assert_ne!(separators[0].label, separators[1].label);

        let json = serde_json::to_value(&separators[1]).unwrap();
        assert_eq!(json["index"], 2);
        assert!(json["label"].as_str().unwrap().contains("2025"));
    }

    #[test]
    fn test_is_minute_stamp() {
        assert!(is_minute_stamp(&format_minute(1_760_875_200_000)));
        assert!(is_minute_stamp("2025-10-19 14:05"));
        assert!(!is_minute_stamp("2025-10-19"));
        assert!(!is_minute_stamp("ideas about school"));
    }

    // ─── Time Tests ──────────────────────────────────────────

    #[test]
    fn test_is_same_day_zero_never_matches() {
        assert!(!is_same_day(0, 0));
        assert!(!is_same_day(0, now_millis()));
    }

    #[test]
    fn test_format_minute_shape() {
        let formatted = format_minute(now_millis());
        assert_eq!(formatted.len(), "2026-01-01 00:00".len());
        assert_eq!(&formatted[4..5], "-");
    }

    #[test]
    fn test_format_day_names_the_year() {
        let label = format_day(1_760_875_200_000);
        assert!(label.contains("2025"));
        assert!(label.contains("October"));
    }

    // ─── AI Shape Tests ──────────────────────────────────────

    #[test]
    fn test_chat_mode_parse() {
        assert_eq!(ChatMode::parse("medical"), ChatMode::Medical);
        assert_eq!(ChatMode::parse(" Student "), ChatMode::Student);
        assert_eq!(ChatMode::parse("pirate"), ChatMode::General);
        assert_eq!(ChatMode::default(), ChatMode::General);
    }

    #[test]
    fn test_chat_mode_serialization() {
        assert_eq!(serde_json::to_string(&ChatMode::Child).unwrap(), r#""child""#);
        for mode in ChatMode::all() {
            assert_eq!(ChatMode::parse(mode.as_str()), *mode);
        }
    }

    #[test]
    fn test_history_turn_from_user_message_with_file() {
        let msg = ChatMessage::user("ይህን ተመልከት", Some(png("x.png")));
        let turn = HistoryTurn::from_message(&msg);
        assert_eq!(turn.role, HistoryRole::User);
        assert_eq!(turn.parts.len(), 2);
        assert_eq!(turn.parts[0].text.as_deref(), Some("ይህን ተመልከት"));
        let media = turn.parts[1].media.as_ref().unwrap();
        assert_eq!(media.content_type.as_deref(), Some("image/png"));
        assert!(media.url.starts_with("data:image/png"));
        assert_eq!(media.name.as_deref(), Some("x.png"));
    }

    #[test]
    fn test_history_turn_from_ai_message() {
        let msg = ChatMessage::ai("መልስ", None);
        let turn = HistoryTurn::from_message(&msg);
        assert_eq!(turn.role, HistoryRole::Model);
        assert_eq!(turn.parts.len(), 1);
        assert!(turn.parts[0].media.is_none());
    }

    #[test]
    fn test_history_role_serialization() {
        assert_eq!(serde_json::to_string(&HistoryRole::Model).unwrap(), r#""model""#);
    }

    #[test]
    fn test_ai_reply_deserialization() {
        let reply: AiReply =
            serde_json::from_str(r#"{"amharicResponse":"ሰላም","reasoning":"ምክንያታዊነት: x"}"#).unwrap();
        assert_eq!(reply.amharic_response, "ሰላም");
        assert!(reply.reasoning.is_some());

        let reply: AiReply = serde_json::from_str(r#"{"amharicResponse":"ሰላም"}"#).unwrap();
        assert!(reply.reasoning.is_none());
    }

    #[test]
    fn test_analysis_message_drops_payload() {
        let msg = ChatMessage::user("scan", Some(png("scan.png")));
        let projected = AnalysisMessage::from(&msg);
        let file = projected.file.unwrap();
        assert_eq!(file.name, "scan.png");
        assert_eq!(file.size, 8);
        let json = serde_json::to_string(&AnalysisMessage::from(&msg)).unwrap();
        assert!(!json.contains("base64"));
    }

    #[test]
    fn test_format_transcript() {
        let messages = vec![
            AnalysisMessage::from(&ChatMessage::user("ጥያቄ", Some(png("a.png")))),
            AnalysisMessage::from(&ChatMessage::ai("መልስ", None)),
        ];
        assert_eq!(
            format_transcript(&messages),
            "User: ጥያቄ [File Attached: a.png (image/png)]\n---\nAI: መልስ"
        );
    }

    #[test]
    fn test_format_transcript_empty() {
        assert_eq!(format_transcript(&[]), "");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_serialization() {
        let event = ChatEvent::LoadingChanged { loading: true };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("LoadingChanged"));

        let event = ChatEvent::Notice(Notice::error("Error", "boom"));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "Notice");
        assert_eq!(value["level"], "error");
        assert_eq!(value["description"], "boom");
    }

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::info("a", "b").level, NoticeLevel::Info);
        assert_eq!(Notice::error("a", "b").level, NoticeLevel::Error);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ai.provider, AiProvider::Google);
        assert!(config.ai.api_key.is_empty());
        assert!(config.ai.api_base.is_none());
        assert_eq!(config.ai.request_timeout_ms, 60_000);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
        assert_eq!(config.chat.max_title_chars, 30);
    }

    #[test]
    fn test_config_partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"chat":{"max_title_chars":12}}"#).unwrap();
        assert_eq!(config.chat.max_title_chars, 12);
        assert_eq!(config.ai.provider, AiProvider::Google);

        let config: AppConfig =
            serde_json::from_str(r#"{"ai":{"api_key":"k","provider":"DeepSeek"}}"#).unwrap();
        assert_eq!(config.ai.api_key, "k");
        assert_eq!(config.ai.provider, AiProvider::DeepSeek);
        assert_eq!(config.ai.request_timeout_ms, 60_000);
    }

    #[test]
    fn test_provider_base_urls() {
        assert!(AiProvider::Google.default_base_url().ends_with("/openai"));
        assert_eq!(AiProvider::OpenAI.default_base_url(), "https://api.openai.com/v1");
        assert!(AiProvider::Custom.default_base_url().is_empty());
        assert_eq!(AiProvider::all().len(), 4);
        assert_eq!(AiProvider::DeepSeek.label(), "DeepSeek");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(ChatError::Ai("quota".to_string()).to_string(), "AI error: quota");
        assert_eq!(ChatError::Timeout(5000).to_string(), "Timeout after 5000ms");
        assert_eq!(ChatError::Cancelled.to_string(), "Cancelled");
        assert_eq!(
            ChatError::InvalidOperation("empty".to_string()).to_string(),
            "Invalid operation: empty"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
