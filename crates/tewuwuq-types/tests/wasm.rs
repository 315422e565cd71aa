//! WASM-target tests for tewuwuq-types.
//!
//! Mirrors a subset of the native unit tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`, where clock and UUID sources differ.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use tewuwuq_types::ai::*;
use tewuwuq_types::message::*;
use tewuwuq_types::session::*;
use tewuwuq_types::time::*;

#[wasm_bindgen_test]
fn clock_is_after_epoch() {
    assert!(now_millis() > 1_600_000_000_000);
}

#[wasm_bindgen_test]
fn message_ids_unique() {
    let a = ChatMessage::user("a", None);
    let b = ChatMessage::user("a", None);
    assert_ne!(a.id, b.id);
}

#[wasm_bindgen_test]
fn session_roundtrip() {
    let mut session = ChatSession::new("ውይይት", now_millis());
    session.messages.push(ChatMessage::user("ሰላም", None));
    session.messages.push(ChatMessage::ai("ሰላም ነው", Some("ምክንያታዊነት: x".to_string())));

    let json = serde_json::to_string(&session).unwrap();
    let back: ChatSession = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);
}

#[wasm_bindgen_test]
fn transcript_labels() {
    let messages = vec![
        AnalysisMessage::from(&ChatMessage::user("q", None)),
        AnalysisMessage::from(&ChatMessage::ai("a", None)),
    ];
    assert_eq!(format_transcript(&messages), "User: q\n---\nAI: a");
}

#[wasm_bindgen_test]
fn same_day_for_close_timestamps() {
    let now = now_millis();
    // Skip the check if a minute crosses local midnight
    if format_day(now) == format_day(now + 1_000) {
        assert!(is_same_day(now, now + 1_000));
    }
}
