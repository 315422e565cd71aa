//! WASM-target tests for the JavaScript surface.
//!
//! No AI calls are made here; only session bookkeeping is exercised.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use tewuwuq_app::ChatApp;

#[wasm_bindgen_test]
async fn new_session_becomes_active() {
    let app = ChatApp::create().await.unwrap();
    let id = JsFuture::from(app.new_session()).await.unwrap();
    let id = id.as_string().unwrap();

    let active = app.active_session().unwrap();
    let active_id = js_sys::Reflect::get(&active, &JsValue::from_str("id")).unwrap();
    assert_eq!(active_id.as_string(), Some(id.clone()));

    let deleted = JsFuture::from(app.delete_session(id)).await.unwrap();
    assert_eq!(deleted.as_bool(), Some(true));
}

#[wasm_bindgen_test]
async fn empty_message_is_rejected() {
    let app = ChatApp::create().await.unwrap();
    let outcome = JsFuture::from(app.send_message("  ".to_string(), "general".to_string(), JsValue::NULL))
        .await
        .unwrap();
    assert_eq!(outcome.as_string().as_deref(), Some("rejected"));
    assert!(!app.is_loading());
}

#[wasm_bindgen_test]
async fn events_drain_as_array() {
    let app = ChatApp::create().await.unwrap();
    let events = app.drain_events().unwrap();
    assert!(js_sys::Array::is_array(&events));
    let again = js_sys::Array::from(&app.drain_events().unwrap());
    assert_eq!(again.length(), 0);
}

#[wasm_bindgen_test]
async fn day_breaks_is_an_array() {
    let app = ChatApp::create().await.unwrap();
    let id = JsFuture::from(app.new_session()).await.unwrap();
    let separators = app.day_breaks().unwrap();
    assert!(js_sys::Array::is_array(&separators));
    assert_eq!(js_sys::Array::from(&separators).length(), 0);
    JsFuture::from(app.delete_session(id.as_string().unwrap())).await.unwrap();
}
