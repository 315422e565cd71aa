//! `ChatApp`: the object the host page talks to.
//!
//! Async operations return Promises; structured values cross the boundary
//! as JSON-shaped `JsValue`s.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use tewuwuq_core::event_bus::EventBus;
use tewuwuq_core::ports::{AiPort, StoragePort};
use tewuwuq_core::{SendOutcome, SessionManager};
use tewuwuq_platform::ai::create_provider;
use tewuwuq_platform::storage::{auto_detect_storage, open_storage};
use tewuwuq_types::ai::ChatMode;
use tewuwuq_types::config::{AppConfig, StorageBackendType};
use tewuwuq_types::message::ChatMessageFile;
use tewuwuq_types::ChatError;

const CONFIG_STORAGE_KEY: &str = "tewuwuqConfig";

struct AppInner {
    manager: SessionManager,
    /// Where the config lives; always the detected backend
    config_storage: Rc<dyn StoragePort>,
    config: RefCell<AppConfig>,
    ai: RefCell<Rc<dyn AiPort>>,
}

#[wasm_bindgen]
pub struct ChatApp {
    inner: Rc<AppInner>,
}

#[wasm_bindgen]
impl ChatApp {
    /// Restore config, open storage, load sessions.
    pub async fn create() -> Result<ChatApp, JsValue> {
        let config_storage = auto_detect_storage();
        let config = restore_config(config_storage.as_ref()).await;

        let session_storage = match config.storage.backend {
            StorageBackendType::Memory => open_storage(&config.storage.backend),
            _ => config_storage.clone(),
        };
        let ai = create_provider(&config.ai).map_err(to_js)?;

        let manager = SessionManager::new(session_storage, EventBus::new(), &config.chat);
        manager.initialize().await;
        log::info!(
            "Tewuwuq ready ({} sessions, AI via {})",
            manager.sessions().len(),
            ai.provider_name()
        );

        Ok(ChatApp {
            inner: Rc::new(AppInner {
                manager,
                config_storage,
                config: RefCell::new(config),
                ai: RefCell::new(ai),
            }),
        })
    }

    /// Session list (newest first) without message bodies
    pub fn sessions(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.manager.summaries())
    }

    /// The active session with its messages, or `null`
    #[wasm_bindgen(js_name = activeSession)]
    pub fn active_session(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.manager.active_session())
    }

    /// Date separators for the active session as `[{ index, label }]`,
    /// where `label` names the day starting at message `index`
    #[wasm_bindgen(js_name = dayBreaks)]
    pub fn day_breaks(&self) -> Result<JsValue, JsValue> {
        let separators = self
            .inner
            .manager
            .active_session()
            .map(|s| s.day_separators())
            .unwrap_or_default();
        to_value(&separators)
    }

    #[wasm_bindgen(js_name = newSession)]
    pub fn new_session(&self) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let id = inner.manager.start_new_session().await;
            Ok(JsValue::from_str(&id))
        })
    }

    #[wasm_bindgen(js_name = selectSession)]
    pub fn select_session(&self, id: String) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let selected = inner.manager.select_session(&id).await;
            Ok(JsValue::from_str(&selected))
        })
    }

    #[wasm_bindgen(js_name = deleteSession)]
    pub fn delete_session(&self, id: String) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let deleted = inner.manager.delete_session(&id).await;
            Ok(JsValue::from_bool(deleted))
        })
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&self) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let cleared = inner.manager.clear_active_session_history().await;
            Ok(JsValue::from_bool(cleared))
        })
    }

    #[wasm_bindgen(js_name = renameSession)]
    pub fn rename_session(&self, id: String, title: String) -> bool {
        self.inner.manager.rename_session(&id, &title)
    }

    /// Send a message in `mode` (`general`, `medical`, `child`, `student`).
    /// `file` is `{ name, type, dataUri, size }` or null. Resolves to one of
    /// `rejected`, `replied`, `failed`, `cancelled`.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: String, mode: String, file: JsValue) -> Promise {
        let inner = self.inner.clone();
        let ai = self.inner.ai.borrow().clone();
        future_to_promise(async move {
            let file = parse_file(file)?;
            let outcome = inner
                .manager
                .send_message(ai.as_ref(), &text, ChatMode::parse(&mode), file)
                .await;
            Ok(JsValue::from_str(outcome_label(outcome)))
        })
    }

    /// Resolves to the Markdown report, or `null` when nothing was produced.
    pub fn analyze(&self, session_id: Option<String>) -> Promise {
        let inner = self.inner.clone();
        let ai = self.inner.ai.borrow().clone();
        future_to_promise(async move {
            let report = inner.manager.analyze(ai.as_ref(), session_id.as_deref()).await;
            to_value(&report)
        })
    }

    pub fn summarize(&self, session_id: Option<String>) -> Promise {
        let inner = self.inner.clone();
        let ai = self.inner.ai.borrow().clone();
        future_to_promise(async move {
            let summary = inner.manager.summarize(ai.as_ref(), session_id.as_deref()).await;
            to_value(&summary)
        })
    }

    /// Take all pending events (see `ChatEvent`) as an array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.manager.event_bus().drain())
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.inner.manager.is_loading()
    }

    #[wasm_bindgen(js_name = isAnalyzing)]
    pub fn is_analyzing(&self) -> bool {
        self.inner.manager.is_analyzing()
    }

    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_value(&*self.inner.config.borrow())
    }

    /// Replace the configuration and rebuild the AI adapter.
    /// Storage and chat settings take effect on the next start.
    pub fn configure(&self, config: JsValue) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let config: AppConfig = config
                .into_serde()
                .map_err(|e| to_js(ChatError::Config(e.to_string())))?;
            let ai = create_provider(&config.ai).map_err(to_js)?;

            *inner.ai.borrow_mut() = ai;
            *inner.config.borrow_mut() = config.clone();
            save_config(inner.config_storage.as_ref(), &config).await;
            Ok(JsValue::UNDEFINED)
        })
    }
}

async fn restore_config(storage: &dyn StoragePort) -> AppConfig {
    match storage.get(CONFIG_STORAGE_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<AppConfig>(&raw) {
            Ok(config) => {
                log::info!("Config restored from storage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed config: {}", e);
                AppConfig::default()
            }
        },
        Ok(None) => AppConfig::default(),
        Err(e) => {
            log::warn!("Failed to read config: {}", e);
            AppConfig::default()
        }
    }
}

async fn save_config(storage: &dyn StoragePort, config: &AppConfig) {
    let result = match serde_json::to_string(config) {
        Ok(json) => storage.set(CONFIG_STORAGE_KEY, &json).await,
        Err(e) => Err(e.into()),
    };
    match result {
        Ok(()) => log::info!("Config saved to storage"),
        Err(e) => log::error!("Failed to save config: {}", e),
    }
}

fn parse_file(file: JsValue) -> Result<Option<ChatMessageFile>, JsValue> {
    if file.is_null() || file.is_undefined() {
        return Ok(None);
    }
    file.into_serde()
        .map(Some)
        .map_err(|e| to_js(ChatError::JsInterop(format!("Invalid file: {}", e))))
}

fn outcome_label(outcome: SendOutcome) -> &'static str {
    match outcome {
        SendOutcome::Rejected => "rejected",
        SendOutcome::Replied => "replied",
        SendOutcome::Failed(_) => "failed",
        SendOutcome::Cancelled => "cancelled",
    }
}

fn to_value<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(|e| to_js(ChatError::from(e)))
}

fn to_js(e: ChatError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
