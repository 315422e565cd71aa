//! Session manager: in-memory session list kept in sync with the store.
//!
//! State lives in a `RefCell` that is only borrowed between awaits, never
//! across one. Every mutation re-sorts the list newest-first and then
//! persists the resulting snapshot, so overlapping async operations each
//! write the latest state rather than a stale copy.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{AbortHandle, AbortRegistration};
use tewuwuq_types::{
    config::ChatConfig,
    event::{ChatEvent, Notice},
    message::ChatMessage,
    session::{sort_newest_first, ChatSession, SessionSummary},
    time::now_millis,
};

use crate::event_bus::EventBus;
use crate::ports::StoragePort;
use crate::store::SessionStore;
use crate::title::{derive_title, placeholder_title};

#[derive(Default)]
struct ChatState {
    sessions: Vec<ChatSession>,
    active_session_id: Option<String>,
    /// Pending AI exchanges, keyed by session id
    in_flight: HashMap<String, AbortHandle>,
    analyzing: bool,
}

pub struct SessionManager {
    store: SessionStore,
    state: RefCell<ChatState>,
    pub(crate) event_bus: EventBus,
    pub(crate) max_title_chars: usize,
}

impl SessionManager {
    pub fn new(storage: Rc<dyn StoragePort>, event_bus: EventBus, config: &ChatConfig) -> Self {
        Self {
            store: SessionStore::new(storage),
            state: RefCell::new(ChatState::default()),
            event_bus,
            max_title_chars: config.max_title_chars,
        }
    }

    /// Load persisted state, migrating legacy history and repairing a
    /// dangling active pointer.
    pub async fn initialize(&self) {
        let mut sessions = self.store.load().await;
        let mut active_id = self.store.load_active_id().await;
        let mut migrated = false;

        if sessions.is_empty() {
            let legacy = self.store.load_legacy().await;
            if !legacy.is_empty() {
                let session = self.session_from_legacy(legacy);
                log::info!(
                    "Migrated {} legacy messages into session {}",
                    session.messages.len(),
                    session.id
                );
                active_id = Some(session.id.clone());
                sessions.push(session);
                migrated = true;
            }
        }

        sort_newest_first(&mut sessions);
        let resolved = resolve_active(&sessions, active_id.as_deref());
        let healed = resolved != active_id;
        if healed {
            log::info!("Active session {:?} not found, using {:?}", active_id, resolved);
        }

        {
            let mut state = self.state.borrow_mut();
            state.sessions = sessions;
            state.active_session_id = resolved.clone();
        }

        if migrated {
            self.persist_sessions().await;
        }
        if migrated || healed {
            self.persist_active().await;
        }
        if migrated {
            if let Err(e) = self.store.clear_legacy().await {
                log::error!("Failed to remove legacy history: {}", e);
            }
        }

        log::info!(
            "Loaded {} sessions from {}",
            self.state.borrow().sessions.len(),
            self.store.backend_name()
        );
        self.event_bus.emit(ChatEvent::SessionsChanged);
        self.event_bus.emit(ChatEvent::ActiveSessionChanged { session_id: resolved });
    }

    fn session_from_legacy(&self, messages: Vec<ChatMessage>) -> ChatSession {
        let now = now_millis();
        let first_ts = messages.first().map(|m| m.timestamp).unwrap_or(now);
        let last_ts = messages.last().map(|m| m.timestamp).unwrap_or(now);
        let title = messages
            .first()
            .map(|m| derive_title(&m.text, m.file.as_ref(), self.max_title_chars, first_ts))
            .unwrap_or_else(|| placeholder_title(now));

        let mut session = ChatSession::new(title, first_ts);
        session.timestamp = last_ts;
        session.messages = messages;
        session
    }

    // ─── Operations ──────────────────────────────────────────

    /// Create an empty session, make it active and return its id.
    pub async fn start_new_session(&self) -> String {
        let now = now_millis();
        let session = ChatSession::new(placeholder_title(now), now);
        let id = session.id.clone();

        self.update_sessions(|sessions| sessions.insert(0, session));
        self.persist_sessions().await;
        self.set_active(Some(id.clone())).await;

        log::info!("Started session {}", id);
        id
    }

    /// Activate `id`, or the newest session if it does not exist, or a
    /// brand-new session if there are none. Returns the activated id.
    pub async fn select_session(&self, id: &str) -> String {
        let target = {
            let state = self.state.borrow();
            resolve_active(&state.sessions, Some(id))
        };
        match target {
            Some(target) => {
                if target != id {
                    log::warn!("Session {} not found, selecting {}", id, target);
                }
                self.set_active(Some(target.clone())).await;
                target
            }
            None => self.start_new_session().await,
        }
    }

    /// Remove a session, aborting any exchange still running for it.
    /// Returns false if no such session existed.
    pub async fn delete_session(&self, id: &str) -> bool {
        let (removed, next_active) = {
            let mut state = self.state.borrow_mut();
            let before = state.sessions.len();
            state.sessions.retain(|s| s.id != id);
            let removed = state.sessions.len() != before;

            if let Some(handle) = state.in_flight.get(id) {
                handle.abort();
            }

            let next_active = if state.active_session_id.as_deref() == Some(id) {
                Some(state.sessions.first().map(|s| s.id.clone()))
            } else {
                None
            };
            (removed, next_active)
        };

        if !removed {
            log::debug!("Delete ignored, no session {}", id);
            return false;
        }

        self.persist_sessions().await;
        if let Some(next) = next_active {
            self.set_active(next).await;
        }

        log::info!("Deleted session {}", id);
        self.event_bus.notify(Notice::info(
            "Chat Deleted",
            "The chat session and its messages have been removed.",
        ));
        true
    }

    /// Empty the active session's messages, keeping the session itself.
    pub async fn clear_active_session_history(&self) -> bool {
        let Some(active) = self.active_session_id() else {
            self.event_bus.notify(Notice::error("No Active Chat", "Select a chat first."));
            return false;
        };

        if let Some(handle) = self.state.borrow().in_flight.get(&active) {
            handle.abort();
        }

        let now = now_millis();
        let cleared = self
            .with_session_mut(&active, |session| {
                session.messages.clear();
                session.timestamp = now;
            })
            .is_some();
        if !cleared {
            return false;
        }

        self.persist_sessions().await;
        self.event_bus.notify(Notice::info(
            "Chat History Cleared",
            "Your conversation history has been removed.",
        ));
        true
    }

    /// Accepts a new title but does not store it yet.
    pub fn rename_session(&self, id: &str, new_title: &str) -> bool {
        let title = new_title.trim();
        if title.is_empty() {
            return false;
        }
        log::warn!(
            "Rename is not wired to storage yet (session {}, title {:?})",
            id,
            title
        );
        true
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn sessions(&self) -> Vec<ChatSession> {
        self.state.borrow().sessions.clone()
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.state.borrow().sessions.iter().map(ChatSession::summary).collect()
    }

    pub fn session(&self, id: &str) -> Option<ChatSession> {
        self.state.borrow().sessions.iter().find(|s| s.id == id).cloned()
    }

    pub fn has_session(&self, id: &str) -> bool {
        self.state.borrow().sessions.iter().any(|s| s.id == id)
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.state.borrow().active_session_id.clone()
    }

    pub fn active_session(&self) -> Option<ChatSession> {
        let id = self.active_session_id()?;
        self.session(&id)
    }

    /// True while any AI exchange is in flight
    pub fn is_loading(&self) -> bool {
        !self.state.borrow().in_flight.is_empty()
    }

    pub fn is_session_busy(&self, id: &str) -> bool {
        self.state.borrow().in_flight.contains_key(id)
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.borrow().analyzing
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // ─── Internal helpers ────────────────────────────────────

    fn update_sessions<R>(&self, f: impl FnOnce(&mut Vec<ChatSession>) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let result = f(&mut state.sessions);
        sort_newest_first(&mut state.sessions);
        result
    }

    /// Apply `f` to the session with `id` as it exists now.
    pub(crate) fn with_session_mut<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ChatSession) -> R,
    ) -> Option<R> {
        self.update_sessions(|sessions| sessions.iter_mut().find(|s| s.id == id).map(f))
    }

    pub(crate) async fn persist_sessions(&self) {
        let snapshot = self.state.borrow().sessions.clone();
        if let Err(e) = self.store.save(&snapshot).await {
            log::error!("Failed to persist sessions: {}", e);
        }
        self.event_bus.emit(ChatEvent::SessionsChanged);
    }

    async fn persist_active(&self) {
        let active = self.active_session_id();
        if let Err(e) = self.store.save_active_id(active.as_deref()).await {
            log::error!("Failed to persist active session: {}", e);
        }
    }

    async fn set_active(&self, id: Option<String>) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.active_session_id != id;
            state.active_session_id = id.clone();
            changed
        };
        self.persist_active().await;
        if changed {
            self.event_bus.emit(ChatEvent::ActiveSessionChanged { session_id: id });
        }
    }

    /// Register an exchange for `session_id`; flips the loading flag on
    /// the first one.
    pub(crate) fn begin_exchange(&self, session_id: &str) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        let was_idle = {
            let mut state = self.state.borrow_mut();
            let was_idle = state.in_flight.is_empty();
            state.in_flight.insert(session_id.to_string(), handle);
            was_idle
        };
        if was_idle {
            self.event_bus.emit(ChatEvent::LoadingChanged { loading: true });
        }
        registration
    }

    pub(crate) fn end_exchange(&self, session_id: &str) {
        let now_idle = {
            let mut state = self.state.borrow_mut();
            state.in_flight.remove(session_id);
            state.in_flight.is_empty()
        };
        if now_idle {
            self.event_bus.emit(ChatEvent::LoadingChanged { loading: false });
        }
    }

    /// Returns false when an analysis is already running.
    pub(crate) fn begin_analysis(&self) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.analyzing {
                return false;
            }
            state.analyzing = true;
        }
        self.event_bus.emit(ChatEvent::AnalyzingChanged { analyzing: true });
        true
    }

    pub(crate) fn end_analysis(&self) {
        self.state.borrow_mut().analyzing = false;
        self.event_bus.emit(ChatEvent::AnalyzingChanged { analyzing: false });
    }
}

/// `wanted` if it names a session, otherwise the newest session.
fn resolve_active(sessions: &[ChatSession], wanted: Option<&str>) -> Option<String> {
    wanted
        .filter(|id| sessions.iter().any(|s| s.id == *id))
        .map(str::to_string)
        .or_else(|| sessions.first().map(|s| s.id.clone()))
}
