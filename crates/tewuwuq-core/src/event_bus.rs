//! Event bus between the session manager and the host page.
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Events are buffered and drained by the host after each call.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tewuwuq_types::event::{ChatEvent, Notice};

/// Shared event bus: clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Publish an event.
    pub fn emit(&self, event: ChatEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Shorthand for publishing a toast.
    pub fn notify(&self, notice: Notice) {
        self.emit(ChatEvent::Notice(notice));
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
