//! Injectable session store.
//!
//! The controller never owns session state directly; it reads snapshots and
//! dispatches [`SessionAction`]s through [`SessionStore`]. The browser client
//! backs this with a reactive signal, tests and SSR use
//! [`MemorySessionStore`].

use std::cell::RefCell;

use crate::state::{SessionAction, SessionState, reduce};

/// Holder of the current [`SessionState`].
pub trait SessionStore {
    /// Copy of the current state.
    fn snapshot(&self) -> SessionState;

    /// Apply `action` through [`reduce`].
    fn dispatch(&self, action: SessionAction);
}

/// Single-threaded in-memory store that also records every state it passed
/// through.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: RefCell<SessionState>,
    history: RefCell<Vec<SessionState>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(initial: SessionState) -> Self {
        Self { state: RefCell::new(initial), history: RefCell::new(Vec::new()) }
    }

    /// States produced by each dispatched action, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<SessionState> {
        self.history.borrow().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: SessionAction) {
        let next = reduce(&self.state.borrow(), action);
        self.history.borrow_mut().push(next.clone());
        *self.state.borrow_mut() = next;
    }
}
