//! Session state as a Leptos signal.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SignalStore` is the browser's [`SessionStore`]: the controller dispatches
//! actions into it and every shell and page re-renders from the same signal.
//! Route changes the controller asks for are parked in [`PendingNavigation`]
//! and applied by a component inside the router, which is the only place
//! `use_navigate` is valid.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use session::{SessionAction, SessionState, SessionStore, reduce};

/// [`SessionStore`] backed by an `RwSignal`.
#[derive(Clone, Copy, Debug)]
pub struct SignalStore {
    state: RwSignal<SessionState>,
}

impl SignalStore {
    #[must_use]
    pub fn new(state: RwSignal<SessionState>) -> Self {
        Self { state }
    }
}

impl SessionStore for SignalStore {
    fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    fn dispatch(&self, action: SessionAction) {
        self.state.update(|state| *state = reduce(state, action));
    }
}

/// In-app route change requested outside the router's reach.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingNavigation(pub Option<String>);

/// Everything session-related a component needs, provided once by `App`.
#[derive(Clone, Copy, Debug)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
    pub pending: RwSignal<PendingNavigation>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SessionState::checking()),
            pending: RwSignal::new(PendingNavigation::default()),
        }
    }

    #[must_use]
    pub fn store(self) -> SignalStore {
        SignalStore::new(self.state)
    }

    /// Take the pending route, if any, leaving none behind. Does not track;
    /// writes only when a route was pending.
    pub fn take_pending(self) -> Option<String> {
        let path = self.pending.with_untracked(|pending| pending.0.clone())?;
        self.pending.set(PendingNavigation::default());
        Some(path)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The session context provided by `App`.
#[must_use]
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
