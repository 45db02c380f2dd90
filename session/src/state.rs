//! Session state and its reducer.
//!
//! DESIGN
//! ======
//! `SessionState` is a plain value. All transitions go through [`reduce`], so
//! the guest-by-default invariant can be checked on every action without a
//! browser: once `is_checking_auth` is false, exactly one of
//! `is_authenticated` / `is_guest_mode` holds.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};

use crate::provider::UserProfile;

/// Client-side authentication state for the current tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_authenticated: bool,
    /// Read-only copy of the provider's profile; present iff authenticated.
    pub user: Option<UserProfile>,
    pub is_guest_mode: bool,
    pub is_checking_auth: bool,
    pub is_logging_out: bool,
}

/// Coarse phase derived from the state flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Checking,
    Authenticated,
    Guest,
    LoggingOut,
}

/// Transitions accepted by [`reduce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// The auth probe has started.
    ProbeStarted,
    /// A user session was established or refreshed.
    SignedIn(UserProfile),
    /// The probe found no usable session.
    FellBackToGuest,
    /// Logout began; state drops to guest while cleanup runs.
    LogoutStarted,
    /// Logout side effects are done.
    LogoutFinished,
    /// The user explicitly chose guest browsing.
    GuestModeEntered,
}

impl SessionState {
    /// State at application mount, before the probe resolves.
    #[must_use]
    pub fn checking() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_guest_mode: false,
            is_checking_auth: true,
            is_logging_out: false,
        }
    }

    /// Settled read-only browsing state.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_guest_mode: true,
            is_checking_auth: false,
            is_logging_out: false,
        }
    }

    /// Settled signed-in state.
    #[must_use]
    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            is_guest_mode: false,
            is_checking_auth: false,
            is_logging_out: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_logging_out {
            SessionPhase::LoggingOut
        } else if self.is_checking_auth {
            SessionPhase::Checking
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Guest
        }
    }

    /// Whether the flags satisfy the session invariant.
    ///
    /// Authenticated and guest never hold together, a user is present exactly
    /// when authenticated, and outside of a probe one of the two modes holds.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.is_authenticated && self.is_guest_mode {
            return false;
        }
        if self.is_authenticated != self.user.is_some() {
            return false;
        }
        self.is_checking_auth || self.is_authenticated || self.is_guest_mode
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::checking()
    }
}

/// Apply `action` to `state`, returning the next state.
#[must_use]
pub fn reduce(state: &SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::ProbeStarted => SessionState { is_checking_auth: true, ..state.clone() },
        SessionAction::SignedIn(_) if state.is_logging_out => state.clone(),
        SessionAction::SignedIn(user) => SessionState::authenticated(user),
        SessionAction::FellBackToGuest | SessionAction::GuestModeEntered | SessionAction::LogoutFinished => {
            SessionState::guest()
        }
        SessionAction::LogoutStarted => SessionState { is_logging_out: true, ..SessionState::guest() },
    }
}
