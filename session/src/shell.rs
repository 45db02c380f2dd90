//! Route shell selection.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page is wrapped by exactly one layout shell. Which one is a
//! pure function of the session flags and whether the page is public:
//! logging-out > checking-auth > public-page > guest-mode > authenticated >
//! fallback.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use crate::state::SessionState;

/// Presentational shell wrapped around page content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Loading,
    Logout,
    Public,
    Guest,
    Authenticated,
    Fallback,
}

/// Inputs to [`select_shell`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShellInputs {
    pub is_public_page: bool,
    pub is_guest_mode: bool,
    pub is_authenticated: bool,
    pub is_checking_auth: bool,
    pub is_logging_out: bool,
}

impl ShellInputs {
    #[must_use]
    pub fn new(state: &SessionState, page: Page) -> Self {
        Self {
            is_public_page: page.is_public(),
            is_guest_mode: state.is_guest_mode,
            is_authenticated: state.is_authenticated,
            is_checking_auth: state.is_checking_auth,
            is_logging_out: state.is_logging_out,
        }
    }
}

#[must_use]
pub fn select_shell(inputs: ShellInputs) -> Shell {
    if inputs.is_logging_out {
        Shell::Logout
    } else if inputs.is_checking_auth {
        Shell::Loading
    } else if inputs.is_public_page {
        Shell::Public
    } else if inputs.is_guest_mode {
        Shell::Guest
    } else if inputs.is_authenticated {
        Shell::Authenticated
    } else {
        Shell::Fallback
    }
}

// =============================================================================
// PAGES
// =============================================================================

/// Routed pages of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    About,
    Pricing,
    Contact,
    Login,
    GuestDashboard,
    Dashboard,
    Employees,
    LeaveRequests,
    Policies,
    Training,
    Assistant,
}

impl Page {
    pub const ALL: [Page; 12] = [
        Page::Landing,
        Page::About,
        Page::Pricing,
        Page::Contact,
        Page::Login,
        Page::GuestDashboard,
        Page::Dashboard,
        Page::Employees,
        Page::LeaveRequests,
        Page::Policies,
        Page::Training,
        Page::Assistant,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Landing => "Landing",
            Self::About => "About",
            Self::Pricing => "Pricing",
            Self::Contact => "Contact",
            Self::Login => "Login",
            Self::GuestDashboard => "GuestDashboard",
            Self::Dashboard => "Dashboard",
            Self::Employees => "Employees",
            Self::LeaveRequests => "LeaveRequests",
            Self::Policies => "Policies",
            Self::Training => "Training",
            Self::Assistant => "Assistant",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::About => "/about",
            Self::Pricing => "/pricing",
            Self::Contact => "/contact",
            Self::Login => "/login",
            Self::GuestDashboard => "/guest",
            Self::Dashboard => "/dashboard",
            Self::Employees => "/employees",
            Self::LeaveRequests => "/leave",
            Self::Policies => "/policies",
            Self::Training => "/training",
            Self::Assistant => "/assistant",
        }
    }

    /// Marketing and sign-in pages render in the public shell for everyone.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Landing | Self::About | Self::Pricing | Self::Contact | Self::Login)
    }

    /// Match a request path, ignoring a trailing slash and query string.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|page| page.path() == normalized)
    }
}
