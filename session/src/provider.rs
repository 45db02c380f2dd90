//! Identity provider surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosted backend owns user records and sessions. The client only holds a
//! read-only copy of the signed-in profile and reaches the provider through
//! [`IdentityProvider`]; the browser implementation lives in the `client`
//! crate, tests use in-memory mocks.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::role::Role;

/// Profile of the signed-in user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-assigned user identifier.
    pub id: String,
    /// Login email address.
    pub email: String,
    /// Display name, if the user has set one.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Raw role string stored on the user record (e.g. `"HR Manager"`).
    #[serde(default)]
    pub role: Option<String>,
    /// Employer (tenant) the user belongs to.
    #[serde(default)]
    pub company_id: Option<String>,
}

impl UserProfile {
    /// Name to show in navigation chrome; falls back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }

    /// Parsed role, or `None` when the role is missing or not recognized.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Email/password sign-in form payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Employer name entered at sign-up; the backend resolves or creates the tenant.
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Auth-state-change notification delivered by the provider subscription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(UserProfile),
    SignedOut,
}

/// Operations the hosted identity provider exposes to the client.
///
/// Futures are `?Send`: the browser implementation awaits `fetch` promises,
/// which are bound to the main thread.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Current user, `Ok(None)` when there is no session.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be reached or answers with an
    /// unexpected status.
    async fn get_user(&self) -> Result<Option<UserProfile>, SessionError>;

    /// Start a session with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Rejected`] for bad credentials and
    /// [`SessionError::Provider`] for transport failures.
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile, SessionError>;

    /// Create an account and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider refuses the registration.
    async fn sign_up(&self, registration: &Registration) -> Result<UserProfile, SessionError>;

    /// End the current session on the provider side.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    async fn sign_out(&self) -> Result<(), SessionError>;

    /// Ask the provider to send a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    async fn reset_password(&self, email: &str) -> Result<(), SessionError>;
}
