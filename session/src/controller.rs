//! Session controller: the authentication / guest-mode state machine.
//!
//! ARCHITECTURE
//! ============
//! `Checking -> {Authenticated, Guest}`, `Authenticated -> LoggingOut -> Guest`.
//! The controller reads and writes state only through an injected
//! [`SessionStore`], and reaches the outside world only through the traits in
//! [`SessionServices`].
//!
//! ERROR HANDLING
//! ==============
//! Every external call degrades to guest mode instead of surfacing an error.
//! Only the explicit form actions (`sign_in`, `sign_up`, `reset_password`)
//! return errors, so the form can tell the user what went wrong.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::rc::Rc;
use std::time::Duration;

use futures::future::{Either, select};

use crate::error::SessionError;
use crate::platform::{Navigator, Timer};
use crate::provider::{AuthEvent, Credentials, IdentityProvider, Registration, UserProfile};
use crate::state::{SessionAction, SessionPhase, SessionState};
use crate::storage::{self, CleanupReport, CookieJar, KeyValueStore};
use crate::store::SessionStore;

pub const DEFAULT_AUTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Route targets and the probe deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub auth_check_timeout: Duration,
    pub landing_path: String,
    pub sign_in_path: String,
    pub guest_dashboard_path: String,
    pub dashboard_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_check_timeout: DEFAULT_AUTH_CHECK_TIMEOUT,
            landing_path: "/".to_owned(),
            sign_in_path: "/login".to_owned(),
            guest_dashboard_path: "/guest".to_owned(),
            dashboard_path: "/dashboard".to_owned(),
        }
    }
}

/// External collaborators of the controller.
#[derive(Clone)]
pub struct SessionServices {
    pub store: Rc<dyn SessionStore>,
    pub identity: Rc<dyn IdentityProvider>,
    pub local_storage: Rc<dyn KeyValueStore>,
    pub session_storage: Rc<dyn KeyValueStore>,
    pub cookies: Rc<dyn CookieJar>,
    pub navigator: Rc<dyn Navigator>,
    pub timer: Rc<dyn Timer>,
}

enum ProbeOutcome {
    User(UserProfile),
    NoUser,
    Failed(SessionError),
}

pub struct SessionController {
    services: SessionServices,
    config: SessionConfig,
}

impl SessionController {
    #[must_use]
    pub fn new(services: SessionServices, config: SessionConfig) -> Self {
        Self { services, config }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.services.store.snapshot()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn dispatch(&self, action: SessionAction) {
        self.services.store.dispatch(action);
    }

    // =========================================================================
    // PROBE
    // =========================================================================

    /// Ask the provider for the current user, bounded by the probe timeout.
    async fn probe(&self) -> ProbeOutcome {
        let lookup = self.services.identity.get_user();
        let deadline = self.services.timer.sleep(self.config.auth_check_timeout);
        match select(lookup, deadline).await {
            Either::Left((Ok(Some(user)), _)) => ProbeOutcome::User(user),
            Either::Left((Ok(None), _)) => ProbeOutcome::NoUser,
            Either::Left((Err(e), _)) => ProbeOutcome::Failed(e),
            Either::Right(((), _)) => ProbeOutcome::Failed(SessionError::Timeout(self.config.auth_check_timeout)),
        }
    }

    /// Provider sign-out under the same deadline as the probe. Failure and
    /// timeout are logged only.
    async fn sign_out_bounded(&self, during: &str) {
        let sign_out = self.services.identity.sign_out();
        let deadline = self.services.timer.sleep(self.config.auth_check_timeout);
        match select(sign_out, deadline).await {
            Either::Left((Ok(()), _)) => {}
            Either::Left((Err(e), _)) => log::warn!("provider sign-out failed during {during}: {e}"),
            Either::Right(((), _)) => log::warn!(
                "provider sign-out timed out after {:?} during {during}",
                self.config.auth_check_timeout
            ),
        }
    }

    fn settle(&self, outcome: ProbeOutcome) -> SessionPhase {
        match outcome {
            ProbeOutcome::User(user) => {
                log::info!("session established for {}", user.id);
                self.dispatch(SessionAction::SignedIn(user));
            }
            ProbeOutcome::NoUser => {
                log::info!("no active session; continuing as guest");
                self.dispatch(SessionAction::FellBackToGuest);
            }
            ProbeOutcome::Failed(e) => {
                log::warn!("auth check failed, continuing as guest: {e}");
                self.dispatch(SessionAction::FellBackToGuest);
            }
        }
        self.state().phase()
    }

    /// Mount-time probe. Resolves to authenticated or guest, never to an error.
    ///
    /// A pending force-guest flag skips the provider call and is consumed.
    pub async fn check_auth_status(&self) -> SessionPhase {
        self.dispatch(SessionAction::ProbeStarted);
        if storage::take_force_guest(self.services.session_storage.as_ref()) {
            log::info!("force-guest flag set; skipping auth check");
            self.dispatch(SessionAction::FellBackToGuest);
            return self.state().phase();
        }
        let outcome = self.probe().await;
        self.settle(outcome)
    }

    /// Re-read the current user. Anything but a user degrades to guest.
    pub async fn refresh_user(&self) -> Option<UserProfile> {
        let outcome = self.probe().await;
        self.settle(outcome);
        self.state().user
    }

    // =========================================================================
    // MODE CHANGES
    // =========================================================================

    /// Send the user to the sign-in page.
    pub fn login(&self) {
        self.services.navigator.navigate(&self.config.sign_in_path);
    }

    /// Tear down the session as thoroughly as the browser allows.
    ///
    /// State drops to guest first; provider sign-out, storage and cookie
    /// clearing are best effort. Ends with a full reload of the landing page.
    pub async fn logout(&self) -> CleanupReport {
        self.dispatch(SessionAction::LogoutStarted);

        self.sign_out_bounded("logout").await;

        let report = storage::clear_all(
            self.services.local_storage.as_ref(),
            self.services.session_storage.as_ref(),
            self.services.cookies.as_ref(),
        );
        log::info!("logout cleared {} items, {} failed", report.cleared(), report.failures().count());

        if let Err(e) = storage::set_force_guest(self.services.session_storage.as_ref()) {
            log::warn!("could not set force-guest flag: {e}");
        }

        self.dispatch(SessionAction::LogoutFinished);
        self.services.navigator.hard_navigate(&self.config.landing_path);
        report
    }

    /// Leave any real session and browse read-only.
    pub async fn switch_to_guest_mode(&self) {
        if self.state().is_authenticated {
            self.sign_out_bounded("guest switch").await;
        }
        if let Err(e) = storage::set_force_guest(self.services.session_storage.as_ref()) {
            log::warn!("could not set force-guest flag: {e}");
        }
        self.dispatch(SessionAction::GuestModeEntered);
        self.services.navigator.navigate(&self.config.guest_dashboard_path);
    }

    /// `true` enters guest mode locally. `false` re-runs the auth probe, which
    /// is the only way out of guest mode that keeps the invariant.
    pub async fn set_guest_mode(&self, enabled: bool) -> SessionPhase {
        if enabled {
            self.dispatch(SessionAction::GuestModeEntered);
            return self.state().phase();
        }
        self.dispatch(SessionAction::ProbeStarted);
        let outcome = self.probe().await;
        self.settle(outcome)
    }

    /// Re-check a settled signed-in session, e.g. when the tab becomes
    /// visible again, and apply the answer as an auth event. A failed check
    /// keeps the session. Guest mode is only left through sign-in or
    /// [`Self::set_guest_mode`], so it is not re-checked here.
    pub async fn resync(&self) -> SessionPhase {
        let phase = self.state().phase();
        if phase != SessionPhase::Authenticated {
            return phase;
        }
        match self.probe().await {
            ProbeOutcome::User(user) => self.handle_auth_event(AuthEvent::SignedIn(user)),
            ProbeOutcome::NoUser => {
                log::info!("provider session ended elsewhere; continuing as guest");
                self.handle_auth_event(AuthEvent::SignedOut);
            }
            ProbeOutcome::Failed(e) => log::warn!("session resync failed, keeping current session: {e}"),
        }
        self.state().phase()
    }

    /// Apply a provider auth-state-change notification.
    pub fn handle_auth_event(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(user) => self.dispatch(SessionAction::SignedIn(user)),
            AuthEvent::SignedOut => self.dispatch(SessionAction::FellBackToGuest),
        }
    }

    // =========================================================================
    // FORM ACTIONS
    // =========================================================================

    /// Email/password sign-in. On success the session is authenticated and
    /// the user lands on the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidInput`] for blank fields, or the
    /// provider's error. State is unchanged on failure.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile, SessionError> {
        require(&credentials.email, "email")?;
        require(&credentials.password, "password")?;
        let user = self.services.identity.sign_in(credentials).await.inspect_err(|e| {
            log::warn!("sign-in failed: {e}");
        })?;
        self.enter_session(user.clone());
        Ok(user)
    }

    /// Create an account, then behave like a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidInput`] for blank fields, or the
    /// provider's error. State is unchanged on failure.
    pub async fn sign_up(&self, registration: &Registration) -> Result<UserProfile, SessionError> {
        require(&registration.email, "email")?;
        require(&registration.password, "password")?;
        require(&registration.full_name, "full name")?;
        let user = self.services.identity.sign_up(registration).await.inspect_err(|e| {
            log::warn!("sign-up failed: {e}");
        })?;
        self.enter_session(user.clone());
        Ok(user)
    }

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidInput`] for a blank email, or the
    /// provider's error.
    pub async fn reset_password(&self, email: &str) -> Result<(), SessionError> {
        require(email, "email")?;
        self.services.identity.reset_password(email.trim()).await
    }

    fn enter_session(&self, user: UserProfile) {
        // A leftover flag from an earlier guest switch would hide this session on reload.
        storage::take_force_guest(self.services.session_storage.as_ref());
        self.dispatch(SessionAction::SignedIn(user));
        self.services.navigator.navigate(&self.config.dashboard_path);
    }
}

fn require(value: &str, field: &str) -> Result<(), SessionError> {
    if value.trim().is_empty() {
        return Err(SessionError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
