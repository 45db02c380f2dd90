use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::*;
use crate::storage::{FORCE_GUEST_KEY, MemoryCookieJar, MemoryStore};
use crate::store::MemorySessionStore;

// =========================================================================
// Mocks
// =========================================================================

#[derive(Clone)]
enum Probe {
    User(UserProfile),
    NoUser,
    Fail,
    Hang,
}

struct MockIdentity {
    probe: RefCell<Probe>,
    get_user_calls: Cell<usize>,
    sign_out_calls: Cell<usize>,
    sign_out_fails: Cell<bool>,
    sign_out_hangs: Cell<bool>,
    sign_in_result: RefCell<Result<UserProfile, SessionError>>,
}

impl MockIdentity {
    fn new(probe: Probe) -> Self {
        Self {
            probe: RefCell::new(probe),
            get_user_calls: Cell::new(0),
            sign_out_calls: Cell::new(0),
            sign_out_fails: Cell::new(false),
            sign_out_hangs: Cell::new(false),
            sign_in_result: RefCell::new(Ok(user())),
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MockIdentity {
    async fn get_user(&self) -> Result<Option<UserProfile>, SessionError> {
        self.get_user_calls.set(self.get_user_calls.get() + 1);
        let probe = self.probe.borrow().clone();
        match probe {
            Probe::User(user) => Ok(Some(user)),
            Probe::NoUser => Ok(None),
            Probe::Fail => Err(SessionError::Provider("connection refused".to_owned())),
            Probe::Hang => std::future::pending().await,
        }
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<UserProfile, SessionError> {
        self.sign_in_result.borrow().clone()
    }

    async fn sign_up(&self, registration: &Registration) -> Result<UserProfile, SessionError> {
        Ok(UserProfile { full_name: Some(registration.full_name.clone()), ..user() })
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        if self.sign_out_hangs.get() {
            return std::future::pending().await;
        }
        if self.sign_out_fails.get() {
            return Err(SessionError::Rejected { status: 500, message: "boom".to_owned() });
        }
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> Result<(), SessionError> {
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Nav {
    Soft(String),
    Hard(String),
}

#[derive(Default)]
struct RecordingNavigator {
    visits: RefCell<Vec<Nav>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(Nav::Soft(path.to_owned()));
    }

    fn hard_navigate(&self, url: &str) {
        self.visits.borrow_mut().push(Nav::Hard(url.to_owned()));
    }
}

struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

struct Harness {
    store: Rc<MemorySessionStore>,
    identity: Rc<MockIdentity>,
    local: Rc<MemoryStore>,
    session: Rc<MemoryStore>,
    cookies: Rc<MemoryCookieJar>,
    nav: Rc<RecordingNavigator>,
    controller: SessionController,
}

impl Harness {
    fn new(initial: SessionState, probe: Probe) -> Self {
        let store = Rc::new(MemorySessionStore::new(initial));
        let identity = Rc::new(MockIdentity::new(probe));
        let local = Rc::new(MemoryStore::new());
        let session = Rc::new(MemoryStore::new());
        let cookies = Rc::new(MemoryCookieJar::with_cookies(&["iakwe_session", "_ga"]));
        let nav = Rc::new(RecordingNavigator::default());
        let services = SessionServices {
            store: store.clone(),
            identity: identity.clone(),
            local_storage: local.clone(),
            session_storage: session.clone(),
            cookies: cookies.clone(),
            navigator: nav.clone(),
            timer: Rc::new(TokioTimer),
        };
        let controller = SessionController::new(services, SessionConfig::default());
        Self { store, identity, local, session, cookies, nav, controller }
    }

    fn nav(&self) -> Vec<Nav> {
        std::mem::take(&mut *self.nav.visits.borrow_mut())
    }
}

fn user() -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        email: "hr@majuro.example".to_owned(),
        full_name: Some("Neijon Jibas".to_owned()),
        role: Some("HR Manager".to_owned()),
        company_id: Some("c1".to_owned()),
    }
}

fn assert_settled(state: &SessionState) {
    assert!(!state.is_checking_auth, "still checking: {state:?}");
    assert!(state.is_authenticated ^ state.is_guest_mode, "exactly one mode expected: {state:?}");
}

// =========================================================================
// check_auth_status
// =========================================================================

#[tokio::test]
async fn probe_with_user_authenticates() {
    let h = Harness::new(SessionState::checking(), Probe::User(user()));
    let phase = h.controller.check_auth_status().await;
    assert_eq!(phase, SessionPhase::Authenticated);
    assert_eq!(h.store.snapshot(), SessionState::authenticated(user()));
}

#[tokio::test]
async fn probe_without_user_falls_back_to_guest() {
    let h = Harness::new(SessionState::checking(), Probe::NoUser);
    assert_eq!(h.controller.check_auth_status().await, SessionPhase::Guest);
    assert_eq!(h.store.snapshot(), SessionState::guest());
}

#[tokio::test]
async fn probe_failure_falls_back_to_guest() {
    let h = Harness::new(SessionState::checking(), Probe::Fail);
    assert_eq!(h.controller.check_auth_status().await, SessionPhase::Guest);
    assert_settled(&h.store.snapshot());
}

#[tokio::test(start_paused = true)]
async fn probe_timeout_falls_back_to_guest() {
    let h = Harness::new(SessionState::checking(), Probe::Hang);
    let started = tokio::time::Instant::now();
    assert_eq!(h.controller.check_auth_status().await, SessionPhase::Guest);
    assert!(started.elapsed() >= DEFAULT_AUTH_CHECK_TIMEOUT);
    assert_settled(&h.store.snapshot());
}

#[tokio::test(start_paused = true)]
async fn every_probe_outcome_settles_in_exactly_one_mode() {
    for probe in [Probe::User(user()), Probe::NoUser, Probe::Fail, Probe::Hang] {
        let h = Harness::new(SessionState::checking(), probe);
        h.controller.check_auth_status().await;
        assert_settled(&h.store.snapshot());
    }
}

#[tokio::test]
async fn force_guest_flag_skips_probe_and_is_consumed() {
    let h = Harness::new(SessionState::checking(), Probe::User(user()));
    storage::set_force_guest(h.session.as_ref()).expect("flag");

    assert_eq!(h.controller.check_auth_status().await, SessionPhase::Guest);
    assert_eq!(h.identity.get_user_calls.get(), 0);
    assert!(h.session.get(FORCE_GUEST_KEY).expect("read").is_none());

    assert_eq!(h.controller.check_auth_status().await, SessionPhase::Authenticated);
    assert_eq!(h.identity.get_user_calls.get(), 1);
}

#[tokio::test]
async fn probe_passes_through_checking_state() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    h.controller.check_auth_status().await;
    let history = h.store.history();
    assert!(history[0].is_checking_auth);
    assert!(!history.last().expect("history").is_checking_auth);
}

// =========================================================================
// login / logout
// =========================================================================

#[tokio::test]
async fn login_only_navigates_to_sign_in() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    h.controller.login();
    assert_eq!(h.nav(), vec![Nav::Soft("/login".to_owned())]);
    assert_eq!(h.store.snapshot(), SessionState::guest());
    assert_eq!(h.identity.get_user_calls.get(), 0);
}

#[tokio::test]
async fn logout_resets_to_guest_and_clears_storage() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.local.set("iakwe_dashboard_cache", "{}").expect("seed");
    h.local.set("sb-auth-token", "abc").expect("seed");
    h.session.set("iakwe_tab", "employees").expect("seed");

    let report = h.controller.logout().await;

    let state = h.store.snapshot();
    assert!(!state.is_authenticated);
    assert!(state.is_guest_mode);
    assert!(!state.is_logging_out);
    assert!(state.user.is_none());
    assert!(report.is_clean());
    assert!(h.local.is_empty());
    assert_eq!(h.session.keys().expect("keys"), vec![FORCE_GUEST_KEY.to_owned()]);
    assert!(h.cookies.is_empty());
    assert_eq!(h.identity.sign_out_calls.get(), 1);
    assert_eq!(h.nav(), vec![Nav::Hard("/".to_owned())]);
}

#[tokio::test]
async fn logout_shows_logging_out_before_settling() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.controller.logout().await;
    let history = h.store.history();
    assert!(history[0].is_logging_out);
    assert!(!history[0].is_authenticated);
    assert!(!history.last().expect("history").is_logging_out);
}

#[tokio::test]
async fn logout_survives_provider_and_item_failures() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.identity.sign_out_fails.set(true);
    h.local.set("stuck", "1").expect("seed");
    h.local.set("loose", "1").expect("seed");
    h.local.fail_removal_of("stuck");
    h.cookies.fail_expiry_of("iakwe_session");

    let report = h.controller.logout().await;

    let failed: Vec<String> = report.failures().map(|(target, _)| target.to_string()).collect();
    assert_eq!(failed, vec!["local:stuck".to_owned(), "cookies:iakwe_session".to_owned()]);
    assert_eq!(h.local.keys().expect("keys"), vec!["stuck".to_owned()]);
    assert_eq!(h.store.snapshot(), SessionState::guest());
    assert_eq!(h.nav(), vec![Nav::Hard("/".to_owned())]);
}

#[tokio::test(start_paused = true)]
async fn logout_finishes_when_provider_sign_out_hangs() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.identity.sign_out_hangs.set(true);
    h.local.set("sb-auth-token", "abc").expect("seed");

    let report = tokio::time::timeout(Duration::from_secs(600), h.controller.logout())
        .await
        .expect("logout should not wait on a hung sign-out");

    assert!(report.is_clean());
    assert!(h.local.is_empty());
    assert_eq!(h.session.keys().expect("keys"), vec![FORCE_GUEST_KEY.to_owned()]);
    assert_eq!(h.store.snapshot(), SessionState::guest());
    assert_eq!(h.nav(), vec![Nav::Hard("/".to_owned())]);
}

#[tokio::test]
async fn next_mount_after_logout_stays_guest_once() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.controller.logout().await;
    assert_eq!(h.controller.check_auth_status().await, SessionPhase::Guest);
    assert_eq!(h.identity.get_user_calls.get(), 0);
}

// =========================================================================
// guest mode
// =========================================================================

#[tokio::test(start_paused = true)]
async fn switch_to_guest_finishes_when_provider_sign_out_hangs() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.identity.sign_out_hangs.set(true);

    tokio::time::timeout(Duration::from_secs(600), h.controller.switch_to_guest_mode())
        .await
        .expect("guest switch should not wait on a hung sign-out");

    let state = h.store.snapshot();
    assert!(!state.is_authenticated);
    assert!(state.is_guest_mode);
    assert_eq!(h.nav(), vec![Nav::Soft("/guest".to_owned())]);
}

#[tokio::test]
async fn switch_to_guest_signs_out_real_session() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.controller.switch_to_guest_mode().await;

    assert_eq!(h.identity.sign_out_calls.get(), 1);
    assert_eq!(h.store.snapshot(), SessionState::guest());
    assert_eq!(h.session.get(FORCE_GUEST_KEY).expect("read").as_deref(), Some("true"));
    assert_eq!(h.nav(), vec![Nav::Soft("/guest".to_owned())]);
}

#[tokio::test]
async fn switch_to_guest_without_session_skips_sign_out() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    h.controller.switch_to_guest_mode().await;
    assert_eq!(h.identity.sign_out_calls.get(), 0);
    assert_eq!(h.store.snapshot(), SessionState::guest());
}

#[tokio::test]
async fn switch_to_guest_never_holds_both_modes() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    h.identity.sign_out_fails.set(true);
    h.controller.switch_to_guest_mode().await;
    for state in h.store.history() {
        assert!(!(state.is_authenticated && state.is_guest_mode), "{state:?}");
    }
    assert_settled(&h.store.snapshot());
}

#[tokio::test]
async fn set_guest_mode_true_drops_user_without_provider_calls() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(user()));
    assert_eq!(h.controller.set_guest_mode(true).await, SessionPhase::Guest);
    assert_eq!(h.identity.sign_out_calls.get(), 0);
    assert!(h.nav().is_empty());
}

#[tokio::test]
async fn set_guest_mode_false_reprobes() {
    let h = Harness::new(SessionState::guest(), Probe::User(user()));
    assert_eq!(h.controller.set_guest_mode(false).await, SessionPhase::Authenticated);

    let h = Harness::new(SessionState::guest(), Probe::Fail);
    assert_eq!(h.controller.set_guest_mode(false).await, SessionPhase::Guest);
}

// =========================================================================
// refresh / events
// =========================================================================

#[tokio::test]
async fn refresh_user_updates_profile() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::NoUser);
    let renamed = UserProfile { full_name: Some("N. Jibas".to_owned()), ..user() };
    *h.identity.probe.borrow_mut() = Probe::User(renamed.clone());
    assert_eq!(h.controller.refresh_user().await, Some(renamed));
}

#[tokio::test]
async fn refresh_user_failure_degrades_to_guest() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::Fail);
    assert_eq!(h.controller.refresh_user().await, None);
    assert_eq!(h.store.snapshot(), SessionState::guest());
}

#[tokio::test]
async fn resync_applies_remote_sign_out() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::NoUser);
    assert_eq!(h.controller.resync().await, SessionPhase::Guest);
    assert_eq!(h.store.snapshot(), SessionState::guest());
}

#[tokio::test]
async fn resync_refreshes_signed_in_profile() {
    let renamed = UserProfile { full_name: Some("N. Jibas".to_owned()), ..user() };
    let h = Harness::new(SessionState::authenticated(user()), Probe::User(renamed.clone()));
    assert_eq!(h.controller.resync().await, SessionPhase::Authenticated);
    assert_eq!(h.store.snapshot().user, Some(renamed));
}

#[tokio::test]
async fn resync_failure_keeps_session() {
    let h = Harness::new(SessionState::authenticated(user()), Probe::Fail);
    assert_eq!(h.controller.resync().await, SessionPhase::Authenticated);
    assert_eq!(h.store.snapshot(), SessionState::authenticated(user()));
}

#[tokio::test]
async fn resync_leaves_guest_and_checking_alone() {
    for state in [SessionState::guest(), SessionState::checking()] {
        let h = Harness::new(state.clone(), Probe::User(user()));
        h.controller.resync().await;
        assert_eq!(h.store.snapshot(), state);
        assert_eq!(h.identity.get_user_calls.get(), 0);
    }
}

#[tokio::test]
async fn auth_events_drive_state() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    h.controller.handle_auth_event(AuthEvent::SignedIn(user()));
    assert!(h.store.snapshot().is_authenticated);
    h.controller.handle_auth_event(AuthEvent::SignedOut);
    assert_eq!(h.store.snapshot(), SessionState::guest());
}

// =========================================================================
// form actions
// =========================================================================

#[tokio::test]
async fn sign_in_success_authenticates_and_clears_stale_flag() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    storage::set_force_guest(h.session.as_ref()).expect("flag");
    let credentials = Credentials { email: "hr@majuro.example".to_owned(), password: "pw".to_owned() };

    let signed_in = h.controller.sign_in(&credentials).await.expect("sign in");

    assert_eq!(signed_in, user());
    assert!(h.store.snapshot().is_authenticated);
    assert!(h.session.is_empty());
    assert_eq!(h.nav(), vec![Nav::Soft("/dashboard".to_owned())]);
}

#[tokio::test]
async fn sign_in_rejection_leaves_state_untouched() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    let rejected = SessionError::Rejected { status: 401, message: "invalid login".to_owned() };
    *h.identity.sign_in_result.borrow_mut() = Err(rejected.clone());
    let credentials = Credentials { email: "a@b.mh".to_owned(), password: "nope".to_owned() };

    assert_eq!(h.controller.sign_in(&credentials).await, Err(rejected));
    assert_eq!(h.store.snapshot(), SessionState::guest());
    assert!(h.nav().is_empty());
}

#[tokio::test]
async fn sign_in_blank_fields_rejected_locally() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    let credentials = Credentials { email: "  ".to_owned(), password: "pw".to_owned() };
    let err = h.controller.sign_in(&credentials).await.expect_err("blank email");
    assert!(matches!(err, SessionError::InvalidInput(_)));
}

#[tokio::test]
async fn sign_up_requires_full_name() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    let registration = Registration {
        email: "new@ebeye.example".to_owned(),
        password: "pw".to_owned(),
        full_name: String::new(),
        company_name: None,
    };
    assert!(matches!(h.controller.sign_up(&registration).await, Err(SessionError::InvalidInput(_))));

    let registration = Registration { full_name: "Tina Lang".to_owned(), ..registration };
    let created = h.controller.sign_up(&registration).await.expect("sign up");
    assert_eq!(created.full_name.as_deref(), Some("Tina Lang"));
    assert!(h.store.snapshot().is_authenticated);
}

#[tokio::test]
async fn reset_password_validates_email() {
    let h = Harness::new(SessionState::guest(), Probe::NoUser);
    assert!(h.controller.reset_password("").await.is_err());
    assert!(h.controller.reset_password("a@b.mh").await.is_ok());
}
