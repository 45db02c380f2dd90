use super::*;
use session::{SessionPhase, UserProfile};

fn user() -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        email: "lani@example.mh".to_owned(),
        full_name: Some("Lani Kabua".to_owned()),
        role: Some("HR Manager".to_owned()),
        company_id: None,
    }
}

#[test]
fn signal_store_starts_in_checking_phase() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        assert_eq!(ctx.store().snapshot().phase(), SessionPhase::Checking);
    });
}

#[test]
fn signal_store_dispatch_runs_reducer() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        let store = ctx.store();
        store.dispatch(SessionAction::SignedIn(user()));
        assert!(ctx.state.get_untracked().is_authenticated);
        store.dispatch(SessionAction::LogoutStarted);
        store.dispatch(SessionAction::LogoutFinished);
        let state = store.snapshot();
        assert!(state.is_guest_mode);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    });
}

#[test]
fn take_pending_consumes_route_once() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        ctx.pending.set(PendingNavigation(Some("/dashboard".to_owned())));
        assert_eq!(ctx.take_pending().as_deref(), Some("/dashboard"));
        assert_eq!(ctx.take_pending(), None);
    });
}
