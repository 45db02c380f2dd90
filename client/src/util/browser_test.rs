use super::*;

#[test]
fn parse_cookie_names_reads_each_pair() {
    assert_eq!(parse_cookie_names("sid=abc; theme=dark;  lang=mh"), vec!["sid", "theme", "lang"]);
}

#[test]
fn parse_cookie_names_handles_empty_and_valueless_entries() {
    assert!(parse_cookie_names("").is_empty());
    assert_eq!(parse_cookie_names("flag; ;x="), vec!["flag", "x"]);
}

#[test]
fn expiry_directive_sets_zero_max_age_at_root() {
    assert_eq!(expiry_directive("sid"), "sid=; Max-Age=0; path=/");
}

#[test]
fn storage_is_unavailable_outside_browser() {
    assert_eq!(WebStorage::local().keys(), Err(StorageError::Unavailable));
    assert_eq!(WebStorage::session().get("k"), Err(StorageError::Unavailable));
    assert_eq!(DocumentCookies.names(), Err(StorageError::Unavailable));
}

#[test]
fn cleanup_outside_browser_records_every_area_as_failed() {
    let report = session::storage::clear_all(&WebStorage::local(), &WebStorage::session(), &DocumentCookies);
    assert_eq!(report.failures().count(), 3);
    assert_eq!(report.cleared(), 0);
}

#[test]
fn signal_navigator_parks_soft_navigation() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        SignalNavigator::new(ctx.pending).navigate("/guest");
        assert_eq!(ctx.take_pending().as_deref(), Some("/guest"));
    });
}

#[test]
fn hard_navigation_without_window_falls_back_to_route_change() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        SignalNavigator::new(ctx.pending).hard_navigate("/");
        assert_eq!(ctx.take_pending().as_deref(), Some("/"));
    });
}

#[test]
fn rejected_hard_navigation_falls_back_to_route_change() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        let navigator = SignalNavigator::new(ctx.pending);
        navigator.settle_hard_navigation("/", Err("SecurityError".to_owned()));
        assert_eq!(ctx.take_pending().as_deref(), Some("/"));
    });
}

#[test]
fn accepted_hard_navigation_leaves_router_alone() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        SignalNavigator::new(ctx.pending).settle_hard_navigation("/", Ok(()));
        assert_eq!(ctx.take_pending(), None);
    });
}

#[test]
fn controller_is_wired_to_context_signals() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new();
        let controller = session_controller(ctx);
        controller.login();
        assert_eq!(ctx.take_pending().as_deref(), Some("/login"));
        assert_eq!(controller.state(), ctx.state.get_untracked());
    });
}
