use super::*;

fn member(role: Option<&str>) -> SessionState {
    SessionState::authenticated(UserProfile {
        id: "u1".to_owned(),
        email: "u1@example.mh".to_owned(),
        full_name: None,
        role: role.map(str::to_owned),
        company_id: None,
    })
}

#[test]
fn managers_and_above_can_review() {
    assert!(can_review(&member(Some("Manager"))));
    assert!(can_review(&member(Some("hr_manager"))));
    assert!(can_review(&member(Some("Admin"))));
}

#[test]
fn employees_guests_and_unknown_roles_cannot_review() {
    assert!(!can_review(&member(Some("Employee"))));
    assert!(!can_review(&member(Some("Senior Manager"))));
    assert!(!can_review(&member(None)));
    assert!(!can_review(&SessionState::guest()));
}

#[test]
fn duration_preview_counts_calendar_and_working_days() {
    // Thu 2026-03-05 through Mon 2026-03-09.
    assert_eq!(duration_preview("2026-03-05", "2026-03-09").as_deref(), Some("5 days (3 days working)"));
    assert_eq!(duration_preview("2026-03-05", "2026-03-05").as_deref(), Some("1 day (1 day working)"));
}

#[test]
fn duration_preview_is_empty_for_incomplete_or_reversed_input() {
    assert_eq!(duration_preview("", "2026-03-05"), None);
    assert_eq!(duration_preview("2026-03-09", "2026-03-05"), None);
}
