use super::*;

#[test]
fn parses_labels_and_ids_exactly() {
    for role in Role::ALL {
        assert_eq!(role.id().parse::<Role>(), Ok(role));
        assert_eq!(role.label().parse::<Role>(), Ok(role));
    }
}

#[test]
fn rejects_case_variants_and_substrings() {
    for raw in ["ADMIN", "hr manager", "Administrator", "Super Admin", "admin ", "HR", ""] {
        assert_eq!(raw.parse::<Role>(), Err(RoleError::Unknown(raw.to_owned())), "{raw:?}");
    }
}

#[test]
fn display_uses_label() {
    assert_eq!(Role::HrManager.to_string(), "HR Manager");
}

#[test]
fn admin_chat_limited_to_admin_and_hr_manager() {
    assert!(Role::Admin.can_use_admin_chat());
    assert!(Role::HrManager.can_use_admin_chat());
    assert!(!Role::Manager.can_use_admin_chat());
    assert!(!Role::Employee.can_use_admin_chat());
}

#[test]
fn only_employees_cannot_review_leave() {
    assert!(Role::Manager.can_review_leave());
    assert!(!Role::Employee.can_review_leave());
}

#[test]
fn serde_uses_snake_case_ids() {
    assert_eq!(serde_json::to_value(Role::HrManager).expect("json"), serde_json::json!("hr_manager"));
}
