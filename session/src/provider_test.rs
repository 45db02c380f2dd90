use super::*;

fn profile(full_name: Option<&str>, role: Option<&str>) -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        email: "lani@example.mh".to_owned(),
        full_name: full_name.map(str::to_owned),
        role: role.map(str::to_owned),
        company_id: Some("c1".to_owned()),
    }
}

#[test]
fn display_name_prefers_full_name() {
    assert_eq!(profile(Some("Lani Kabua"), None).display_name(), "Lani Kabua");
}

#[test]
fn display_name_falls_back_to_email_when_blank() {
    assert_eq!(profile(Some("   "), None).display_name(), "lani@example.mh");
    assert_eq!(profile(None, None).display_name(), "lani@example.mh");
}

#[test]
fn role_parses_known_labels_only() {
    assert_eq!(profile(None, Some("HR Manager")).role(), Some(Role::HrManager));
    assert_eq!(profile(None, Some("Super Admin")).role(), None);
    assert_eq!(profile(None, None).role(), None);
}

#[test]
fn profile_deserializes_with_missing_optional_fields() {
    let json = serde_json::json!({ "id": "u9", "email": "a@b.mh" });
    let user: UserProfile = serde_json::from_value(json).expect("profile");
    assert_eq!(user.id, "u9");
    assert!(user.full_name.is_none());
    assert!(user.role.is_none());
    assert!(user.company_id.is_none());
}
