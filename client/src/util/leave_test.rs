use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn draft() -> LeaveDraft {
    LeaveDraft {
        employee_id: "e1".to_owned(),
        employee_name: "Kino Jorju".to_owned(),
        leave_type: "annual".to_owned(),
        start_date: "2026-03-02".to_owned(),
        end_date: "2026-03-06".to_owned(),
        reason: String::new(),
    }
}

#[test]
fn inclusive_days_counts_both_ends() {
    assert_eq!(inclusive_days(date(2026, 3, 2), date(2026, 3, 2)), Some(1));
    assert_eq!(inclusive_days(date(2026, 2, 27), date(2026, 3, 2)), Some(4));
}

#[test]
fn inclusive_days_rejects_backwards_range() {
    assert_eq!(inclusive_days(date(2026, 3, 5), date(2026, 3, 4)), None);
}

#[test]
fn working_days_skip_weekends() {
    // Fri 2026-03-06 through Mon 2026-03-09.
    assert_eq!(working_days(date(2026, 3, 6), date(2026, 3, 9)), 2);
    assert_eq!(working_days(date(2026, 3, 7), date(2026, 3, 8)), 0);
    assert_eq!(working_days(date(2026, 3, 9), date(2026, 3, 6)), 0);
}

#[test]
fn parse_date_accepts_input_format_only() {
    assert_eq!(parse_date(" 2026-12-25 "), Some(date(2026, 12, 25)));
    assert_eq!(parse_date("25/12/2026"), None);
    assert_eq!(parse_date(""), None);
}

#[test]
fn draft_builds_pending_payload() {
    let payload = draft().to_payload().expect("payload");
    assert_eq!(payload["leave_type"], "annual");
    assert_eq!(payload["start_date"], "2026-03-02");
    assert_eq!(payload["status"], "pending");
    assert!(payload["reason"].is_null());
}

#[test]
fn draft_rejects_missing_fields_and_reversed_dates() {
    let mut d = draft();
    d.leave_type = "sabbatical".to_owned();
    assert_eq!(d.to_payload(), Err("Choose a leave type.".to_owned()));

    let mut d = draft();
    d.end_date = "2026-03-01".to_owned();
    assert!(d.to_payload().is_err());

    let mut d = draft();
    d.employee_id = " ".to_owned();
    assert_eq!(d.to_payload(), Err("Choose an employee.".to_owned()));
}

#[test]
fn review_patch_records_reviewer() {
    let patch = review_patch(LeaveStatus::Approved, "Lani Kabua");
    assert_eq!(patch, serde_json::json!({ "status": "approved", "reviewed_by": "Lani Kabua" }));
}
