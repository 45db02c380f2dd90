use super::*;

#[test]
fn employee_defaults_optional_fields() {
    let json = serde_json::json!({
        "id": "e1",
        "full_name": "Kino Jorju",
        "email": "kino@example.mh"
    });
    let employee: Employee = serde_json::from_value(json).expect("employee");
    assert_eq!(employee.status, EmploymentStatus::Active);
    assert_eq!(employee.employment_type, EmploymentType::FullTime);
    assert!(employee.department.is_none());
    assert!(employee.start_date.is_none());
}

#[test]
fn leave_request_parses_iso_dates_and_snake_case_enums() {
    let json = serde_json::json!({
        "id": "l1",
        "employee_id": "e1",
        "leave_type": "bereavement",
        "start_date": "2026-03-02",
        "end_date": "2026-03-04",
        "status": "approved"
    });
    let request: LeaveRequest = serde_json::from_value(json).expect("leave");
    assert_eq!(request.leave_type, LeaveType::Bereavement);
    assert_eq!(request.status, LeaveStatus::Approved);
    assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2026, 3, 2).expect("date"));
}

#[test]
fn leave_type_ids_round_trip() {
    for leave_type in LeaveType::ALL {
        assert_eq!(LeaveType::from_id(leave_type.id()), Some(leave_type));
    }
    assert_eq!(LeaveType::from_id("vacation"), None);
}

#[test]
fn llm_output_is_tagged_by_kind() {
    let text: LlmOutput = serde_json::from_value(serde_json::json!({ "kind": "text", "text": "hi" })).expect("text");
    assert_eq!(text, LlmOutput::Text { text: "hi".to_owned() });

    let json: LlmOutput =
        serde_json::from_value(serde_json::json!({ "kind": "json", "value": { "a": 1 } })).expect("json");
    assert_eq!(json, LlmOutput::Json { value: serde_json::json!({ "a": 1 }) });
}

#[test]
fn invoke_request_omits_absent_schema() {
    let request = LlmInvokeRequest { prompt: "hello".to_owned(), system: None, response_json_schema: None };
    let value = serde_json::to_value(&request).expect("json");
    assert_eq!(value, serde_json::json!({ "prompt": "hello" }));
}

#[test]
fn policy_analysis_parses_status() {
    let json = serde_json::json!({
        "compliance_score": 72,
        "status": "needs_review",
        "summary": "Mostly aligned."
    });
    let analysis: PolicyAnalysis = serde_json::from_value(json).expect("analysis");
    assert_eq!(analysis.status, ComplianceStatus::NeedsReview);
    assert!(analysis.gaps.is_empty());
}
