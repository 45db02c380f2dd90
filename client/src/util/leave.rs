//! Leave request date math and form validation.

#[cfg(test)]
#[path = "leave_test.rs"]
mod leave_test;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::net::types::{LeaveRequest, LeaveStatus, LeaveType};

/// Parse an `<input type="date">` value (`YYYY-MM-DD`).
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Calendar days from `start` to `end`, both included. `None` when the range
/// runs backwards.
#[must_use]
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    (end >= start).then(|| (end - start).num_days() + 1)
}

/// Monday-to-Friday days in the inclusive range.
#[must_use]
pub fn working_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .fold(0, |n, _| n + 1)
}

/// Raw values from the leave request form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeaveDraft {
    pub employee_id: String,
    pub employee_name: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

impl LeaveDraft {
    /// Validate the draft and build the create payload.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for showing next to the form.
    pub fn to_payload(&self) -> Result<serde_json::Value, String> {
        if self.employee_id.trim().is_empty() {
            return Err("Choose an employee.".to_owned());
        }
        let leave_type = LeaveType::from_id(&self.leave_type).ok_or_else(|| "Choose a leave type.".to_owned())?;
        let start = parse_date(&self.start_date).ok_or_else(|| "Enter a start date.".to_owned())?;
        let end = parse_date(&self.end_date).ok_or_else(|| "Enter an end date.".to_owned())?;
        if inclusive_days(start, end).is_none() {
            return Err("End date must be on or after the start date.".to_owned());
        }
        let reason = self.reason.trim();
        let name = self.employee_name.trim();
        Ok(serde_json::json!({
            "employee_id": self.employee_id.trim(),
            "employee_name": (!name.is_empty()).then_some(name),
            "leave_type": leave_type,
            "start_date": start,
            "end_date": end,
            "reason": (!reason.is_empty()).then_some(reason),
            "status": LeaveStatus::Pending,
        }))
    }
}

/// Patch applied when a reviewer approves or rejects a request.
#[must_use]
pub fn review_patch(status: LeaveStatus, reviewer: &str) -> serde_json::Value {
    serde_json::json!({ "status": status, "reviewed_by": reviewer })
}

#[must_use]
pub fn pending_count(requests: &[LeaveRequest]) -> usize {
    requests.iter().filter(|r| r.status == LeaveStatus::Pending).count()
}
