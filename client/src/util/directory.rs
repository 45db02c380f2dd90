//! Employee directory search and headline stats.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use std::collections::BTreeSet;

use crate::net::types::{Employee, EmploymentStatus, EmploymentType, LeaveRequest};

use super::leave::pending_count;

/// Case-insensitive match against name, email, job title and department.
/// A blank query matches everyone.
#[must_use]
pub fn matches_search(employee: &Employee, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        Some(employee.full_name.as_str()),
        Some(employee.email.as_str()),
        employee.job_title.as_deref(),
        employee.department.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[must_use]
pub fn search<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    employees.iter().filter(|e| matches_search(e, query)).collect()
}

/// Figures shown on the dashboard cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Everyone not terminated.
    pub headcount: usize,
    pub on_leave: usize,
    pub departments: usize,
    pub pending_leave: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(employees: &[Employee], leave: &[LeaveRequest]) -> Self {
        let current: Vec<&Employee> =
            employees.iter().filter(|e| e.status != EmploymentStatus::Terminated).collect();
        let departments: BTreeSet<&str> = current
            .iter()
            .filter_map(|e| e.department.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();
        Self {
            headcount: current.len(),
            on_leave: current.iter().filter(|e| e.status == EmploymentStatus::OnLeave).count(),
            departments: departments.len(),
            pending_leave: pending_count(leave),
        }
    }
}

/// Raw values from the new-employee form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub email: String,
    pub job_title: String,
    pub department: String,
    pub location: String,
}

impl EmployeeDraft {
    /// Validate the draft and build the create payload.
    ///
    /// # Errors
    ///
    /// Returns a message when the name or email is missing or malformed.
    pub fn to_payload(&self) -> Result<serde_json::Value, String> {
        let name = self.full_name.trim();
        let email = self.email.trim();
        if name.is_empty() {
            return Err("Enter the employee's name.".to_owned());
        }
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err("Enter a valid email address.".to_owned());
        }
        let optional = |raw: &str| {
            let value = raw.trim();
            (!value.is_empty()).then(|| value.to_owned())
        };
        Ok(serde_json::json!({
            "full_name": name,
            "email": email,
            "job_title": optional(&self.job_title),
            "department": optional(&self.department),
            "location": optional(&self.location),
            "employment_type": EmploymentType::FullTime,
            "status": EmploymentStatus::Active,
        }))
    }
}
