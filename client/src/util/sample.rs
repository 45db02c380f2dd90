//! Fixed sample records shown to guests.
//!
//! Guests never reach the backend's collections; every read-only page renders
//! from these instead.

#[cfg(test)]
#[path = "sample_test.rs"]
mod sample_test;

use chrono::NaiveDate;

use crate::net::types::{
    ComplianceStatus, Employee, EmploymentStatus, EmploymentType, LeaveRequest, LeaveStatus, LeaveType, Policy,
    TrainingCourse,
};

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn employee(
    id: &str,
    full_name: &str,
    job_title: &str,
    department: &str,
    location: &str,
    status: EmploymentStatus,
) -> Employee {
    Employee {
        id: id.to_owned(),
        full_name: full_name.to_owned(),
        email: format!("{}@sample.iakwe.mh", id.replace('-', ".")),
        job_title: Some(job_title.to_owned()),
        department: Some(department.to_owned()),
        employment_type: EmploymentType::FullTime,
        status,
        location: Some(location.to_owned()),
        start_date: day(2021, 6, 1),
    }
}

#[must_use]
pub fn employees() -> Vec<Employee> {
    vec![
        employee("s-1", "Kino Jorju", "Finance Officer", "Finance", "Majuro", EmploymentStatus::Active),
        employee("s-2", "Lani Kabua", "HR Manager", "People", "Majuro", EmploymentStatus::Active),
        employee("s-3", "Tomi Lakjohn", "Fisheries Analyst", "Operations", "Ebeye", EmploymentStatus::OnLeave),
        employee("s-4", "Mary Anjain", "Payroll Clerk", "Finance", "Majuro", EmploymentStatus::Active),
        employee("s-5", "Joel Heine", "Logistics Lead", "Operations", "Jaluit", EmploymentStatus::Active),
    ]
}

#[must_use]
pub fn leave_requests() -> Vec<LeaveRequest> {
    let request = |id: &str, employee_id: &str, name: &str, leave_type, start, end, status| LeaveRequest {
        id: id.to_owned(),
        employee_id: employee_id.to_owned(),
        employee_name: Some(name.to_owned()),
        leave_type,
        start_date: start,
        end_date: end,
        reason: None,
        status,
        reviewed_by: None,
    };
    [
        ("sl-1", "s-3", "Tomi Lakjohn", LeaveType::Paternity, day(2026, 3, 2), day(2026, 3, 13), LeaveStatus::Approved),
        ("sl-2", "s-1", "Kino Jorju", LeaveType::Annual, day(2026, 4, 6), day(2026, 4, 10), LeaveStatus::Pending),
        ("sl-3", "s-5", "Joel Heine", LeaveType::Sick, day(2026, 2, 16), day(2026, 2, 17), LeaveStatus::Approved),
    ]
    .into_iter()
    .filter_map(|(id, emp, name, kind, start, end, status)| Some(request(id, emp, name, kind, start?, end?, status)))
    .collect()
}

#[must_use]
pub fn policies() -> Vec<Policy> {
    vec![
        Policy {
            id: "sp-1".to_owned(),
            title: "Annual Leave".to_owned(),
            category: Some("Leave".to_owned()),
            content: "Full-time employees accrue annual leave each pay period after 90 days of service.".to_owned(),
            effective_date: day(2025, 1, 1),
            compliance_status: Some(ComplianceStatus::Compliant),
            compliance_score: Some(91),
        },
        Policy {
            id: "sp-2".to_owned(),
            title: "Overtime and Hours of Work".to_owned(),
            category: Some("Compensation".to_owned()),
            content: "Work beyond 40 hours in a week is paid at one and a half times the regular rate.".to_owned(),
            effective_date: day(2025, 7, 1),
            compliance_status: Some(ComplianceStatus::NeedsReview),
            compliance_score: Some(68),
        },
    ]
}

#[must_use]
pub fn training_courses() -> Vec<TrainingCourse> {
    vec![
        TrainingCourse {
            id: "st-1".to_owned(),
            title: "Workplace Safety Basics".to_owned(),
            description: Some("Hazard reporting, first aid kits and evacuation routes.".to_owned()),
            duration_hours: Some(2.0),
            mandatory: true,
            material_path: None,
        },
        TrainingCourse {
            id: "st-2".to_owned(),
            title: "Respect at Work".to_owned(),
            description: Some("Preventing harassment and handling complaints.".to_owned()),
            duration_hours: Some(1.5),
            mandatory: true,
            material_path: None,
        },
        TrainingCourse {
            id: "st-3".to_owned(),
            title: "Customer Service Foundations".to_owned(),
            description: None,
            duration_hours: Some(3.0),
            mandatory: false,
            material_path: None,
        },
    ]
}
