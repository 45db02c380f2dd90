//! Read-only table of leave requests with day counts.

#[cfg(test)]
#[path = "leave_table_test.rs"]
mod leave_table_test;

use leptos::prelude::*;

use crate::net::types::{LeaveRequest, LeaveStatus};
use crate::util::leave::inclusive_days;

pub(crate) fn status_class(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "badge badge--pending",
        LeaveStatus::Approved => "badge badge--ok",
        LeaveStatus::Rejected => "badge badge--danger",
    }
}

pub(crate) fn status_label(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "Pending",
        LeaveStatus::Approved => "Approved",
        LeaveStatus::Rejected => "Rejected",
    }
}

pub(crate) fn day_count_label(request: &LeaveRequest) -> String {
    match inclusive_days(request.start_date, request.end_date) {
        Some(1) => "1 day".to_owned(),
        Some(n) => format!("{n} days"),
        None => "-".to_owned(),
    }
}

#[component]
pub fn LeaveTable(#[prop(into)] requests: Signal<Vec<LeaveRequest>>) -> impl IntoView {
    view! {
        <table class="table">
            <thead>
                <tr>
                    <th>"Employee"</th>
                    <th>"Type"</th>
                    <th>"Dates"</th>
                    <th>"Days"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>
                <For each=move || requests.get() key=|r| r.id.clone() let:request>
                    <tr>
                        <td>{request.employee_name.clone().unwrap_or_else(|| request.employee_id.clone())}</td>
                        <td>{request.leave_type.label()}</td>
                        <td>{format!("{} to {}", request.start_date, request.end_date)}</td>
                        <td>{day_count_label(&request)}</td>
                        <td>
                            <span class=status_class(request.status)>{status_label(request.status)}</span>
                        </td>
                    </tr>
                </For>
            </tbody>
        </table>
    }
}
