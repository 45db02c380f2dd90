//! Member dashboard: headline stats and the review queue.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page refreshes the signed-in user and loads employees and
//! leave requests concurrently, waiting for all three before rendering
//! figures. A failed list shows an error banner; a failed user refresh drops
//! the session to guest through the controller.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::{Page, UserProfile};

use crate::components::leave_table::LeaveTable;
use crate::components::stat_card::StatCard;
use crate::net::types::{Employee, LeaveRequest, LeaveStatus};
use crate::state::records::Records;
use crate::state::session::use_session;
use crate::util::directory::DashboardStats;
use crate::util::sample;

/// Newest pending requests first, at most `limit`.
fn review_queue(requests: &[LeaveRequest], limit: usize) -> Vec<LeaveRequest> {
    let mut pending: Vec<LeaveRequest> = requests.iter().filter(|r| r.status == LeaveStatus::Pending).cloned().collect();
    pending.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    pending.truncate(limit);
    pending
}

fn greeting(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let first = name.split_whitespace().next().unwrap_or(name);
            format!("Iakwe, {first}")
        }
        None => "Iakwe".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let employees = RwSignal::new(Records::<Employee>::Loading);
    let leave = RwSignal::new(Records::<LeaveRequest>::Loading);

    if session.state.get_untracked().is_guest_mode {
        employees.set(Records::Ready(sample::employees()));
        leave.set(Records::Ready(sample::leave_requests()));
    } else {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = crate::util::browser::session_controller(session);
            let (_user, staff, requests) = futures::join!(
                controller.refresh_user(),
                crate::net::entities::list::<Employee>(Some("full_name")),
                crate::net::entities::list::<LeaveRequest>(Some("-start_date")),
            );
            employees.set(staff.into());
            leave.set(requests.into());
        });
    }

    let stats = Memo::new(move |_| {
        let staff = employees.get();
        let requests = leave.get();
        DashboardStats::compute(staff.items(), requests.items())
    });
    let loading = move || employees.with(Records::is_loading) || leave.with(Records::is_loading);
    let failed = move || employees.with(|r| r.error().is_some()) || leave.with(|r| r.error().is_some());
    let queue = Signal::derive(move || leave.with(|r| review_queue(r.items(), 5)));
    let title = move || greeting(session.state.get().user.as_ref().map(UserProfile::display_name));

    view! {
        <section class="page">
            <h1>{title}</h1>
            <Show when=failed>
                <p class="notice notice--error">"Some figures could not be loaded. Try again shortly."</p>
            </Show>
            <Show when=move || !loading() fallback=|| view! { <p class="notice">"Loading your team..."</p> }>
                <div class="stats">
                    <StatCard label="Headcount" value=Signal::derive(move || stats.get().headcount.to_string())/>
                    <StatCard label="On leave" value=Signal::derive(move || stats.get().on_leave.to_string())/>
                    <StatCard label="Departments" value=Signal::derive(move || stats.get().departments.to_string())/>
                    <StatCard
                        label="Pending leave"
                        value=Signal::derive(move || stats.get().pending_leave.to_string())
                        hint="awaiting review"
                    />
                </div>
                <h2>"Review queue"</h2>
                <LeaveTable requests=queue/>
                <a class="btn btn--ghost" href=Page::LeaveRequests.path()>"All leave requests"</a>
            </Show>
        </section>
    }
}
