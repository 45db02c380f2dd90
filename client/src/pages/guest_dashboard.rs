//! Read-only dashboard for guests, rendered from sample data.

use leptos::prelude::*;

use crate::components::leave_table::LeaveTable;
use crate::components::stat_card::StatCard;
use crate::state::session::use_session;
use crate::util::directory::DashboardStats;
use crate::util::sample;

#[component]
pub fn GuestDashboardPage() -> impl IntoView {
    let session = use_session();
    let stats = DashboardStats::compute(&sample::employees(), &sample::leave_requests());
    let leave = Signal::derive(sample::leave_requests);

    let on_sign_in = move |_| {
        #[cfg(feature = "hydrate")]
        crate::util::browser::session_controller(session).login();
        #[cfg(not(feature = "hydrate"))]
        let _ = session;
    };

    view! {
        <section class="page">
            <h1>"Sample company dashboard"</h1>
            <p class="page__lead">"This is demo data. Sign in to see and manage your own team."</p>
            <div class="stats">
                <StatCard label="Headcount" value=stats.headcount.to_string()/>
                <StatCard label="On leave" value=stats.on_leave.to_string()/>
                <StatCard label="Departments" value=stats.departments.to_string()/>
                <StatCard label="Pending leave" value=stats.pending_leave.to_string() hint="awaiting review"/>
            </div>
            <h2>"Recent leave"</h2>
            <LeaveTable requests=leave/>
            <button class="btn btn--primary" on:click=on_sign_in>"Sign in"</button>
        </section>
    }
}
