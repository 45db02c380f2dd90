//! Leave requests: submit, review, and inclusive day counts.

#[cfg(test)]
#[path = "leave_test.rs"]
mod leave_test;

use leptos::prelude::*;
use session::{Role, SessionState, UserProfile};

use crate::components::leave_table::{day_count_label, status_class, status_label};
use crate::net::types::{Employee, LeaveRequest, LeaveStatus, LeaveType};
use crate::state::records::Records;
use crate::state::session::use_session;
use crate::util::leave::{LeaveDraft, inclusive_days, parse_date, review_patch, working_days};
use crate::util::sample;

use super::{is_guest, load_error, load_records};

/// Reviewers are signed-in users whose role may approve leave. Guests and
/// unknown roles only read.
fn can_review(state: &SessionState) -> bool {
    state.is_authenticated
        && !state.is_guest_mode
        && state.user.as_ref().and_then(UserProfile::role).is_some_and(Role::can_review_leave)
}

/// Preview under the date inputs, e.g. `"5 days (3 days working)"`.
fn duration_preview(start: &str, end: &str) -> Option<String> {
    let (start, end) = (parse_date(start)?, parse_date(end)?);
    let days = inclusive_days(start, end)?;
    let working = working_days(start, end);
    Some(format!("{} ({} working)", plural(days, "day"), plural(working, "day")))
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { format!("1 {unit}") } else { format!("{n} {unit}s") }
}

#[component]
pub fn LeaveRequestsPage() -> impl IntoView {
    let session = use_session();
    let requests = RwSignal::new(Records::<LeaveRequest>::Loading);
    let employees = RwSignal::new(Records::<Employee>::Loading);
    load_records(session, requests, sample::leave_requests, Some("-start_date"));
    load_records(session, employees, sample::employees, Some("full_name"));

    let draft = RwSignal::new(LeaveDraft { leave_type: LeaveType::Annual.id().to_owned(), ..Default::default() });
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let reviewer = move || session.state.with(can_review);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match draft.with(LeaveDraft::to_payload) {
            Ok(p) => p,
            Err(msg) => {
                info.set(msg);
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::entities::create::<LeaveRequest>(&payload).await {
                Ok(created) => {
                    requests.update(|r| r.upsert(created, |l| l.id.as_str()));
                    draft.update(|d| {
                        d.start_date.clear();
                        d.end_date.clear();
                        d.reason.clear();
                    });
                    info.set("Request submitted.".to_owned());
                }
                Err(e) => {
                    leptos::logging::warn!("leave create failed: {e}");
                    info.set("Could not submit the request. Try again.".to_owned());
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = payload;
    };

    let review = move |id: String, status: LeaveStatus| {
        let reviewer_name = session
            .state
            .with_untracked(|s| s.user.as_ref().map(|u| u.display_name().to_owned()))
            .unwrap_or_default();
        let patch = review_patch(status, &reviewer_name);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::entities::update::<LeaveRequest>(&id, &patch).await {
                Ok(updated) => requests.update(|r| r.upsert(updated, |l| l.id.as_str())),
                Err(e) => {
                    leptos::logging::warn!("leave review failed: {e}");
                    info.set("Could not update the request. Try again.".to_owned());
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, patch);
    };

    let on_employee = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        let name = employees
            .with_untracked(|r| r.items().iter().find(|e| e.id == id).map(|e| e.full_name.clone()))
            .unwrap_or_default();
        draft.update(|d| {
            d.employee_id = id;
            d.employee_name = name;
        });
    };

    view! {
        <section class="page">
            <h1>"Leave requests"</h1>
            {load_error(requests)}
            <Show when=move || !is_guest(session)>
                <form class="form" on:submit=on_submit>
                    <select class="form__input" on:change=on_employee>
                        <option value="">"Employee..."</option>
                        <For each=move || employees.with(|r| r.items().to_vec()) key=|e| e.id.clone() let:employee>
                            <option value=employee.id.clone()>{employee.full_name.clone()}</option>
                        </For>
                    </select>
                    <select
                        class="form__input"
                        on:change=move |ev| draft.update(|d| d.leave_type = event_target_value(&ev))
                    >
                        {LeaveType::ALL
                            .into_iter()
                            .map(|t| view! { <option value=t.id() selected={t == LeaveType::Annual}>{t.label()}</option> })
                            .collect_view()}
                    </select>
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || draft.with(|d| d.start_date.clone())
                        on:input=move |ev| draft.update(|d| d.start_date = event_target_value(&ev))
                    />
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || draft.with(|d| d.end_date.clone())
                        on:input=move |ev| draft.update(|d| d.end_date = event_target_value(&ev))
                    />
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Reason (optional)"
                        prop:value=move || draft.with(|d| d.reason.clone())
                        on:input=move |ev| draft.update(|d| d.reason = event_target_value(&ev))
                    />
                    <span class="form__hint">
                        {move || draft.with(|d| duration_preview(&d.start_date, &d.end_date)).unwrap_or_default()}
                    </span>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Submit"</button>
                </form>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="notice">{move || info.get()}</p>
            </Show>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Employee"</th>
                        <th>"Type"</th>
                        <th>"Dates"</th>
                        <th>"Days"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || requests.with(|r| r.items().to_vec())
                        key=|r| (r.id.clone(), r.status)
                        let:request
                    >
                        {
                            let pending = request.status == LeaveStatus::Pending;
                            let approve_id = request.id.clone();
                            let reject_id = request.id.clone();
                            view! {
                                <tr>
                                    <td>{request.employee_name.clone().unwrap_or_else(|| request.employee_id.clone())}</td>
                                    <td>{request.leave_type.label()}</td>
                                    <td>{format!("{} to {}", request.start_date, request.end_date)}</td>
                                    <td>{day_count_label(&request)}</td>
                                    <td>
                                        <span class=status_class(request.status)>{status_label(request.status)}</span>
                                    </td>
                                    <td>
                                        <Show when=move || pending && reviewer()>
                                            <button
                                                class="btn btn--small"
                                                on:click={
                                                    let id = approve_id.clone();
                                                    move |_| review(id.clone(), LeaveStatus::Approved)
                                                }
                                            >
                                                "Approve"
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click={
                                                    let id = reject_id.clone();
                                                    move |_| review(id.clone(), LeaveStatus::Rejected)
                                                }
                                            >
                                                "Reject"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    </For>
                </tbody>
            </table>
        </section>
    }
}
