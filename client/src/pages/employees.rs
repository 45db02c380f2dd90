//! Employee directory with search and a new-employee form.

use leptos::prelude::*;

use crate::net::types::{Employee, EmploymentStatus};
use crate::state::records::Records;
use crate::state::session::use_session;
use crate::util::directory::{EmployeeDraft, search};
use crate::util::sample;

use super::{is_guest, load_error, load_records};

fn status_label(status: EmploymentStatus) -> &'static str {
    match status {
        EmploymentStatus::Active => "Active",
        EmploymentStatus::OnLeave => "On leave",
        EmploymentStatus::Terminated => "Terminated",
    }
}

fn draft_input(
    draft: RwSignal<EmployeeDraft>,
    placeholder: &'static str,
    get: fn(&EmployeeDraft) -> &str,
    set: fn(&mut EmployeeDraft, String),
) -> impl IntoView {
    view! {
        <input
            class="form__input"
            type="text"
            placeholder=placeholder
            prop:value=move || draft.with(|d| get(d).to_owned())
            on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
        />
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let session = use_session();
    let employees = RwSignal::new(Records::<Employee>::Loading);
    load_records(session, employees, sample::employees, Some("full_name"));

    let query = RwSignal::new(String::new());
    let show_form = RwSignal::new(false);
    let draft = RwSignal::new(EmployeeDraft::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let visible = move || {
        let q = query.get();
        employees.with(|r| search(r.items(), &q).into_iter().cloned().collect::<Vec<_>>())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match draft.with(EmployeeDraft::to_payload) {
            Ok(p) => p,
            Err(msg) => {
                info.set(msg);
                return;
            }
        };
        busy.set(true);
        info.set("Saving...".to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::entities::create::<Employee>(&payload).await {
                Ok(created) => {
                    employees.update(|r| r.upsert(created, |e| e.id.as_str()));
                    draft.set(EmployeeDraft::default());
                    show_form.set(false);
                    info.set(String::new());
                }
                Err(e) => {
                    leptos::logging::warn!("employee create failed: {e}");
                    info.set("Could not save the employee. Try again.".to_owned());
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = payload;
    };

    view! {
        <section class="page">
            <div class="page__header">
                <h1>"Employees"</h1>
                <Show when=move || !is_guest(session)>
                    <button class="btn btn--primary" on:click=move |_| show_form.update(|v| *v = !*v)>
                        "Add employee"
                    </button>
                </Show>
            </div>
            {load_error(employees)}
            <Show when=move || show_form.get()>
                <form class="form form--inline" on:submit=on_submit>
                    {draft_input(draft, "Full name", |d| d.full_name.as_str(), |d, v| d.full_name = v)}
                    {draft_input(draft, "Email", |d| d.email.as_str(), |d, v| d.email = v)}
                    {draft_input(draft, "Job title", |d| d.job_title.as_str(), |d, v| d.job_title = v)}
                    {draft_input(draft, "Department", |d| d.department.as_str(), |d, v| d.department = v)}
                    {draft_input(draft, "Location", |d| d.location.as_str(), |d, v| d.location = v)}
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Save"</button>
                </form>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="notice">{move || info.get()}</p>
            </Show>
            <input
                class="form__input form__input--search"
                type="search"
                placeholder="Search by name, email, title or department"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Title"</th>
                        <th>"Department"</th>
                        <th>"Location"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=visible key=|e| e.id.clone() let:employee>
                        <tr>
                            <td>
                                <div class="cell__primary">{employee.full_name.clone()}</div>
                                <div class="cell__secondary">{employee.email.clone()}</div>
                            </td>
                            <td>{employee.job_title.clone().unwrap_or_default()}</td>
                            <td>{employee.department.clone().unwrap_or_default()}</td>
                            <td>{employee.location.clone().unwrap_or_default()}</td>
                            <td>{status_label(employee.status)}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </section>
    }
}
