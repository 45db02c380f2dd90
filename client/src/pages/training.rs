//! Training course catalog with course material uploads.

#[cfg(test)]
#[path = "training_test.rs"]
mod training_test;

use leptos::prelude::*;

use crate::net::types::TrainingCourse;
use crate::state::records::Records;
use crate::state::session::use_session;
use crate::util::sample;

use super::{is_guest, load_error, load_records};

/// Storage bucket for course material.
#[cfg(feature = "hydrate")]
const MATERIAL_BUCKET: &str = "training";

fn course_payload(title: &str, description: &str, hours: &str, mandatory: bool) -> Result<serde_json::Value, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Enter a course title.");
    }
    let hours = hours.trim();
    let duration_hours = if hours.is_empty() {
        None
    } else {
        match hours.parse::<f64>() {
            Ok(h) if h > 0.0 && h.is_finite() => Some(h),
            _ => return Err("Duration must be a positive number of hours."),
        }
    };
    let description = description.trim();
    Ok(serde_json::json!({
        "title": title,
        "description": (!description.is_empty()).then_some(description),
        "duration_hours": duration_hours,
        "mandatory": mandatory,
    }))
}

fn hours_label(hours: Option<f64>) -> String {
    match hours {
        Some(h) if (h - 1.0).abs() < f64::EPSILON => "1 hour".to_owned(),
        Some(h) => format!("{h} hours"),
        None => "Self-paced".to_owned(),
    }
}

#[cfg(feature = "hydrate")]
fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

#[component]
pub fn TrainingPage() -> impl IntoView {
    let session = use_session();
    let courses = RwSignal::new(Records::<TrainingCourse>::Loading);
    load_records(session, courses, sample::training_courses, Some("title"));

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let hours = RwSignal::new(String::new());
    let mandatory = RwSignal::new(false);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let uploading = RwSignal::new(None::<String>);

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match course_payload(&title.get(), &description.get(), &hours.get(), mandatory.get()) {
            Ok(p) => p,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::entities::create::<TrainingCourse>(&payload).await {
                Ok(created) => {
                    courses.update(|r| r.upsert(created, |c| c.id.as_str()));
                    title.set(String::new());
                    description.set(String::new());
                    hours.set(String::new());
                    mandatory.set(false);
                    info.set(String::new());
                }
                Err(e) => {
                    leptos::logging::warn!("course create failed: {e}");
                    info.set("Could not save the course. Try again.".to_owned());
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = payload;
    };

    let upload = move |course_id: String, ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = selected_file(&ev) else {
                return;
            };
            uploading.set(Some(course_id.clone()));
            leptos::task::spawn_local(async move {
                let path = crate::net::integrations::object_path(&course_id, &file.name());
                let stored = match crate::net::integrations::upload_file(MATERIAL_BUCKET, &path, &file).await {
                    Ok(stored) => stored,
                    Err(e) => {
                        leptos::logging::warn!("material upload failed: {e}");
                        info.set("Upload failed. Try again.".to_owned());
                        uploading.set(None);
                        return;
                    }
                };
                let patch = serde_json::json!({ "material_path": stored.path });
                match crate::net::entities::update::<TrainingCourse>(&course_id, &patch).await {
                    Ok(updated) => courses.update(|r| r.upsert(updated, |c| c.id.as_str())),
                    Err(e) => {
                        leptos::logging::warn!("course update after upload failed: {e}");
                        info.set("The file uploaded but the course was not updated.".to_owned());
                    }
                }
                uploading.set(None);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (course_id, ev);
    };

    view! {
        <section class="page">
            <h1>"Training"</h1>
            {load_error(courses)}
            <Show when=move || !is_guest(session)>
                <form class="form form--inline" on:submit=on_create>
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Course title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Description"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                    <input
                        class="form__input form__input--narrow"
                        type="number"
                        min="0"
                        step="0.5"
                        placeholder="Hours"
                        prop:value=move || hours.get()
                        on:input=move |ev| hours.set(event_target_value(&ev))
                    />
                    <label class="form__check">
                        <input
                            type="checkbox"
                            prop:checked=move || mandatory.get()
                            on:change=move |ev| mandatory.set(event_target_checked(&ev))
                        />
                        "Mandatory"
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Add course"</button>
                </form>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="notice">{move || info.get()}</p>
            </Show>
            <div class="cards">
                <For
                    each=move || courses.with(|r| r.items().to_vec())
                    key=|c| (c.id.clone(), c.material_path.clone())
                    let:course
                >
                    {
                        let id = course.id.clone();
                        let busy_id = course.id.clone();
                        view! {
                            <article class="card">
                                <h2 class="card__title">{course.title.clone()}</h2>
                                <p class="card__meta">
                                    {hours_label(course.duration_hours)}
                                    {course.mandatory.then_some(" · Mandatory")}
                                </p>
                                <p class="card__body">{course.description.clone().unwrap_or_default()}</p>
                                <p class="card__meta">
                                    {course
                                        .material_path
                                        .clone()
                                        .map_or_else(|| "No material yet".to_owned(), |p| format!("Material: {p}"))}
                                </p>
                                <Show when=move || !is_guest(session)>
                                    <label class="btn btn--small">
                                        {
                                            let busy_id = busy_id.clone();
                                            move || {
                                                if uploading.get().is_some_and(|u| u == busy_id) {
                                                    "Uploading..."
                                                } else {
                                                    "Upload material"
                                                }
                                            }
                                        }
                                        <input
                                            class="visually-hidden"
                                            type="file"
                                            on:change={
                                                let id = id.clone();
                                                move |ev| upload(id.clone(), ev)
                                            }
                                        />
                                    </label>
                                </Show>
                            </article>
                        }
                    }
                </For>
            </div>
        </section>
    }
}
