//! Policy library with AI compliance review against Marshall Islands labor law.

use leptos::prelude::*;

use crate::net::types::{Policy, PolicyAnalysis};
use crate::state::records::Records;
use crate::state::session::use_session;
use crate::util::policy::{analysis_patch, analysis_request, parse_analysis, policy_payload, status_label};
use crate::util::sample;

use super::{is_guest, load_error, load_records};

#[component]
pub fn PoliciesPage() -> impl IntoView {
    let session = use_session();
    let policies = RwSignal::new(Records::<Policy>::Loading);
    load_records(session, policies, sample::policies, Some("title"));

    let title = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let analyzing = RwSignal::new(None::<String>);
    let analysis = RwSignal::new(None::<(String, PolicyAnalysis)>);

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match policy_payload(&title.get(), &category.get(), &content.get()) {
            Ok(p) => p,
            Err(msg) => {
                info.set(msg);
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::entities::create::<Policy>(&payload).await {
                Ok(created) => {
                    policies.update(|r| r.upsert(created, |p| p.id.as_str()));
                    title.set(String::new());
                    category.set(String::new());
                    content.set(String::new());
                    info.set(String::new());
                }
                Err(e) => {
                    leptos::logging::warn!("policy create failed: {e}");
                    info.set("Could not save the policy. Try again.".to_owned());
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = payload;
    };

    let analyze = move |policy: Policy| {
        if analyzing.get_untracked().is_some() {
            return;
        }
        analyzing.set(Some(policy.id.clone()));
        let request = analysis_request(&policy);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::integrations::invoke_llm(&request).await.and_then(parse_analysis);
            match result {
                Ok(report) => {
                    if let Ok(updated) = crate::net::entities::update::<Policy>(&policy.id, &analysis_patch(&report)).await
                    {
                        policies.update(|r| r.upsert(updated, |p| p.id.as_str()));
                    }
                    analysis.set(Some((policy.title.clone(), report)));
                }
                Err(e) => {
                    leptos::logging::warn!("policy analysis failed: {e}");
                    info.set("The compliance review could not be completed. Try again shortly.".to_owned());
                }
            }
            analyzing.set(None);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, analysis);
    };

    view! {
        <section class="page">
            <h1>"Policies"</h1>
            {load_error(policies)}
            <Show when=move || !is_guest(session)>
                <form class="form" on:submit=on_create>
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Policy title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Category (e.g. Leave)"
                        prop:value=move || category.get()
                        on:input=move |ev| category.set(event_target_value(&ev))
                    />
                    <textarea
                        class="form__input form__input--tall"
                        placeholder="Policy text"
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Add policy"</button>
                </form>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="notice">{move || info.get()}</p>
            </Show>
            <div class="cards">
                <For
                    each=move || policies.with(|r| r.items().to_vec())
                    key=|p| (p.id.clone(), p.compliance_score)
                    let:policy
                >
                    {
                        let id = policy.id.clone();
                        let for_analysis = policy.clone();
                        view! {
                            <article class="card">
                                <h2 class="card__title">{policy.title.clone()}</h2>
                                <p class="card__meta">
                                    {policy.category.clone().unwrap_or_else(|| "General".to_owned())}
                                    " · "
                                    {status_label(policy.compliance_status)}
                                    {policy.compliance_score.map(|s| format!(" ({s}/100)"))}
                                </p>
                                <p class="card__body">{policy.content.clone()}</p>
                                <Show when=move || !is_guest(session)>
                                    <button
                                        class="btn btn--small"
                                        disabled={
                                            let id = id.clone();
                                            move || analyzing.get().is_some_and(|a| a == id)
                                        }
                                        on:click={
                                            let p = for_analysis.clone();
                                            move |_| analyze(p.clone())
                                        }
                                    >
                                        "Check compliance"
                                    </button>
                                </Show>
                            </article>
                        }
                    }
                </For>
            </div>
            {move || {
                analysis
                    .get()
                    .map(|(policy_title, report)| {
                        view! {
                            <div class="dialog-backdrop" on:click=move |_| analysis.set(None)>
                                <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                                    <h2>{format!("Compliance review: {policy_title}")}</h2>
                                    <p class="dialog__score">
                                        {format!("{}/100 · {}", report.compliance_score, status_label(Some(report.status)))}
                                    </p>
                                    <p>{report.summary.clone()}</p>
                                    <h3>"Gaps"</h3>
                                    <ul>{report.gaps.iter().map(|g| view! { <li>{g.clone()}</li> }).collect_view()}</ul>
                                    <h3>"Recommendations"</h3>
                                    <ul>
                                        {report
                                            .recommendations
                                            .iter()
                                            .map(|r| view! { <li>{r.clone()}</li> })
                                            .collect_view()}
                                    </ul>
                                    <button class="btn btn--primary" on:click=move |_| analysis.set(None)>"Close"</button>
                                </div>
                            </div>
                        }
                    })
            }}
        </section>
    }
}
