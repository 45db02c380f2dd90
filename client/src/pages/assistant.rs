//! HR assistant chat. Admins and HR managers also get a policy drafting mode.

use leptos::prelude::*;
use session::UserProfile;

use crate::net::types::LlmOutput;
use crate::state::session::use_session;
use crate::util::assistant::{ChatMessage, ChatMode, Speaker, available_modes, build_request, effective_mode};

fn reply_text(output: LlmOutput) -> String {
    match output {
        LlmOutput::Text { text } => text,
        LlmOutput::Json { value } => serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
    }
}

#[component]
pub fn AssistantPage() -> impl IntoView {
    let session = use_session();
    let role = Memo::new(move |_| session.state.with(|s| s.user.as_ref().and_then(UserProfile::role)));
    let requested_mode = RwSignal::new(ChatMode::default());
    let mode = Memo::new(move |_| effective_mode(requested_mode.get(), role.get()));
    let messages = RwSignal::new(Vec::<ChatMessage>::new());
    let input = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let text = input.get();
        let Some(request) = messages.with(|history| build_request(mode.get(), history, &text)) else {
            return;
        };
        messages.update(|m| m.push(ChatMessage::user(text.trim())));
        input.set(String::new());
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let reply = match crate::net::integrations::invoke_llm(&request).await {
                Ok(output) => reply_text(output),
                Err(e) => {
                    leptos::logging::warn!("assistant request failed: {e}");
                    "Sorry, I could not answer that just now. Please try again.".to_owned()
                }
            };
            messages.update(|m| m.push(ChatMessage::assistant(reply)));
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    view! {
        <section class="page page--chat">
            <div class="page__header">
                <h1>"HR assistant"</h1>
                <div class="segmented">
                    {move || {
                        available_modes(role.get())
                            .into_iter()
                            .map(|m| {
                                let class = move || {
                                    if mode.get() == m { "segmented__item segmented__item--active" } else { "segmented__item" }
                                };
                                view! {
                                    <button class=class on:click=move |_| requested_mode.set(m)>
                                        {m.label()}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
            <div class="chat">
                <For each=move || messages.get().into_iter().enumerate() key=|(i, _)| *i let:entry>
                    {
                        let (_, message) = entry;
                        let class = match message.speaker {
                            Speaker::User => "chat__message chat__message--user",
                            Speaker::Assistant => "chat__message chat__message--assistant",
                        };
                        view! { <div class=class>{message.text}</div> }
                    }
                </For>
                <Show when=move || busy.get()>
                    <div class="chat__message chat__message--assistant chat__message--pending">"Thinking..."</div>
                </Show>
            </div>
            <form class="chat__composer" on:submit=on_send>
                <textarea
                    class="form__input"
                    placeholder=move || match mode.get() {
                        ChatMode::General => "Ask about leave, policies or benefits",
                        ChatMode::PolicyDrafting => "Describe the policy you need drafted",
                    }
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Send"</button>
            </form>
        </section>
    }
}
