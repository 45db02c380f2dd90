//! Public marketing pages: landing, about, pricing and contact.

#[cfg(test)]
#[path = "marketing_test.rs"]
mod marketing_test;

use leptos::prelude::*;
use session::Page;

use crate::state::session::use_session;

struct Plan {
    name: &'static str,
    /// Monthly price in US dollars per active employee; `None` means quoted.
    per_employee_usd: Option<u32>,
    blurb: &'static str,
    features: &'static [&'static str],
}

static PLANS: [Plan; 3] = [
    Plan {
        name: "Starter",
        per_employee_usd: Some(4),
        blurb: "For small shops and family businesses.",
        features: &["Employee directory", "Leave requests", "Policy library"],
    },
    Plan {
        name: "Business",
        per_employee_usd: Some(7),
        blurb: "For growing employers across atolls.",
        features: &["Everything in Starter", "Training records", "AI policy compliance review", "HR assistant"],
    },
    Plan {
        name: "Government & NGO",
        per_employee_usd: None,
        blurb: "For ministries, SOEs and large programs.",
        features: &["Everything in Business", "Multiple departments", "Onboarding support"],
    },
];

fn price_label(per_employee_usd: Option<u32>) -> String {
    per_employee_usd.map_or_else(|| "Contact us".to_owned(), |usd| format!("${usd} / employee / month"))
}

/// Validate the contact form. Returns the `mailto:` link that opens the
/// visitor's mail client with the message prefilled.
fn contact_mailto(name: &str, email: &str, message: &str) -> Result<String, &'static str> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err("Fill in your name, email and message.");
    }
    let subject = format!("IAKWE HR enquiry from {name}");
    let body = format!("{message}\n\nReply to: {email}");
    Ok(format!("mailto:hello@iakwe.mh?subject={}&body={}", percent_encode(&subject), percent_encode(&body)))
}

fn percent_encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => char::from(b).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();
    let on_browse_as_guest = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::util::browser::session_controller(session).switch_to_guest_mode().await;
        });
    };

    view! {
        <section class="hero">
            <h1 class="hero__title">"People operations for the Marshall Islands"</h1>
            <p class="hero__lead">
                "Keep your employee records, leave and workplace policies in one place, "
                "and check your policies against local labor law with AI review."
            </p>
            <div class="hero__actions">
                <a class="btn btn--primary" href=Page::Login.path()>"Get started"</a>
                <button class="btn btn--ghost" on:click=on_browse_as_guest>"Try the demo"</button>
            </div>
        </section>
        <section class="features">
            <div class="feature">
                <h3>"Employee directory"</h3>
                <p>"Everyone on staff, from Majuro to the outer islands."</p>
            </div>
            <div class="feature">
                <h3>"Leave management"</h3>
                <p>"Requests, approvals and day counts without spreadsheets."</p>
            </div>
            <div class="feature">
                <h3>"Policy compliance"</h3>
                <p>"AI review of your handbook against Marshall Islands labor law."</p>
            </div>
        </section>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="page page--prose">
            <h1>"About IAKWE HR"</h1>
            <p>
                "IAKWE HR is built for employers in the Republic of the Marshall Islands. "
                "Most HR software assumes payroll rules, holidays and labor codes from somewhere else; "
                "we start from local law and local practice."
            </p>
            <p>"Iakwe means hello, love and welcome. That is how we want HR to feel for your team."</p>
        </section>
    }
}

#[component]
pub fn PricingPage() -> impl IntoView {
    view! {
        <section class="page">
            <h1>"Pricing"</h1>
            <div class="plans">
                {PLANS
                    .iter()
                    .map(|plan| {
                        view! {
                            <div class="plan">
                                <h2 class="plan__name">{plan.name}</h2>
                                <p class="plan__price">{price_label(plan.per_employee_usd)}</p>
                                <p class="plan__blurb">{plan.blurb}</p>
                                <ul class="plan__features">
                                    {plan.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                                </ul>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match contact_mailto(&name.get(), &email.get(), &message.get()) {
            Ok(link) => {
                info.set("Opening your email app...".to_owned());
                #[cfg(feature = "hydrate")]
                {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&link);
                    }
                }
                #[cfg(not(feature = "hydrate"))]
                let _ = link;
            }
            Err(msg) => info.set(msg.to_owned()),
        }
    };

    view! {
        <section class="page">
            <h1>"Contact us"</h1>
            <form class="form" on:submit=on_submit>
                <input
                    class="form__input"
                    type="text"
                    placeholder="Your name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="form__input"
                    type="email"
                    placeholder="you@company.mh"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <textarea
                    class="form__input form__input--tall"
                    placeholder="How can we help?"
                    prop:value=move || message.get()
                    on:input=move |ev| message.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit">"Send"</button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="notice">{move || info.get()}</p>
            </Show>
        </section>
    }
}
