//! Sign-in page: email/password sign in, account creation and password reset.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::{Credentials, Registration, SessionError};

use crate::state::session::use_session;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    SignIn,
    SignUp,
    Reset,
}

impl Mode {
    fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Create your account",
            Self::Reset => "Reset password",
        }
    }
}

fn validate_sign_in(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

fn validate_sign_up(full_name: &str, company: &str, email: &str, password: &str) -> Result<Registration, &'static str> {
    let full_name = full_name.trim();
    let email = email.trim();
    if full_name.is_empty() || email.is_empty() {
        return Err("Enter your name and email.");
    }
    if password.chars().count() < 8 {
        return Err("Use a password of at least 8 characters.");
    }
    let company = company.trim();
    Ok(Registration {
        email: email.to_owned(),
        password: password.to_owned(),
        full_name: full_name.to_owned(),
        company_name: (!company.is_empty()).then(|| company.to_owned()),
    })
}

/// Message shown under the form. Provider detail is shown only for
/// rejections, where the backend wrote it for people.
fn failure_message(err: &SessionError) -> String {
    match err {
        SessionError::Rejected { status: 401 | 403, .. } => "Email or password is incorrect.".to_owned(),
        SessionError::Rejected { message, .. } => message.clone(),
        SessionError::InvalidInput(detail) => format!("Check the form: {detail}."),
        SessionError::Provider(_) | SessionError::Timeout(_) => {
            "We could not reach the sign-in service. Try again shortly.".to_owned()
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let mode = RwSignal::new(Mode::default());
    let full_name = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let switch_mode = move |next: Mode| {
        mode.set(next);
        info.set(String::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        match mode.get() {
            Mode::SignIn => {
                let credentials = match validate_sign_in(&email.get(), &password.get()) {
                    Ok(c) => c,
                    Err(msg) => {
                        info.set(msg.to_owned());
                        return;
                    }
                };
                busy.set(true);
                info.set("Signing in...".to_owned());
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    let controller = crate::util::browser::session_controller(session);
                    if let Err(e) = controller.sign_in(&credentials).await {
                        info.set(failure_message(&e));
                    }
                    busy.set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                let _ = (credentials, session);
            }
            Mode::SignUp => {
                let registration =
                    match validate_sign_up(&full_name.get(), &company.get(), &email.get(), &password.get()) {
                        Ok(r) => r,
                        Err(msg) => {
                            info.set(msg.to_owned());
                            return;
                        }
                    };
                busy.set(true);
                info.set("Creating your account...".to_owned());
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    let controller = crate::util::browser::session_controller(session);
                    if let Err(e) = controller.sign_up(&registration).await {
                        info.set(failure_message(&e));
                    }
                    busy.set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                let _ = (registration, session);
            }
            Mode::Reset => {
                let email_value = email.get().trim().to_owned();
                if email_value.is_empty() {
                    info.set("Enter your email first.".to_owned());
                    return;
                }
                busy.set(true);
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    let controller = crate::util::browser::session_controller(session);
                    match controller.reset_password(&email_value).await {
                        Ok(()) => info.set("If that address has an account, a reset link is on its way.".to_owned()),
                        Err(e) => info.set(failure_message(&e)),
                    }
                    busy.set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                let _ = (email_value, session);
            }
        }
    };

    let on_guest = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::util::browser::session_controller(session).switch_to_guest_mode().await;
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"IAKWE HR"</h1>
                <p class="login-card__subtitle">{move || mode.get().title()}</p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::SignUp>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Company (optional)"
                            prop:value=move || company.get()
                            on:input=move |ev| company.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@company.mh"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() != Mode::Reset>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().title()}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-links">
                    <Show
                        when=move || mode.get() == Mode::SignIn
                        fallback=move || {
                            view! {
                                <button class="link-button" on:click=move |_| switch_mode(Mode::SignIn)>
                                    "Back to sign in"
                                </button>
                            }
                        }
                    >
                        <button class="link-button" on:click=move |_| switch_mode(Mode::SignUp)>
                            "Create an account"
                        </button>
                        <button class="link-button" on:click=move |_| switch_mode(Mode::Reset)>
                            "Forgot password?"
                        </button>
                    </Show>
                </div>
                <div class="login-divider"></div>
                <button class="login-button login-button--secondary" on:click=on_guest>
                    "Browse as guest"
                </button>
            </div>
        </div>
    }
}
