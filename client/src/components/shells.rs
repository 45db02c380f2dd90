//! Route layout and the six presentational shells.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route renders through [`Layout`], which asks the session crate's
//! pure selector which shell applies and re-renders when the session signal
//! changes. Shells own navigation chrome and session actions (sign in,
//! browse as guest, log out); pages only render content.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use session::{Page, Role, Shell, ShellInputs, UserProfile, select_shell};

use crate::state::session::use_session;

/// Pages linked from the authenticated navigation bar, in order.
const MEMBER_NAV: [Page; 6] =
    [Page::Dashboard, Page::Employees, Page::LeaveRequests, Page::Policies, Page::Training, Page::Assistant];

/// Pages a guest can browse read-only.
const GUEST_NAV: [Page; 5] = [Page::GuestDashboard, Page::Employees, Page::LeaveRequests, Page::Policies, Page::Training];

const PUBLIC_NAV: [Page; 3] = [Page::About, Page::Pricing, Page::Contact];

fn nav_label(page: Page) -> &'static str {
    match page {
        Page::Landing => "Home",
        Page::About => "About",
        Page::Pricing => "Pricing",
        Page::Contact => "Contact",
        Page::Login => "Sign in",
        Page::GuestDashboard | Page::Dashboard => "Dashboard",
        Page::Employees => "Employees",
        Page::LeaveRequests => "Leave",
        Page::Policies => "Policies",
        Page::Training => "Training",
        Page::Assistant => "Assistant",
    }
}

fn nav_links(pages: &'static [Page], current: Page) -> impl IntoView {
    pages
        .iter()
        .map(|&page| {
            let class = if page == current { "nav__link nav__link--active" } else { "nav__link" };
            view! { <a class=class href=page.path()>{nav_label(page)}</a> }
        })
        .collect_view()
}

/// Wraps `children` in whichever shell the session state selects for `page`.
#[component]
pub fn Layout(page: Page, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let shell = Memo::new(move |_| select_shell(ShellInputs::new(&session.state.get(), page)));

    move || {
        let children = children.clone();
        match shell.get() {
            Shell::Loading => view! { <LoadingShell/> }.into_any(),
            Shell::Logout => view! { <LogoutShell/> }.into_any(),
            Shell::Public => view! { <PublicShell page=page>{children()}</PublicShell> }.into_any(),
            Shell::Guest => view! { <GuestShell page=page>{children()}</GuestShell> }.into_any(),
            Shell::Authenticated => {
                view! { <AuthenticatedShell page=page>{children()}</AuthenticatedShell> }.into_any()
            }
            Shell::Fallback => view! { <FallbackShell/> }.into_any(),
        }
    }
}

#[component]
fn LoadingShell() -> impl IntoView {
    view! {
        <div class="shell shell--centered">
            <div class="spinner" aria-hidden="true"></div>
            <p class="shell__message">"Checking your session..."</p>
        </div>
    }
}

#[component]
fn LogoutShell() -> impl IntoView {
    view! {
        <div class="shell shell--centered">
            <div class="spinner" aria-hidden="true"></div>
            <p class="shell__message">"Signing you out..."</p>
        </div>
    }
}

#[component]
fn PublicShell(page: Page, children: Children) -> impl IntoView {
    let session = use_session();

    let on_browse_as_guest = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::util::browser::session_controller(session).switch_to_guest_mode().await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = session;
    };

    view! {
        <div class="shell shell--public">
            <header class="topbar">
                <a class="topbar__brand" href="/">"IAKWE HR"</a>
                <nav class="nav">{nav_links(&PUBLIC_NAV, page)}</nav>
                <div class="topbar__actions">
                    <button class="btn btn--ghost" on:click=on_browse_as_guest>
                        "Browse as guest"
                    </button>
                    <a class="btn btn--primary" href=Page::Login.path()>"Sign in"</a>
                </div>
            </header>
            <main class="shell__content">{children()}</main>
            <footer class="footer">
                <span>"IAKWE HR · Built for employers in the Marshall Islands"</span>
            </footer>
        </div>
    }
}

#[component]
fn GuestShell(page: Page, children: Children) -> impl IntoView {
    let session = use_session();

    let on_sign_in = move |_| {
        #[cfg(feature = "hydrate")]
        crate::util::browser::session_controller(session).login();
        #[cfg(not(feature = "hydrate"))]
        let _ = session;
    };

    view! {
        <div class="shell shell--guest">
            <div class="guest-banner" role="status">
                <span>"You are browsing sample data in read-only guest mode."</span>
                <button class="btn btn--primary btn--small" on:click=on_sign_in>
                    "Sign in to manage your team"
                </button>
            </div>
            <header class="topbar">
                <a class="topbar__brand" href="/">"IAKWE HR"</a>
                <nav class="nav">{nav_links(&GUEST_NAV, page)}</nav>
            </header>
            <main class="shell__content">{children()}</main>
        </div>
    }
}

#[component]
fn AuthenticatedShell(page: Page, children: Children) -> impl IntoView {
    let session = use_session();
    let menu_open = RwSignal::new(false);

    let user_name = move || {
        session
            .state
            .get()
            .user
            .as_ref()
            .map_or_else(String::new, |u| u.display_name().to_owned())
    };
    let user_role = move || {
        session
            .state
            .get()
            .user
            .as_ref()
            .and_then(UserProfile::role)
            .map_or("Member", Role::label)
    };

    let on_logout = move |_| {
        menu_open.set(false);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let report = crate::util::browser::session_controller(session).logout().await;
            if !report.is_clean() {
                leptos::logging::warn!("logout left {} items behind", report.failures().count());
            }
        });
    };

    let on_browse_as_guest = move |_| {
        menu_open.set(false);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::util::browser::session_controller(session).switch_to_guest_mode().await;
        });
    };

    view! {
        <div class="shell shell--member">
            <header class="topbar">
                <a class="topbar__brand" href=Page::Dashboard.path()>"IAKWE HR"</a>
                <nav class="nav">{nav_links(&MEMBER_NAV, page)}</nav>
                <div class="user-menu">
                    <button class="user-menu__toggle" on:click=move |_| menu_open.update(|open| *open = !*open)>
                        <span class="user-menu__name">{user_name}</span>
                        <span class="user-menu__role">{user_role}</span>
                    </button>
                    <Show when=move || menu_open.get()>
                        <div class="user-menu__dropdown">
                            <button class="user-menu__item" on:click=on_browse_as_guest>
                                "Browse as guest"
                            </button>
                            <button class="user-menu__item user-menu__item--danger" on:click=on_logout>
                                "Log out"
                            </button>
                        </div>
                    </Show>
                </div>
            </header>
            <main class="shell__content">{children()}</main>
        </div>
    }
}

/// Neither guest nor signed in on a member page: send the visitor to sign in.
#[component]
fn FallbackShell() -> impl IntoView {
    let session = use_session();

    Effect::new(move || {
        crate::util::browser::session_controller(session).login();
    });

    view! {
        <div class="shell shell--centered">
            <p class="shell__message">"Redirecting to sign in..."</p>
            <a class="btn btn--primary" href=Page::Login.path()>"Sign in"</a>
        </div>
    }
}
