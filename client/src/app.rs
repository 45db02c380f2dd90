//! Root application component with routing and the session context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides the session signals once; every route renders through
//! `Layout`, which picks the shell. `SessionBootstrap` sits inside the router
//! so it can apply navigations the session controller requests, and runs the
//! initial auth probe after hydration, then re-checks the session whenever
//! the tab becomes visible again.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::Page;

use crate::components::shells::Layout;
use crate::pages::{
    assistant::AssistantPage,
    dashboard::DashboardPage,
    employees::EmployeesPage,
    guest_dashboard::GuestDashboardPage,
    leave::LeaveRequestsPage,
    login::LoginPage,
    marketing::{AboutPage, ContactPage, LandingPage, PricingPage},
    policies::PoliciesPage,
    training::TrainingPage,
};
use crate::state::session::{SessionContext, use_session};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Applies controller-requested route changes and runs the mount-time auth
/// probe. Renders nothing.
#[component]
fn SessionBootstrap() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move || {
        session.pending.track();
        if let Some(path) = session.take_pending() {
            navigate(&path, NavigateOptions::default());
        }
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let phase = crate::util::browser::session_controller(session).check_auth_status().await;
        leptos::logging::log!("session ready: {phase:?}");
        crate::util::browser::watch_visibility(session);
    });
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(SessionContext::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/iakwe-hr.css"/>
        <Title text="IAKWE HR"/>

        <Router>
            <SessionBootstrap/>
            <Routes fallback=|| view! { <Layout page=Page::Landing><p>"Page not found."</p></Layout> }>
                <Route path=StaticSegment("") view=|| view! { <Layout page=Page::Landing><LandingPage/></Layout> }/>
                <Route path=StaticSegment("about") view=|| view! { <Layout page=Page::About><AboutPage/></Layout> }/>
                <Route
                    path=StaticSegment("pricing")
                    view=|| view! { <Layout page=Page::Pricing><PricingPage/></Layout> }
                />
                <Route
                    path=StaticSegment("contact")
                    view=|| view! { <Layout page=Page::Contact><ContactPage/></Layout> }
                />
                <Route path=StaticSegment("login") view=|| view! { <Layout page=Page::Login><LoginPage/></Layout> }/>
                <Route
                    path=StaticSegment("guest")
                    view=|| view! { <Layout page=Page::GuestDashboard><GuestDashboardPage/></Layout> }
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <Layout page=Page::Dashboard><DashboardPage/></Layout> }
                />
                <Route
                    path=StaticSegment("employees")
                    view=|| view! { <Layout page=Page::Employees><EmployeesPage/></Layout> }
                />
                <Route
                    path=StaticSegment("leave")
                    view=|| view! { <Layout page=Page::LeaveRequests><LeaveRequestsPage/></Layout> }
                />
                <Route
                    path=StaticSegment("policies")
                    view=|| view! { <Layout page=Page::Policies><PoliciesPage/></Layout> }
                />
                <Route
                    path=StaticSegment("training")
                    view=|| view! { <Layout page=Page::Training><TrainingPage/></Layout> }
                />
                <Route
                    path=StaticSegment("assistant")
                    view=|| view! { <Layout page=Page::Assistant><AssistantPage/></Layout> }
                />
            </Routes>
        </Router>
    }
}
