//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped data loading and forms. Session chrome and
//! access decisions live in `components::shells::Layout`; pages only check
//! guest mode to switch to sample data and hide write actions.

pub mod assistant;
pub mod dashboard;
pub mod employees;
pub mod guest_dashboard;
pub mod leave;
pub mod login;
pub mod marketing;
pub mod policies;
pub mod training;

use leptos::prelude::*;

use crate::net::entities::Entity;
use crate::state::records::Records;
use crate::state::session::SessionContext;

/// Fill `records` from `T`'s collection, or from `sample` for guests.
fn load_records<T>(session: SessionContext, records: RwSignal<Records<T>>, sample: fn() -> Vec<T>, sort: Option<&'static str>)
where
    T: Entity + Send + Sync,
{
    if session.state.get_untracked().is_guest_mode {
        records.set(Records::Ready(sample()));
        return;
    }
    records.set(Records::Loading);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::entities::list::<T>(sort).await;
        if let Err(e) = &result {
            leptos::logging::warn!("loading {} failed: {e}", T::COLLECTION);
        }
        records.set(result.into());
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = sort;
}

/// Shared banner for a failed load.
fn load_error<T: Send + Sync + 'static>(records: RwSignal<Records<T>>) -> impl IntoView {
    move || {
        records.with(|r| r.error().is_some()).then(|| {
            view! { <p class="notice notice--error">"Something went wrong loading this page. Try again shortly."</p> }
        })
    }
}

fn is_guest(session: SessionContext) -> bool {
    session.state.get().is_guest_mode
}
