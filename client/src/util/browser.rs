//! Browser implementations of the session crate's platform seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `WebStorage` wraps `localStorage`/`sessionStorage`, `DocumentCookies`
//! wraps `document.cookie`, `SignalNavigator` hands route changes to the
//! router through context, and `BrowserTimer` bounds the auth probe.
//! `watch_visibility` re-checks the session when the tab comes back into
//! view, since the hosted provider has no push channel.
//! Outside the browser (SSR, tests) storage and cookies report
//! `StorageError::Unavailable` and the timer never fires.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use leptos::prelude::*;
use session::{
    CookieJar, KeyValueStore, Navigator, SessionConfig, SessionController, SessionServices, StorageArea,
    StorageError, Timer,
};

use crate::net::identity::HostedIdentity;
use crate::state::session::{PendingNavigation, SessionContext};

// =============================================================================
// STORAGE
// =============================================================================

/// `localStorage` or `sessionStorage`.
#[derive(Clone, Copy, Debug)]
pub struct WebStorage {
    area: StorageArea,
}

impl WebStorage {
    #[must_use]
    pub fn local() -> Self {
        Self { area: StorageArea::Local }
    }

    #[must_use]
    pub fn session() -> Self {
        Self { area: StorageArea::Session }
    }

    #[cfg(feature = "hydrate")]
    fn storage(self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = match self.area {
            StorageArea::Session => window.session_storage(),
            StorageArea::Local | StorageArea::Cookies => window.local_storage(),
        };
        storage.ok().flatten().ok_or(StorageError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
fn js_reason(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for WebStorage {
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = self.storage()?;
            let len = storage.length().map_err(|_| StorageError::Unavailable)?;
            // Collect first; removing while indexing would shift positions.
            Ok((0..len).filter_map(|i| storage.key(i).ok().flatten()).collect())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.storage()?.get_item(key).map_err(|_| StorageError::Unavailable)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write { key: key.to_owned(), reason: js_reason(&e) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Remove { key: key.to_owned(), reason: js_reason(&e) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}

// =============================================================================
// COOKIES
// =============================================================================

/// Names in a `document.cookie` string (`"a=1; b=2"`).
#[must_use]
pub fn parse_cookie_names(raw: &str) -> Vec<String> {
    raw.split(';')
        .filter_map(|pair| {
            let name = pair.split_once('=').map_or(pair, |(name, _)| name).trim();
            (!name.is_empty()).then(|| name.to_owned())
        })
        .collect()
}

/// Cookie assignment that expires `name` for the whole site.
#[must_use]
pub fn expiry_directive(name: &str) -> String {
    format!("{name}=; Max-Age=0; path=/")
}

/// Cookies readable through `document.cookie`. `HttpOnly` cookies are
/// invisible here and are cleared by the provider's sign-out instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookies;

#[cfg(feature = "hydrate")]
fn html_document() -> Result<web_sys::HtmlDocument, StorageError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or(StorageError::Unavailable)
}

impl CookieJar for DocumentCookies {
    fn names(&self) -> Result<Vec<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let raw = html_document()?.cookie().map_err(|_| StorageError::Unavailable)?;
            Ok(parse_cookie_names(&raw))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }

    fn expire(&self, name: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            html_document()?
                .set_cookie(&expiry_directive(name))
                .map_err(|e| StorageError::Remove { key: name.to_owned(), reason: js_reason(&e) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = name;
            Err(StorageError::Unavailable)
        }
    }
}

// =============================================================================
// NAVIGATION & TIMER
// =============================================================================

/// Navigator that parks soft navigations in [`PendingNavigation`] for the
/// router and performs hard navigations directly on `window.location`.
#[derive(Clone, Copy, Debug)]
pub struct SignalNavigator {
    pending: RwSignal<PendingNavigation>,
}

impl SignalNavigator {
    #[must_use]
    pub fn new(pending: RwSignal<PendingNavigation>) -> Self {
        Self { pending }
    }
}

impl Navigator for SignalNavigator {
    fn navigate(&self, path: &str) {
        self.pending.set(PendingNavigation(Some(path.to_owned())));
    }

    fn hard_navigate(&self, url: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let result = window.location().set_href(url).map_err(|e| js_reason(&e));
                self.settle_hard_navigation(url, result);
                return;
            }
        }
        // No document to reload; fall back to an in-app route change.
        self.navigate(url);
    }
}

impl SignalNavigator {
    /// A rejected `location.href` assignment degrades to a router navigation.
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn settle_hard_navigation(&self, url: &str, result: Result<(), String>) {
        if let Err(reason) = result {
            leptos::logging::warn!("hard navigation to {url} failed, using router: {reason}");
            self.navigate(url);
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = duration;
            std::future::pending::<()>().await;
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Session controller wired to the browser and the hosted identity provider.
#[must_use]
pub fn session_controller(ctx: SessionContext) -> SessionController {
    let services = SessionServices {
        store: Rc::new(ctx.store()),
        identity: Rc::new(HostedIdentity),
        local_storage: Rc::new(WebStorage::local()),
        session_storage: Rc::new(WebStorage::session()),
        cookies: Rc::new(DocumentCookies),
        navigator: Rc::new(SignalNavigator::new(ctx.pending)),
        timer: Rc::new(BrowserTimer),
    };
    SessionController::new(services, SessionConfig::default())
}

/// Run [`SessionController::resync`] each time the document becomes visible.
#[cfg(feature = "hydrate")]
pub fn watch_visibility(ctx: SessionContext) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let watched = document.clone();
    let on_change = Closure::<dyn FnMut()>::new(move || {
        if watched.hidden() {
            return;
        }
        leptos::task::spawn_local(async move {
            let phase = session_controller(ctx).resync().await;
            leptos::logging::log!("session resynced: {phase:?}");
        });
    });
    if let Err(e) = document.add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref()) {
        leptos::logging::warn!("session visibility watch not installed: {}", js_reason(&e));
        return;
    }
    // Lives as long as the page.
    on_change.forget();
}
