//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR app, its `/pkg` assets, the local
//! LLM integration and the `/api/*` gateway to the hosted backend. Local
//! routes are registered as static paths, so they win over the gateway
//! wildcard.

pub mod gateway;
pub mod llm;


use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Health, integration and gateway routes.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/integrations/llm/invoke", post(llm::invoke_llm))
        .route("/api/{*path}", any(gateway::forward))
        .with_state(state)
}

/// Full application: API routes, Leptos SSR and static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
