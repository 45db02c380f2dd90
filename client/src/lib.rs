//! # client
//!
//! Leptos + WASM frontend for IAKWE HR.
//!
//! This crate contains the route shells, pages, reactive state, network
//! helpers and browser adapters. Session rules (guest-by-default, logout
//! cleanup, shell selection, roles) come from the `session` crate; this crate
//! wires them to signals, `localStorage`/`sessionStorage`, cookies and the
//! router.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
