//! Reactive client state shared through Leptos context.
//!
//! DESIGN
//! ======
//! `session` is app-wide and provided once by `App`. `records` is per page:
//! each page owns its own `RwSignal<Records<T>>`.

pub mod records;
pub mod session;
