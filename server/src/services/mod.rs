//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the logic behind local endpoints so route handlers
//! stay focused on protocol translation, rate limiting and status mapping.

pub mod invoke;
