//! Networking modules for the hosted backend and local integrations.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` implements the session crate's provider over `/api/auth/*`,
//! `entities` is the generic collection CRUD, `integrations` covers uploads
//! and LLM calls, and `types` defines the shared wire schema.

pub mod entities;
pub mod identity;
pub mod integrations;
pub mod types;
