//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shells` wraps every route in the session-selected layout; the rest are
//! small presentational pieces shared by several pages.

pub mod leave_table;
pub mod shells;
pub mod stat_card;
