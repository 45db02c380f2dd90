//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and form/domain
//! rules from page and component logic so they can be unit tested.

pub mod assistant;
pub mod browser;
pub mod directory;
pub mod leave;
pub mod policy;
pub mod sample;
