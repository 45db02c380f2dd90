//! Client session model for IAKWE HR.
//!
//! This crate owns the authentication / guest-mode state machine used by the
//! browser client: the session state and its reducer, the controller that
//! drives transitions against an identity provider, the route shell selector,
//! best-effort storage cleanup, and the enumerated role model.
//!
//! It has no browser dependencies. Everything external (identity provider,
//! storage areas, cookies, navigation, timers) is reached through traits so
//! the guest-by-default policy can be exercised in plain unit tests.

pub mod controller;
pub mod error;
pub mod platform;
pub mod provider;
pub mod role;
pub mod shell;
pub mod state;
pub mod storage;
pub mod store;

pub use controller::{SessionConfig, SessionController, SessionServices};
pub use error::{RoleError, SessionError, StorageError};
pub use platform::{Navigator, Timer};
pub use provider::{AuthEvent, Credentials, IdentityProvider, Registration, UserProfile};
pub use role::Role;
pub use shell::{Page, Shell, ShellInputs, select_shell};
pub use state::{SessionAction, SessionPhase, SessionState, reduce};
pub use storage::{CleanupReport, CleanupTarget, CookieJar, KeyValueStore, StorageArea};
pub use store::{MemorySessionStore, SessionStore};
