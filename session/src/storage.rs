//! Browser storage seams and best-effort logout cleanup.
//!
//! DESIGN
//! ======
//! Logout clears every local-storage key, every session-storage key and every
//! cookie, one item at a time. A failure on one item never stops the sweep;
//! each attempt is recorded as a `Result` in the [`CleanupReport`] so callers
//! and tests can see exactly which items survived.
//!
//! The force-guest flag lives in session storage and is consumed on read.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::StorageError;

/// Session-storage key of the one-shot force-guest flag.
pub const FORCE_GUEST_KEY: &str = "iakwe_force_guest";

/// A string key/value area (`localStorage` or `sessionStorage`).
pub trait KeyValueStore {
    /// All keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the area cannot be reached.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the area cannot be reached.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError::Write`] when the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError::Remove`] when the key cannot be deleted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Cookies visible to the page.
pub trait CookieJar {
    /// Names of all visible cookies.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when cookies cannot be read.
    fn names(&self) -> Result<Vec<String>, StorageError>;

    /// Expire a cookie by name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Remove`] when the cookie cannot be expired.
    fn expire(&self, name: &str) -> Result<(), StorageError>;
}

// =============================================================================
// CLEANUP REPORT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
    Cookies,
}

impl StorageArea {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
            Self::Cookies => "cookies",
        }
    }
}

/// What a cleanup attempt touched. `key` is `None` when the area itself could
/// not be enumerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanupTarget {
    pub area: StorageArea,
    pub key: Option<String>,
}

impl fmt::Display for CleanupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.area.as_str(), self.key.as_deref().unwrap_or("*"))
    }
}

/// Per-item outcome of [`clear_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub outcomes: Vec<(CleanupTarget, Result<(), StorageError>)>,
}

impl CleanupReport {
    /// Record one attempt, logging it when it failed.
    pub fn record(&mut self, area: StorageArea, key: Option<String>, result: Result<(), StorageError>) {
        let target = CleanupTarget { area, key };
        if let Err(e) = &result {
            log::warn!("cleanup of {target} failed: {e}");
        }
        self.outcomes.push((target, result));
    }

    /// Targets whose removal failed.
    pub fn failures(&self) -> impl Iterator<Item = (&CleanupTarget, &StorageError)> {
        self.outcomes
            .iter()
            .filter_map(|(target, result)| result.as_ref().err().map(|e| (target, e)))
    }

    /// Number of items removed successfully.
    #[must_use]
    pub fn cleared(&self) -> usize {
        self.outcomes.iter().filter(|(_, result)| result.is_ok()).count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Remove every key from both storage areas and expire every cookie.
pub fn clear_all(local: &dyn KeyValueStore, session: &dyn KeyValueStore, cookies: &dyn CookieJar) -> CleanupReport {
    let mut report = CleanupReport::default();
    clear_store(StorageArea::Local, local, &mut report);
    clear_store(StorageArea::Session, session, &mut report);
    match cookies.names() {
        Ok(names) => {
            for name in names {
                let result = cookies.expire(&name);
                report.record(StorageArea::Cookies, Some(name), result);
            }
        }
        Err(e) => report.record(StorageArea::Cookies, None, Err(e)),
    }
    report
}

fn clear_store(area: StorageArea, store: &dyn KeyValueStore, report: &mut CleanupReport) {
    match store.keys() {
        Ok(keys) => {
            for key in keys {
                let result = store.remove(&key);
                report.record(area, Some(key), result);
            }
        }
        Err(e) => report.record(area, None, Err(e)),
    }
}

// =============================================================================
// FORCE-GUEST FLAG
// =============================================================================

/// Arm the one-shot force-guest flag.
///
/// # Errors
///
/// Returns an error if the flag cannot be written.
pub fn set_force_guest(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.set(FORCE_GUEST_KEY, "true")
}

/// Read and consume the force-guest flag. Unreadable storage counts as unset.
pub fn take_force_guest(store: &dyn KeyValueStore) -> bool {
    match store.get(FORCE_GUEST_KEY) {
        Ok(Some(_)) => {
            if let Err(e) = store.remove(FORCE_GUEST_KEY) {
                log::warn!("could not consume force-guest flag: {e}");
            }
            true
        }
        Ok(None) => false,
        Err(e) => {
            log::warn!("could not read force-guest flag: {e}");
            false
        }
    }
}

// =============================================================================
// IN-MEMORY IMPLEMENTATIONS
// =============================================================================

/// In-memory [`KeyValueStore`] with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    stuck: RefCell<BTreeSet<String>>,
    unavailable: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation reports [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    /// Make removal of `key` fail from now on.
    pub fn fail_removal_of(&self, key: &str) {
        self.stuck.borrow_mut().insert(key.to_owned());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.borrow().keys().cloned().collect())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        if self.stuck.borrow().contains(key) {
            return Err(StorageError::Remove { key: key.to_owned(), reason: "quota or security error".to_owned() });
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// In-memory [`CookieJar`] with failure injection.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    names: RefCell<BTreeSet<String>>,
    stuck: RefCell<BTreeSet<String>>,
}

impl MemoryCookieJar {
    #[must_use]
    pub fn with_cookies(names: &[&str]) -> Self {
        let jar = Self::default();
        jar.names.borrow_mut().extend(names.iter().map(|n| (*n).to_owned()));
        jar
    }

    /// Make expiry of `name` fail from now on (e.g. an `HttpOnly` cookie).
    pub fn fail_expiry_of(&self, name: &str) {
        self.stuck.borrow_mut().insert(name.to_owned());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.borrow().is_empty()
    }
}

impl CookieJar for MemoryCookieJar {
    fn names(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.names.borrow().iter().cloned().collect())
    }

    fn expire(&self, name: &str) -> Result<(), StorageError> {
        if self.stuck.borrow().contains(name) {
            return Err(StorageError::Remove { key: name.to_owned(), reason: "cookie is not script-visible".to_owned() });
        }
        self.names.borrow_mut().remove(name);
        Ok(())
    }
}
