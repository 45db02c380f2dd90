//! Navigation and timer seams used by the controller.

use std::time::Duration;

use async_trait::async_trait;

/// Page navigation.
pub trait Navigator {
    /// In-app route change; client state survives.
    fn navigate(&self, path: &str);

    /// Full document load; all in-memory state is discarded.
    fn hard_navigate(&self, url: &str);
}

/// Async sleep used to bound the auth probe.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}
