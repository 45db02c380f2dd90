//! Server process configuration read from environment variables.
//!
//! `.env` is loaded by `main` before this runs, so values may come from
//! either source.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Hosted backend base URL without a trailing slash. `None` disables the
    /// gateway routes.
    pub backend_url: Option<String>,
    pub gateway_timeout: Duration,
    /// Read the caller IP from `x-real-ip`/`x-forwarded-for`. Only safe
    /// behind a reverse proxy that overwrites those headers.
    pub trust_proxy: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// - `PORT`: default 3000
    /// - `IAKWE_BACKEND_URL`: hosted backend base URL
    /// - `GATEWAY_TIMEOUT_SECS`: default 30
    /// - `TRUST_PROXY`: `true`/`1` to key rate limits on forwarded headers
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let backend_url = lookup("IAKWE_BACKEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let gateway_timeout_secs = lookup("GATEWAY_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_GATEWAY_TIMEOUT_SECS);
        let trust_proxy = lookup("TRUST_PROXY")
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
        Self { port, backend_url, gateway_timeout: Duration::from_secs(gateway_timeout_secs), trust_proxy }
    }
}
