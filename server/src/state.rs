//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the outbound HTTP client for the backend gateway, the optional LLM
//! client, the invoke rate limiter and whether forwarded caller headers
//! are trusted. Everything is cheap to clone.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::LlmChat;
use crate::rate_limit::{RateLimitConfig, RateLimiter};

#[derive(Clone)]
pub struct AppState {
    /// Client for gateway requests. Redirects are relayed, never followed.
    pub http: reqwest::Client,
    pub backend_url: Option<Arc<str>>,
    pub llm: Option<Arc<dyn LlmChat>>,
    pub rate_limiter: RateLimiter,
    pub trust_proxy: bool,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the gateway HTTP client cannot be built.
    pub fn new(
        config: &ServerConfig,
        llm: Option<Arc<dyn LlmChat>>,
        rate_limits: RateLimitConfig,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.gateway_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            http,
            backend_url: config.backend_url.as_deref().map(Arc::from),
            llm,
            rate_limiter: RateLimiter::new(rate_limits),
            trust_proxy: config.trust_proxy,
        })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
