//! Browser implementation of the identity provider.
//!
//! Client-side (hydrate): `gloo-net` calls to `/api/auth/*`, which the server
//! gateway forwards to the hosted backend.
//! Server-side (SSR): stubs. The probe resolves to "no session" so SSR always
//! renders the loading shell and hydration decides.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use async_trait::async_trait;
use session::{Credentials, IdentityProvider, Registration, SessionError, UserProfile};

#[cfg(any(test, feature = "hydrate"))]
const ME_ENDPOINT: &str = "/api/auth/me";
#[cfg(any(test, feature = "hydrate"))]
const LOGIN_ENDPOINT: &str = "/api/auth/login";
#[cfg(any(test, feature = "hydrate"))]
const REGISTER_ENDPOINT: &str = "/api/auth/register";
#[cfg(any(test, feature = "hydrate"))]
const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
#[cfg(any(test, feature = "hydrate"))]
const RESET_PASSWORD_ENDPOINT: &str = "/api/auth/reset-password";

/// Turn a non-success response into a [`SessionError::Rejected`], preferring
/// the backend's `message` or `error` field over the raw body.
#[cfg(any(test, feature = "hydrate"))]
fn rejection(status: u16, body: &str) -> SessionError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() { format!("request failed: {status}") } else { trimmed.to_owned() }
        });
    SessionError::Rejected { status, message }
}

/// `401`/`403` on the probe mean "no session", not a failure.
#[cfg(any(test, feature = "hydrate"))]
fn is_signed_out_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

#[cfg(feature = "hydrate")]
fn transport(e: impl std::fmt::Display) -> SessionError {
    SessionError::Provider(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize>(path: &str, body: &B) -> Result<gloo_net::http::Response, SessionError> {
    gloo_net::http::Request::post(path)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)
}

#[cfg(feature = "hydrate")]
async fn expect_ok(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, SessionError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(rejection(status, &body))
}

/// Identity provider backed by the hosted backend's auth endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostedIdentity;

#[async_trait(?Send)]
impl IdentityProvider for HostedIdentity {
    async fn get_user(&self) -> Result<Option<UserProfile>, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(ME_ENDPOINT).send().await.map_err(transport)?;
            if is_signed_out_status(resp.status()) {
                return Ok(None);
            }
            let resp = expect_ok(resp).await?;
            resp.json::<UserProfile>().await.map(Some).map_err(transport)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = expect_ok(post_json(LOGIN_ENDPOINT, credentials).await?).await?;
            resp.json::<UserProfile>().await.map_err(transport)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(SessionError::Provider("not available on server".to_owned()))
        }
    }

    async fn sign_up(&self, registration: &Registration) -> Result<UserProfile, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = expect_ok(post_json(REGISTER_ENDPOINT, registration).await?).await?;
            resp.json::<UserProfile>().await.map_err(transport)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
            Err(SessionError::Provider("not available on server".to_owned()))
        }
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await.map_err(transport)?;
            expect_ok(resp).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(())
        }
    }

    async fn reset_password(&self, email: &str) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email });
            expect_ok(post_json(RESET_PASSWORD_ENDPOINT, &payload).await?).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(SessionError::Provider("not available on server".to_owned()))
        }
    }
}
