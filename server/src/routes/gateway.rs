//! Backend gateway — relays `/api/*` calls to the hosted backend.
//!
//! DESIGN
//! ======
//! The browser only ever talks to this origin, so auth cookies set by the
//! backend are first-party. Requests keep their method, path, query and body
//! plus an allow-list of headers; responses keep status, body and the
//! headers the client depends on (`content-type`, `set-cookie`, `location`).

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderName, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{debug, warn};

use crate::state::AppState;

static FORWARDED_REQUEST_HEADERS: [HeaderName; 4] = [COOKIE, AUTHORIZATION, CONTENT_TYPE, ACCEPT];
static RELAYED_RESPONSE_HEADERS: [HeaderName; 3] = [CONTENT_TYPE, SET_COOKIE, LOCATION];

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("backend not configured")]
    NotConfigured,
    #[error("backend unreachable: {0}")]
    Upstream(String),
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::NotConfigured => "backend not configured",
            Self::Upstream(_) => "backend unavailable",
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

/// `ANY /api/{*path}` — forward to `IAKWE_BACKEND_URL`.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let Some(backend) = state.backend_url.as_deref() else {
        return Err(GatewayError::NotConfigured);
    };
    let url = upstream_url(backend, &uri);
    debug!(%method, %url, "gateway forward");

    let upstream = state
        .http
        .request(method, &url)
        .headers(forwarded_headers(&headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, %url, "gateway request failed");
            GatewayError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    let relayed = relayed_headers(upstream.headers());
    let bytes = upstream.bytes().await.map_err(|e| {
        warn!(error = %e, %url, "gateway body read failed");
        GatewayError::Upstream(e.to_string())
    })?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = relayed;
    Ok(response)
}

/// Backend URL for an incoming request: backend base + original path and query.
fn upstream_url(backend: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!("{}{path_and_query}", backend.trim_end_matches('/'))
}

fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    copy_headers(incoming, &FORWARDED_REQUEST_HEADERS)
}

fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    copy_headers(upstream, &RELAYED_RESPONSE_HEADERS)
}

/// Copy every value of each allowed header, keeping repeats like `set-cookie`.
fn copy_headers(source: &HeaderMap, allowed: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in allowed {
        for value in source.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}
