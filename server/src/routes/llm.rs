//! LLM integration route.

#[cfg(test)]
#[path = "llm_test.rs"]
mod llm_test;

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use client::net::types::{LlmInvokeRequest, LlmOutput};
use serde_json::{Value, json};
use tracing::warn;

use crate::rate_limit::caller_key;
use crate::services::invoke::{self, InvokeError};
use crate::state::AppState;

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// `POST /api/integrations/llm/invoke` — run a prompt, optionally with a
/// JSON schema for the answer.
pub async fn invoke_llm(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<LlmInvokeRequest>,
) -> Result<Json<LlmOutput>, ApiError> {
    let Some(llm) = state.llm.as_deref() else {
        return Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "AI features are not configured"));
    };

    let caller = caller_key(peer, &headers, state.trust_proxy);
    if let Err(e) = state.rate_limiter.check_and_record(&caller) {
        warn!(%caller, error = %e, "llm invoke rate limited");
        return Err(api_error(StatusCode::TOO_MANY_REQUESTS, e.to_string()));
    }

    invoke::invoke(llm, &request).await.map(Json).map_err(|e| {
        warn!(%caller, error = %e, "llm invoke failed");
        api_error(invoke_error_status(&e), e.to_string())
    })
}

fn invoke_error_status(err: &InvokeError) -> StatusCode {
    match err {
        InvokeError::EmptyPrompt | InvokeError::InvalidSchema => StatusCode::BAD_REQUEST,
        InvokeError::Llm(_) | InvokeError::NotJson => StatusCode::BAD_GATEWAY,
    }
}
