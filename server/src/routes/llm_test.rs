use super::*;
use crate::llm::LlmChat;
use crate::llm::types::{ChatRequest, ChatResponse, ContentBlock, LlmError};
use crate::rate_limit::RateLimitConfig;
use crate::state::test_helpers;
use std::sync::Arc;
use std::time::Duration;

/// Always answers with the same text.
struct EchoLlm;

#[async_trait::async_trait]
impl LlmChat for EchoLlm {
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let text = match request.messages.first().map(|m| &m.content) {
            Some(crate::llm::types::Content::Text(t)) => format!("echo: {t}"),
            _ => String::new(),
        };
        Ok(ChatResponse {
            content: vec![ContentBlock::Text { text }],
            model: "echo".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 0,
            output_tokens: 0,
        })
    }
}

fn limits(per_client: usize) -> RateLimitConfig {
    RateLimitConfig {
        per_client_limit: per_client,
        per_client_window: Duration::from_secs(60),
        global_limit: 100,
        global_window: Duration::from_secs(60),
    }
}

fn request(prompt: &str) -> Json<LlmInvokeRequest> {
    Json(LlmInvokeRequest { prompt: prompt.into(), system: None, response_json_schema: None })
}

fn peer(ip: &str) -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::new(ip.parse().unwrap(), 40_000))
}

fn forwarded_for(ip: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", ip.parse().unwrap());
    headers
}

#[tokio::test]
async fn returns_text_output() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(EchoLlm), limits(5));
    let Json(out) = invoke_llm(State(state), peer("10.0.0.1"), HeaderMap::new(), request("hello")).await.unwrap();
    assert_eq!(out, LlmOutput::Text { text: "echo: hello".into() });
}

#[tokio::test]
async fn unconfigured_llm_is_503() {
    let state = test_helpers::test_app_state();
    let (status, Json(body)) = invoke_llm(State(state), peer("10.0.0.1"), HeaderMap::new(), request("hello")).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn rate_limited_caller_gets_429() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(EchoLlm), limits(1));
    invoke_llm(State(state.clone()), peer("10.0.0.1"), HeaderMap::new(), request("one")).await.unwrap();

    let (status, _) = invoke_llm(State(state.clone()), peer("10.0.0.1"), HeaderMap::new(), request("two")).await.unwrap_err();
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // A different caller is unaffected.
    assert!(invoke_llm(State(state), peer("10.0.0.2"), HeaderMap::new(), request("three")).await.is_ok());
}

#[tokio::test]
async fn rotating_forwarded_for_does_not_escape_limit() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(EchoLlm), limits(1));
    invoke_llm(State(state.clone()), peer("10.0.0.1"), forwarded_for("203.0.113.1"), request("one"))
        .await
        .unwrap();

    for spoofed in ["203.0.113.2", "203.0.113.3", "198.51.100.4"] {
        let (status, _) = invoke_llm(State(state.clone()), peer("10.0.0.1"), forwarded_for(spoofed), request("again"))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS, "spoofed {spoofed} should not reset the limit");
    }
}

#[tokio::test]
async fn trusted_proxy_keys_on_forwarded_caller() {
    let mut state = test_helpers::test_app_state_with_llm(Arc::new(EchoLlm), limits(1));
    state.trust_proxy = true;
    invoke_llm(State(state.clone()), peer("10.0.0.1"), forwarded_for("203.0.113.1"), request("one"))
        .await
        .unwrap();

    // Same proxy peer, different upstream caller.
    assert!(
        invoke_llm(State(state), peer("10.0.0.1"), forwarded_for("203.0.113.2"), request("two"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn blank_prompt_is_400() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(EchoLlm), limits(5));
    let (status, _) = invoke_llm(State(state), peer("10.0.0.1"), HeaderMap::new(), request(" ")).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn provider_failures_map_to_502() {
    let err = InvokeError::Llm(LlmError::ApiRequest("timeout".into()));
    assert_eq!(invoke_error_status(&err), StatusCode::BAD_GATEWAY);
    assert_eq!(invoke_error_status(&InvokeError::NotJson), StatusCode::BAD_GATEWAY);
}
