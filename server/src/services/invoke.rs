//! LLM invoke service — one prompt in, text or schema-shaped JSON out.
//!
//! DESIGN
//! ======
//! Plain prompts return the model's text. When the caller supplies a
//! `response_json_schema`, the model is handed a single `respond` tool whose
//! input schema is that schema and is forced to call it; the tool input is
//! the answer. Models that ignore the forced call and answer in text still
//! succeed when the text parses as JSON.

#[cfg(test)]
#[path = "invoke_test.rs"]
mod invoke_test;

use client::net::types::{LlmInvokeRequest, LlmOutput};
use serde_json::Value;
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::types::{ChatRequest, LlmError, Message, Tool};

pub const RESPOND_TOOL: &str = "respond";
const MAX_TOKENS: u32 = 2048;
const DEFAULT_SYSTEM: &str = "You are a helpful HR assistant for businesses in the Republic of the Marshall Islands.";

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("response_json_schema must be a JSON object")]
    InvalidSchema,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("model did not return JSON")]
    NotJson,
}

/// Run one invoke request against `llm`.
///
/// # Errors
///
/// Rejects blank prompts and non-object schemas before calling the model;
/// otherwise surfaces provider failures and unparseable structured answers.
pub async fn invoke(llm: &dyn LlmChat, request: &LlmInvokeRequest) -> Result<LlmOutput, InvokeError> {
    if request.prompt.trim().is_empty() {
        return Err(InvokeError::EmptyPrompt);
    }
    let system = request
        .system
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SYSTEM);
    let messages = [Message::user(request.prompt.clone())];

    let Some(schema) = &request.response_json_schema else {
        let response = llm
            .chat(ChatRequest { max_tokens: MAX_TOKENS, system, messages: &messages, tools: None, force_tool: None })
            .await?;
        info!(model = %response.model, output_tokens = response.output_tokens, "llm invoke: text");
        return Ok(LlmOutput::Text { text: response.text() });
    };

    if !schema.is_object() {
        return Err(InvokeError::InvalidSchema);
    }
    let tools = [respond_tool(schema.clone())];
    let response = llm
        .chat(ChatRequest {
            max_tokens: MAX_TOKENS,
            system,
            messages: &messages,
            tools: Some(&tools),
            force_tool: Some(RESPOND_TOOL),
        })
        .await?;
    info!(model = %response.model, output_tokens = response.output_tokens, "llm invoke: json");

    if let Some(input) = response.tool_input(RESPOND_TOOL) {
        return Ok(LlmOutput::Json { value: input.clone() });
    }
    let text = response.text();
    match parse_json_text(&text) {
        Some(value) => Ok(LlmOutput::Json { value }),
        None => {
            warn!(stop_reason = %response.stop_reason, "llm invoke: no tool call and text is not JSON");
            Err(InvokeError::NotJson)
        }
    }
}

fn respond_tool(schema: Value) -> Tool {
    Tool {
        name: RESPOND_TOOL.to_string(),
        description: "Return the answer. The input must match the required structure exactly.".to_string(),
        input_schema: schema,
    }
}

/// Parse model text as JSON, tolerating a surrounding Markdown code fence.
fn parse_json_text(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim()).ok()
}
