//! OpenAI-compatible Chat Completions client.
//!
//! Works against any `/chat/completions` endpoint that accepts bearer auth,
//! selected by `LLM_OPENAI_BASE_URL`.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatRequest, ChatResponse, Content, ContentBlock, LlmError, Message, Tool};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub async fn chat(&self, model: &str, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let msgs = build_messages(request.system, request.messages);
        let tool_defs: Option<Vec<CcToolDef<'_>>> = request
            .tools
            .map(|t| t.iter().map(CcToolDef::from).collect());
        let body = CcRequest {
            model,
            max_tokens: request.max_tokens,
            messages: &msgs,
            tools: tool_defs.as_deref(),
            tool_choice: request.force_tool.map(CcToolChoice::named),
        };
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [CcMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [CcToolDef<'a>]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<CcToolChoice<'a>>,
}

#[derive(Serialize)]
struct CcMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<CcToolCall>>,
}

#[derive(Serialize)]
struct CcToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: &'static str,
    function: CcFunctionCall,
}

#[derive(Serialize)]
struct CcFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct CcToolDef<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: CcFunctionDef<'a>,
}

#[derive(Serialize)]
struct CcFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

impl<'a> From<&'a Tool> for CcToolDef<'a> {
    fn from(tool: &'a Tool) -> Self {
        Self {
            tool_type: "function",
            function: CcFunctionDef {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.input_schema,
            },
        }
    }
}

#[derive(Serialize)]
struct CcToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'static str,
    function: CcToolChoiceName<'a>,
}

#[derive(Serialize)]
struct CcToolChoiceName<'a> {
    name: &'a str,
}

impl<'a> CcToolChoice<'a> {
    fn named(name: &'a str) -> Self {
        Self { choice_type: "function", function: CcToolChoiceName { name } }
    }
}

fn build_messages(system: &str, messages: &[Message]) -> Vec<CcMessage> {
    let mut out = Vec::new();
    if !system.trim().is_empty() {
        out.push(CcMessage { role: "system".to_string(), content: Some(system.to_string()), tool_calls: None });
    }
    for message in messages {
        match &message.content {
            Content::Text(text) => {
                out.push(CcMessage { role: message.role.clone(), content: Some(text.clone()), tool_calls: None });
            }
            Content::Blocks(blocks) => {
                let mut text = String::new();
                let mut tool_calls = Vec::new();
                for block in blocks {
                    match block {
                        ContentBlock::Text { text: t } => text.push_str(t),
                        ContentBlock::ToolUse { id, name, input } => {
                            tool_calls.push(CcToolCall {
                                id: id.clone(),
                                call_type: "function",
                                function: CcFunctionCall { name: name.clone(), arguments: input.to_string() },
                            });
                        }
                        ContentBlock::Thinking { .. } | ContentBlock::Unknown => {}
                    }
                }
                if !text.is_empty() || !tool_calls.is_empty() {
                    out.push(CcMessage {
                        role: message.role.clone(),
                        content: (!text.is_empty()).then_some(text),
                        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                    });
                }
            }
        }
    }
    out
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let usage = |field: &str| {
        root.get("usage")
            .and_then(|u| u.get(field))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("stop");
    let message = choice.get("message").cloned().unwrap_or(Value::Null);

    let mut content = Vec::new();
    if let Some(text) = message.get("content").and_then(Value::as_str) {
        if !text.is_empty() {
            content.push(ContentBlock::Text { text: text.to_string() });
        }
    }

    if let Some(tool_calls) = message.get("tool_calls").and_then(Value::as_array) {
        for call in tool_calls {
            let Some(name) = call
                .get("function")
                .and_then(|f| f.get("name"))
                .and_then(Value::as_str)
            else {
                continue;
            };
            let Some(id) = call.get("id").and_then(Value::as_str).map(str::to_owned) else {
                return Err(LlmError::ApiParse("chat_completions: tool call missing id".to_string()));
            };
            let args = call
                .get("function")
                .and_then(|f| f.get("arguments"))
                .and_then(Value::as_str)
                .unwrap_or("{}");
            let input =
                serde_json::from_str::<Value>(args).unwrap_or_else(|_| Value::Object(serde_json::Map::default()));
            content.push(ContentBlock::ToolUse { id, name: name.to_string(), input });
        }
    }

    let stop_reason = if content
        .iter()
        .any(|block| matches!(block, ContentBlock::ToolUse { .. }))
    {
        "tool_use"
    } else if finish_reason == "length" {
        "max_tokens"
    } else {
        "end_turn"
    };

    Ok(ChatResponse {
        content,
        model,
        stop_reason: stop_reason.to_string(),
        input_tokens: usage("prompt_tokens"),
        output_tokens: usage("completion_tokens"),
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
