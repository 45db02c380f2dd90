use super::*;
use serde_json::json;

fn response(content: Vec<ContentBlock>) -> ChatResponse {
    ChatResponse { content, model: "m".into(), stop_reason: "end_turn".into(), input_tokens: 0, output_tokens: 0 }
}

// =============================================================================
// LlmError display
// =============================================================================

#[test]
fn error_display_names_missing_var() {
    let err = LlmError::MissingApiKey { var: "ANTHROPIC_API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var ANTHROPIC_API_KEY not set");
}

#[test]
fn error_display_omits_response_body() {
    let err = LlmError::ApiResponse { status: 500, body: "secret upstream detail".into() };
    assert_eq!(err.to_string(), "API response error: status 500");
}

// =============================================================================
// ContentBlock serde
// =============================================================================

#[test]
fn content_block_text_roundtrips_with_type_tag() {
    let block = ContentBlock::Text { text: "hi".into() };
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value, json!({ "type": "text", "text": "hi" }));
}

#[test]
fn content_block_unknown_type_deserializes_to_unknown() {
    let block: ContentBlock = serde_json::from_value(json!({ "type": "server_tool_use", "x": 1 })).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

#[test]
fn content_untagged_accepts_plain_string() {
    let content: Content = serde_json::from_value(json!("hello")).unwrap();
    assert!(matches!(content, Content::Text(t) if t == "hello"));
}

#[test]
fn message_user_builds_text_content() {
    let msg = Message::user("prompt");
    assert_eq!(msg.role, "user");
    assert!(matches!(msg.content, Content::Text(ref t) if t == "prompt"));
}

// =============================================================================
// ChatResponse helpers
// =============================================================================

#[test]
fn text_joins_text_blocks_and_skips_others() {
    let resp = response(vec![
        ContentBlock::Thinking { thinking: "hmm".into() },
        ContentBlock::Text { text: "Hello, ".into() },
        ContentBlock::ToolUse { id: "t1".into(), name: "x".into(), input: json!({}) },
        ContentBlock::Text { text: "world".into() },
    ]);
    assert_eq!(resp.text(), "Hello, world");
}

#[test]
fn text_is_empty_without_text_blocks() {
    assert_eq!(response(vec![]).text(), "");
}

#[test]
fn tool_input_finds_named_call() {
    let resp = response(vec![
        ContentBlock::ToolUse { id: "t1".into(), name: "other".into(), input: json!({ "a": 1 }) },
        ContentBlock::ToolUse { id: "t2".into(), name: "respond".into(), input: json!({ "score": 80 }) },
    ]);
    assert_eq!(resp.tool_input("respond"), Some(&json!({ "score": 80 })));
}

#[test]
fn tool_input_none_when_not_called() {
    let resp = response(vec![ContentBlock::Text { text: "{}".into() }]);
    assert!(resp.tool_input("respond").is_none());
}
