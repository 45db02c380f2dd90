use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Hello world" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Hello world"));
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_tool_use_response() {
    let json = make_response(serde_json::json!([
        { "type": "tool_use", "id": "tu_1", "name": "respond", "input": { "compliance_score": 72 } }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(
        matches!(&resp.content[0], ContentBlock::ToolUse { id, name, .. } if id == "tu_1" && name == "respond")
    );
}

#[test]
fn parse_mixed_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Here is the review" },
        { "type": "tool_use", "id": "tu_2", "name": "respond", "input": { "gaps": [] } }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 2);
    assert!(matches!(&resp.content[0], ContentBlock::Text { .. }));
    assert!(matches!(&resp.content[1], ContentBlock::ToolUse { .. }));
}

#[test]
fn parse_unknown_content_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "hi" },
        { "type": "some_future_type", "data": {} }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { .. }));
}

#[test]
fn parse_invalid_json() {
    let result = parse_response("not json");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_thinking_blocks_are_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "text", "text": "Here is my answer" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Here is my answer"));
}

#[test]
fn parse_thinking_only_response_is_empty() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert!(resp.content.is_empty());
}

// =============================================================================
// build_request
// =============================================================================

#[test]
fn request_forces_named_tool() {
    let messages = [Message::user("review")];
    let tools = [Tool { name: "respond".into(), description: "d".into(), input_schema: serde_json::json!({}) }];
    let request = ChatRequest {
        max_tokens: 512,
        system: "sys",
        messages: &messages,
        tools: Some(&tools),
        force_tool: Some("respond"),
    };
    let value = serde_json::to_value(build_request("claude", &request)).unwrap();
    assert_eq!(value["tool_choice"], serde_json::json!({ "type": "tool", "name": "respond" }));
    assert_eq!(value["tools"][0]["name"], "respond");
    assert_eq!(value["system"], "sys");
    assert_eq!(value["max_tokens"], 512);
}

#[test]
fn request_omits_empty_system_and_tools() {
    let messages = [Message::user("hi")];
    let request = ChatRequest { max_tokens: 64, system: "", messages: &messages, tools: None, force_tool: None };
    let value = serde_json::to_value(build_request("claude", &request)).unwrap();
    assert!(value.get("system").is_none());
    assert!(value.get("tools").is_none());
    assert!(value.get("tool_choice").is_none());
    assert_eq!(value["messages"][0]["content"], "hi");
}
