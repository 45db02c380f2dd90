use super::*;
use serde_json::json;

// ===== response parsing =====

#[test]
fn parse_text_response() {
    let json = json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Hello!"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn parse_tool_call() {
    let json = json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "respond", "arguments": "{\"compliance_score\":64}" }
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": { "prompt_tokens": 20, "completion_tokens": 10 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "tool_use");
    assert_eq!(resp.tool_input("respond"), Some(&json!({ "compliance_score": 64 })));
}

#[test]
fn parse_malformed_arguments_become_empty_object() {
    let json = json!({
        "model": "gpt-4o",
        "choices": [{
            "message": {
                "tool_calls": [{ "id": "c", "function": { "name": "respond", "arguments": "{not json" } }]
            },
            "finish_reason": "tool_calls"
        }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.tool_input("respond"), Some(&json!({})));
}

#[test]
fn parse_tool_call_without_id_errors() {
    let json = json!({
        "choices": [{
            "message": { "tool_calls": [{ "function": { "name": "respond", "arguments": "{}" } }] }
        }]
    })
    .to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_length_finish_maps_to_max_tokens() {
    let json = json!({
        "choices": [{ "message": { "content": "cut o" }, "finish_reason": "length" }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
}

#[test]
fn parse_missing_choices() {
    let json = json!({ "model": "gpt-4o", "choices": [] }).to_string();
    assert!(parse_chat_completions_response(&json).is_err());
}

// ===== request building =====

#[test]
fn messages_prepend_system_prompt() {
    let msgs = build_messages("Be brief.", &[Message::user("hi")]);
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0].role, "system");
    assert_eq!(msgs[0].content.as_deref(), Some("Be brief."));
    assert_eq!(msgs[1].content.as_deref(), Some("hi"));
}

#[test]
fn messages_skip_blank_system_prompt() {
    let msgs = build_messages("  ", &[Message::user("hi")]);
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].role, "user");
}

#[test]
fn messages_flatten_blocks_into_tool_calls() {
    let assistant = Message {
        role: "assistant".into(),
        content: Content::Blocks(vec![
            ContentBlock::Thinking { thinking: "...".into() },
            ContentBlock::ToolUse { id: "c1".into(), name: "respond".into(), input: json!({ "a": 1 }) },
        ]),
    };
    let msgs = build_messages("", &[assistant]);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].content.is_none());
    let calls = msgs[0].tool_calls.as_ref().unwrap();
    assert_eq!(calls[0].function.name, "respond");
    assert_eq!(calls[0].function.arguments, r#"{"a":1}"#);
}

#[test]
fn tool_choice_names_function() {
    let value = serde_json::to_value(CcToolChoice::named("respond")).unwrap();
    assert_eq!(value, json!({ "type": "function", "function": { "name": "respond" } }));
}
