use crate::{Message, Role, SessionRecord, ToolCall};
use serde_json::{Map, Value};

/// User message with the given content.
pub fn user(text: &str) -> Message {
    Message::new(Role::User, text)
}

/// Assistant message with the given content.
pub fn assistant(text: &str) -> Message {
    Message::new(Role::Assistant, text)
}

/// Tool call carrying a `file_path` argument.
pub fn file_tool(name: &str, path: &str) -> ToolCall {
    let mut input = Map::new();
    input.insert("file_path".to_string(), Value::String(path.to_string()));
    ToolCall {
        name: name.to_string(),
        input,
    }
}

/// Record with the given messages and argument-less calls to `tools`.
pub fn record_with(messages: Vec<Message>, tools: &[&str]) -> SessionRecord {
    let mut record = SessionRecord {
        messages,
        ..SessionRecord::default()
    };
    for name in tools {
        record.push_tool_call(ToolCall {
            name: name.to_string(),
            input: Map::new(),
        });
    }
    record
}
